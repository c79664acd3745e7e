use std::fmt;

/// Importance of a log event. Higher is more severe.
///
/// Any integer is a valid level; the named constants leave gaps so
/// applications can define levels in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const NOTICE: Level = Level(2);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

/// `DEBUG`, `INFO`, `NOTICE`, `WARN`, `ERROR`, or the nearest lower name
/// with an offset: `INFO+1`, `DEBUG-2`.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = match self.0 {
            v if v < Level::INFO.0 => ("DEBUG", Level::DEBUG.0),
            v if v < Level::NOTICE.0 => ("INFO", Level::INFO.0),
            v if v < Level::WARN.0 => ("NOTICE", Level::NOTICE.0),
            v if v < Level::ERROR.0 => ("WARN", Level::WARN.0),
            _ => ("ERROR", Level::ERROR.0),
        };
        let delta = i64::from(self.0) - i64::from(base);
        if delta == 0 {
            f.write_str(name)
        } else {
            write!(f, "{name}{delta:+}")
        }
    }
}
