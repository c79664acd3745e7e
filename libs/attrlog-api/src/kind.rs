use std::fmt;

/// Discriminant of a [`Value`](crate::value::Value).
///
/// The zero value has kind `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    Empty,
    Bool,
    Int64,
    Uint64,
    Float64,
    String,
    Duration,
    Time,
    Group,
    /// Resolvable: produces its concrete value on demand.
    LogValuer,
    /// Opaque payload of an arbitrary type.
    Any,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Empty => "Empty",
            Kind::Bool => "Bool",
            Kind::Int64 => "Int64",
            Kind::Uint64 => "Uint64",
            Kind::Float64 => "Float64",
            Kind::String => "String",
            Kind::Duration => "Duration",
            Kind::Time => "Time",
            Kind::Group => "Group",
            Kind::LogValuer => "LogValuer",
            Kind::Any => "Any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
