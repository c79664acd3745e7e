//! Loosely typed logging arguments.
//!
//! Call sites may mix ready-made [`Attr`]s with alternating key/value
//! pairs: `args!["user", name, Attr::int64("n", 3), "ok", true]`.
//! Parsing never fails; malformed input is kept under [`BAD_KEY`].

use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset, Utc};

use crate::attr::Attr;
use crate::text::SharedStr;
use crate::value::Value;

/// Key used for arguments that could not be paired with a key.
pub const BAD_KEY: &str = "!BADKEY";

/// One argument of a logging call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A complete key/value pair.
    Attr(Attr),
    /// A key, or a string value when it follows a key.
    Str(SharedStr),
    /// Anything else.
    Value(Value),
}

impl Arg {
    /// The argument in value position.
    ///
    /// An `Attr` there is kept whole as an opaque value.
    pub fn into_value(self) -> Value {
        match self {
            Arg::Attr(attr) => Value::opaque(attr),
            Arg::Str(s) => Value::string(s),
            Arg::Value(v) => v,
        }
    }
}

/// An empty value, the placeholder left behind by [`take_args`].
impl Default for Arg {
    fn default() -> Self {
        Arg::Value(Value::default())
    }
}

impl From<Attr> for Arg {
    fn from(attr: Attr) -> Self {
        Arg::Attr(attr)
    }
}

impl From<&'static str> for Arg {
    fn from(s: &'static str) -> Self {
        Arg::Str(SharedStr::from_static(s))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s.into())
    }
}

impl From<SharedStr> for Arg {
    fn from(s: SharedStr) -> Self {
        Arg::Str(s)
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

macro_rules! arg_from_value {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Arg::Value(Value::from(v))
            }
        })*
    };
}

arg_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    Duration,
    DateTime<Utc>,
    DateTime<FixedOffset>,
    SystemTime,
    Vec<Attr>,
    crate::level::Level,
);

/// Builds an array of [`Arg`]s from heterogeneous expressions.
///
/// ```
/// use attrlog_api::{args, args::parse_args, attr::Attr};
///
/// let attrs: Vec<Attr> = parse_args(args!["k", 1, Attr::bool("ok", true)]).collect();
/// assert_eq!(attrs, [Attr::new("k", 1), Attr::new("ok", true)]);
/// ```
#[macro_export]
macro_rules! args {
    () => {{
        let args: [$crate::args::Arg; 0] = [];
        args
    }};
    ($($arg:expr),+ $(,)?) => {
        [$($crate::args::Arg::from($arg)),+]
    };
}

/// Iterator turning [`Arg`]s into [`Attr`]s.
#[derive(Debug, Clone)]
pub struct ArgParser<I> {
    args: I,
}

impl<I: Iterator<Item = Arg>> ArgParser<I> {
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self { args: args.into_iter() }
    }
}

impl<I: Iterator<Item = Arg>> Iterator for ArgParser<I> {
    type Item = Attr;

    fn next(&mut self) -> Option<Attr> {
        match self.args.next()? {
            Arg::Attr(attr) => Some(attr),
            Arg::Str(key) => Some(match self.args.next() {
                Some(value) => Attr { key, value: value.into_value() },
                None => Attr::new(BAD_KEY, Value::string(key)),
            }),
            Arg::Value(value) => Some(Attr::new(BAD_KEY, value)),
        }
    }

    /// Every `Attr` consumes one or two arguments.
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.args.size_hint();
        (lo.div_ceil(2), hi)
    }
}

/// Parses arguments into attributes.
pub fn parse_args<A>(args: A) -> ArgParser<A::IntoIter>
where
    A: IntoIterator<Item = Arg>,
{
    ArgParser::new(args)
}

/// Parses arguments moved out of `args`, leaving defaults behind.
pub fn take_args(args: &mut [Arg]) -> ArgParser<impl Iterator<Item = Arg> + '_> {
    parse_args(args.iter_mut().map(std::mem::take))
}

/// Number of attributes [`parse_args`] produces for `args`.
pub fn count_attrs(args: &[Arg]) -> usize {
    let mut n = 0;
    let mut i = 0;
    while i < args.len() {
        match args[i] {
            Arg::Str(_) if i + 1 < args.len() => i += 2,
            _ => i += 1,
        }
        n += 1;
    }
    n
}
