use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::text::SharedStr;
use crate::value::Value;

/// A key/value pair, the unit of structured data attached to a log event.
///
/// The zero `Attr` (empty key, empty value) marks unused storage slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attr {
    pub key: SharedStr,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<SharedStr>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<SharedStr>, value: impl Into<SharedStr>) -> Self {
        Self::new(key, Value::string(value))
    }

    pub fn int64(key: impl Into<SharedStr>, value: i64) -> Self {
        Self::new(key, Value::int64(value))
    }

    pub fn uint64(key: impl Into<SharedStr>, value: u64) -> Self {
        Self::new(key, Value::uint64(value))
    }

    pub fn float64(key: impl Into<SharedStr>, value: f64) -> Self {
        Self::new(key, Value::float64(value))
    }

    pub fn bool(key: impl Into<SharedStr>, value: bool) -> Self {
        Self::new(key, Value::bool(value))
    }

    pub fn duration(key: impl Into<SharedStr>, value: Duration) -> Self {
        Self::new(key, Value::duration(value))
    }

    pub fn time(key: impl Into<SharedStr>, value: DateTime<Utc>) -> Self {
        Self::new(key, Value::time(value))
    }

    pub fn group(key: impl Into<SharedStr>, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Self::new(key, Value::group(attrs))
    }

    pub fn is_zero(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    /// Resolves the value, keeping the key.
    pub fn resolve(self) -> Self {
        Self {
            key: self.key,
            value: self.value.resolve(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
