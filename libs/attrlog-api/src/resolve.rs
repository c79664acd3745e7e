//! Deferred values.
//!
//! A [`LogValuer`] stands in for a value that is expensive to compute or
//! should be computed late. Handlers call [`Value::resolve`] before
//! inspecting a value; the log call itself never does.

use crate::error::ResolveError;
use crate::value::Value;

/// Upper bound on consecutive `log_value` calls made by [`Value::resolve`].
pub const MAX_LOG_VALUES: usize = 100;

/// A type that produces its own log value.
///
/// `log_value` may return another resolvable value; resolution repeats
/// until a concrete value appears or the bound is reached.
pub trait LogValuer: Send + Sync {
    fn log_value(&self) -> Value;
}

impl Value {
    /// Repeatedly replaces a `LogValuer` value with its `log_value()`
    /// until the result is concrete. Non-resolvable values are returned
    /// unchanged.
    ///
    /// After [`MAX_LOG_VALUES`] calls that all yield resolvable values,
    /// the result is an error value describing the problem.
    pub fn resolve(self) -> Value {
        self.resolve_with_limit(MAX_LOG_VALUES)
    }

    pub fn resolve_with_limit(self, limit: usize) -> Value {
        let mut v = self;
        for _ in 0..limit {
            let next = match v.log_valuer_ref() {
                Some(valuer) => valuer.log_value(),
                None => return v,
            };
            v = next;
        }
        if v.log_valuer_ref().is_none() {
            return v;
        }
        tracing::warn!(limit, "log value did not resolve to a concrete value");
        Value::error(ResolveError::TooManyLogValues { limit })
    }

    /// A value computed by `f` each time it is resolved.
    pub fn lazy<F>(f: F) -> Value
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::log_valuer(FnValuer(f))
    }
}

struct FnValuer<F>(F);

impl<F> LogValuer for FnValuer<F>
where
    F: Fn() -> Value + Send + Sync,
{
    fn log_value(&self) -> Value {
        (self.0)()
    }
}
