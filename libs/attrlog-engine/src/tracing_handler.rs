//! Handler that forwards records to the `tracing` dispatcher.

use std::fmt::Write as _;
use std::sync::Arc;

use attrlog_api::attr::Attr;
use attrlog_api::error::HandlerError;
use attrlog_api::handler::Handler;
use attrlog_api::level::Level;
use attrlog_api::record::Record;

/// Target of every event emitted by [`TracingHandler`].
pub const TARGET: &str = "attrlog";

/// Emits each record as one `tracing` event.
///
/// The message becomes the event message. Attributes are resolved and
/// rendered as `key=value` pairs in the `attrs` field, with keys qualified
/// by the open groups (`req.id=7`). Empty attributes are left out.
///
/// This backs the default logger, so output goes wherever the installed
/// subscriber sends it. Without a subscriber nothing is enabled.
#[derive(Debug, Clone, Default)]
pub struct TracingHandler {
    prefix: String,
    preset: Vec<Attr>,
}

impl TracingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive_attrs(&self, attrs: Vec<Attr>) -> Self {
        let mut next = self.clone();
        next.preset.extend(attrs.into_iter().map(|a| self.qualify(a)));
        next
    }

    fn derive_group(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.prefix = format!("{}{name}.", self.prefix);
        next
    }

    fn qualify(&self, attr: Attr) -> Attr {
        let attr = attr.resolve();
        if self.prefix.is_empty() {
            return attr;
        }
        Attr::new(format!("{}{}", self.prefix, attr.key), attr.value)
    }

    /// The `attrs` field of the event for `record`.
    fn render(&self, record: &Record) -> Result<String, HandlerError> {
        let mut out = String::new();
        let own = record.attrs().cloned().map(|a| self.qualify(a));
        for attr in self.preset.iter().cloned().chain(own) {
            if attr.is_zero() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            write!(out, "{attr}")?;
        }
        Ok(out)
    }
}

/// The nearest `tracing` level at or below `level`. `NOTICE` is reported
/// as `INFO`, and anything below `DEBUG` as `TRACE`.
pub fn tracing_level(level: Level) -> tracing::Level {
    if level >= Level::ERROR {
        tracing::Level::ERROR
    } else if level >= Level::WARN {
        tracing::Level::WARN
    } else if level >= Level::INFO {
        tracing::Level::INFO
    } else if level >= Level::DEBUG {
        tracing::Level::DEBUG
    } else {
        tracing::Level::TRACE
    }
}

// `tracing` needs the level as a constant at each call site.
macro_rules! event_at {
    ($level:expr, $($args:tt)+) => {
        match $level {
            tracing::Level::ERROR => {
                tracing::event!(target: TARGET, tracing::Level::ERROR, $($args)+)
            }
            tracing::Level::WARN => {
                tracing::event!(target: TARGET, tracing::Level::WARN, $($args)+)
            }
            tracing::Level::INFO => {
                tracing::event!(target: TARGET, tracing::Level::INFO, $($args)+)
            }
            tracing::Level::DEBUG => {
                tracing::event!(target: TARGET, tracing::Level::DEBUG, $($args)+)
            }
            _ => {
                tracing::event!(target: TARGET, tracing::Level::TRACE, $($args)+)
            }
        }
    };
}

impl Handler for TracingHandler {
    fn enabled(&self, level: Level) -> bool {
        match tracing_level(level) {
            tracing::Level::ERROR => tracing::enabled!(target: TARGET, tracing::Level::ERROR),
            tracing::Level::WARN => tracing::enabled!(target: TARGET, tracing::Level::WARN),
            tracing::Level::INFO => tracing::enabled!(target: TARGET, tracing::Level::INFO),
            tracing::Level::DEBUG => tracing::enabled!(target: TARGET, tracing::Level::DEBUG),
            _ => tracing::enabled!(target: TARGET, tracing::Level::TRACE),
        }
    }

    fn handle(&self, record: Record) -> Result<(), HandlerError> {
        let attrs = self.render(&record)?;
        let source = record.source().map(|s| s.to_string());
        event_at!(
            tracing_level(record.level),
            severity = %record.level,
            attrs = %attrs,
            source = source.as_deref(),
            "{}",
            &*record.message
        );
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(self.derive_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.derive_group(name))
    }
}
