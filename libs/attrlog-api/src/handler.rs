use std::sync::Arc;

use crate::attr::Attr;
use crate::error::HandlerError;
use crate::level::Level;
use crate::record::Record;

/// Consumer of finished records.
///
/// A handler owns output: formatting, filtering, and where records go.
/// It receives each record by value and must call
/// [`Value::resolve`](crate::value::Value::resolve) on values before
/// inspecting them. Records that must outlive the call should be cloned.
pub trait Handler: Send + Sync {
    /// Whether records at `level` would be handled. Checked before a
    /// record is built.
    fn enabled(&self, level: Level) -> bool;

    fn handle(&self, record: Record) -> Result<(), HandlerError>;

    /// A handler whose records include `attrs`.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that qualifies subsequent attributes with `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}
