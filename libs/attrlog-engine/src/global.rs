//! The process-wide default logger and the free functions that use it.
//!
//! Until [`set_default`] is called, the default logger writes through a
//! [`TracingHandler`], so events reach whatever `tracing` subscriber the
//! application installs.

use std::error::Error;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use attrlog_api::args::Arg;
use attrlog_api::attr::Attr;
use attrlog_api::level::Level;
use attrlog_api::text::SharedStr;

use crate::logger::Logger;
use crate::tracing_handler::TracingHandler;

static DEFAULT: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::new(Arc::new(TracingHandler::new()))));

/// The current default logger.
pub fn default() -> Arc<Logger> {
    DEFAULT.load_full()
}

/// Makes `logger` the default. Calls already running finish with the
/// previous logger; loggers obtained from [`default`] keep it.
pub fn set_default(logger: Logger) {
    tracing::debug!(?logger, "default logger replaced");
    DEFAULT.store(Arc::new(logger));
}

/// [`Logger::with`] on the default logger.
pub fn with(args: impl AsMut<[Arg]>) -> Logger {
    DEFAULT.load().with(args)
}

#[track_caller]
pub fn log(level: Level, msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
    DEFAULT.load().log(level, msg, args);
}

#[track_caller]
pub fn log_attrs(
    level: Level,
    msg: impl Into<SharedStr>,
    attrs: impl IntoIterator<Item = Attr>,
) {
    DEFAULT.load().log_attrs(level, msg, attrs);
}

#[track_caller]
pub fn debug(msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
    DEFAULT.load().debug(msg, args);
}

#[track_caller]
pub fn info(msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
    DEFAULT.load().info(msg, args);
}

#[track_caller]
pub fn notice(msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
    DEFAULT.load().notice(msg, args);
}

#[track_caller]
pub fn warn(msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
    DEFAULT.load().warn(msg, args);
}

#[track_caller]
pub fn error(msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
    DEFAULT.load().error(msg, args);
}

/// [`Logger::error_with`] on the default logger.
#[track_caller]
pub fn error_with(
    msg: impl Into<SharedStr>,
    err: impl Error + Send + Sync + 'static,
    args: impl AsMut<[Arg]>,
) {
    DEFAULT.load().error_with(msg, err, args);
}
