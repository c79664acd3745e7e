use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use attrlog_api::args::{Arg, take_args};
use attrlog_api::attr::Attr;
use attrlog_api::handler::Handler;
use attrlog_api::level::Level;
use attrlog_api::record::{Context, Record};
use attrlog_api::text::SharedStr;
use attrlog_api::value::Value;
use chrono::Utc;

use crate::config::LoggerConfig;

/// Key of the attribute added by [`Logger::error_with`].
pub const ERROR_KEY: &str = "err";

/// Front end that builds records and passes them to a [`Handler`].
///
/// Cheap to clone; derived loggers share the handler chain.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    context: Option<Context>,
    add_source: bool,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            context: None,
            add_source: false,
        }
    }

    /// Builds a logger whose handler carries the configured static
    /// attributes, then opens the configured group.
    pub fn from_config(handler: Arc<dyn Handler>, config: &LoggerConfig) -> Self {
        let mut handler = handler;
        let attrs = config.static_attrs();
        if !attrs.is_empty() {
            handler = handler.with_attrs(attrs);
        }
        if let Some(group) = config.group.as_deref().filter(|g| !g.is_empty()) {
            handler = handler.with_group(group);
        }
        tracing::debug!(
            add_source = config.add_source,
            attrs = config.attrs.len(),
            group = ?config.group,
            "logger configured"
        );
        Self {
            handler,
            context: None,
            add_source: config.add_source,
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// A logger whose records include the attributes parsed from `args`.
    pub fn with(&self, mut args: impl AsMut<[Arg]>) -> Self {
        let attrs: Vec<Attr> = take_args(args.as_mut()).collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Self {
            handler: self.handler.with_attrs(attrs),
            ..self.clone()
        }
    }

    /// A logger whose later attributes are qualified by `name`.
    /// An empty name returns the logger unchanged.
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self {
            handler: self.handler.with_group(name),
            ..self.clone()
        }
    }

    pub fn with_context(&self, context: Context) -> Self {
        Self {
            context: Some(context),
            ..self.clone()
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
        if !self.enabled(level) {
            return;
        }
        let mut record = self.make_record(level, msg.into(), Location::caller());
        record.add_args(args);
        self.dispatch(record);
    }

    #[track_caller]
    pub fn log_attrs(
        &self,
        level: Level,
        msg: impl Into<SharedStr>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if !self.enabled(level) {
            return;
        }
        let mut record = self.make_record(level, msg.into(), Location::caller());
        record.add_attrs(attrs);
        self.dispatch(record);
    }

    #[track_caller]
    pub fn debug(&self, msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
        self.log(Level::DEBUG, msg, args);
    }

    #[track_caller]
    pub fn info(&self, msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
        self.log(Level::INFO, msg, args);
    }

    #[track_caller]
    pub fn notice(&self, msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
        self.log(Level::NOTICE, msg, args);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
        self.log(Level::WARN, msg, args);
    }

    #[track_caller]
    pub fn error(&self, msg: impl Into<SharedStr>, args: impl AsMut<[Arg]>) {
        self.log(Level::ERROR, msg, args);
    }

    /// Logs at `ERROR` with `err` appended under [`ERROR_KEY`].
    #[track_caller]
    pub fn error_with(
        &self,
        msg: impl Into<SharedStr>,
        err: impl Error + Send + Sync + 'static,
        args: impl AsMut<[Arg]>,
    ) {
        if !self.enabled(Level::ERROR) {
            return;
        }
        let mut record = self.make_record(Level::ERROR, msg.into(), Location::caller());
        record.add_args(args);
        record.add_attrs([Attr::new(ERROR_KEY, Value::error(err))]);
        self.dispatch(record);
    }

    fn make_record(
        &self,
        level: Level,
        msg: SharedStr,
        caller: &'static Location<'static>,
    ) -> Record {
        Record::new(
            Utc::now(),
            level,
            msg,
            self.context.clone(),
            self.add_source.then_some(caller),
        )
    }

    fn dispatch(&self, record: Record) {
        if let Err(e) = self.handler.handle(record) {
            tracing::warn!(error = %e, "handler failed to handle record");
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("has_context", &self.context.is_some())
            .field("add_source", &self.add_source)
            .finish_non_exhaustive()
    }
}
