use attrlog_api::error::HandlerError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Add context to the error.
    ///
    /// For `Handler` variant, context is added to the inner `HandlerError`.
    /// For `Config`, context is prepended to the message.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Handler(e) => EngineError::Handler(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_reaches_handler_errors() {
        let err = EngineError::from(HandlerError::format("bad utf-8")).with_context("stdout");
        assert_eq!(err.to_string(), "handler error: format: stdout: bad utf-8");
    }

    #[test]
    fn context_on_config() {
        let err = EngineError::Config("unknown field".into()).with_context("log.toml");
        assert_eq!(err.to_string(), "config error: log.toml: unknown field");
    }
}
