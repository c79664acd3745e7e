use std::path::Path;

use attrlog_api::attr::Attr;
use attrlog_api::value::Value;
use serde::Deserialize;

use crate::error::EngineError;

/// Logger configuration, parsed from TOML by default.
///
/// ```toml
/// add_source = true
/// group = "request"
///
/// [attrs]
/// service = "billing"
/// replica = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoggerConfig {
    /// Record the call site of each log statement.
    #[serde(default)]
    pub add_source: bool,

    /// Group opened after the static attributes.
    #[serde(default)]
    pub group: Option<String>,

    /// Attributes added to every record.
    #[serde(default)]
    pub attrs: serde_json::Map<String, serde_json::Value>,
}

impl LoggerConfig {
    /// Static attributes, converted from their JSON form.
    pub fn static_attrs(&self) -> Vec<Attr> {
        self.attrs
            .iter()
            .map(|(k, v)| Attr::new(k.clone(), Value::from(v.clone())))
            .collect()
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content).map_err(|e| e.with_context(path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Load configuration, choosing the parser by file extension.
    ///
    /// `parsers` are tried before the built-in TOML parser.
    pub fn load_with(
        path: impl AsRef<Path>,
        parsers: &[&dyn ConfigParser],
    ) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let parser = parsers
            .iter()
            .copied()
            .chain([&TomlParser as &dyn ConfigParser])
            .find(|p| p.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "{}: no parser for extension '{ext}'",
                    path.display()
                ))
            })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loading logger config");
        parser
            .parse(&content)
            .map_err(|e| e.with_context(path.display()))
    }
}

/// A configuration file format.
pub trait ConfigParser {
    /// File extensions handled, without the dot.
    fn extensions(&self) -> &[&str];

    fn parse(&self, content: &str) -> Result<LoggerConfig, EngineError>;
}

pub struct TomlParser;

impl ConfigParser for TomlParser {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, content: &str) -> Result<LoggerConfig, EngineError> {
        LoggerConfig::parse(content)
    }
}
