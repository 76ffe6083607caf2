//! Configuration for the schema generator
//!
//! Loads settings from an optional YAML file. Environment variables always
//! override file values, and command line flags override both.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or module-specific
    pub level: String,

    /// Output format: pretty, json, compact
    pub format: String,

    /// Output destination: stderr, file, both
    pub output: String,

    /// Directory for log files
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            output: "stderr".to_string(),
            directory: "./logs".to_string(),
        }
    }
}

/// Defaults for the generated DDL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Foreign server object named in `CREATE FOREIGN TABLE ... SERVER`
    pub server: Option<String>,

    /// Indices to process; empty means all
    pub indices: Vec<String>,

    /// Doc types to generate tables for; empty means all
    pub doc_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub schema: SchemaConfig,
}

impl Config {
    /// Load configuration from YAML file with environment variable overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config.with_env_overrides())
    }

    /// Defaults with environment variable overrides
    pub fn from_env() -> Self {
        Config::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(server) = std::env::var("ESFDW_SERVER") {
            self.schema.server = Some(server);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(output) = std::env::var("LOG_OUTPUT") {
            self.logging.output = output;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            self.logging.directory = dir;
        }
        self
    }

    /// Set logging environment variables for the logging module
    pub fn apply_logging_env(&self) {
        std::env::set_var("RUST_LOG", &self.logging.level);
        std::env::set_var("LOG_FORMAT", &self.logging.format);
        std::env::set_var("LOG_OUTPUT", &self.logging.output);
        std::env::set_var("LOG_DIR", &self.logging.directory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.output, "stderr");
        assert_eq!(config.schema.server, None);
        assert!(config.schema.indices.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str(
            r#"
schema:
  server: es_srv
  doc_types: [doc1, doc-3]
"#,
        )
        .unwrap();

        assert_eq!(config.schema.server.as_deref(), Some("es_srv"));
        assert_eq!(config.schema.doc_types, vec!["doc1", "doc-3"]);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_env_var_override() {
        std::env::set_var("ESFDW_SERVER", "from_env");

        let config_yaml = r#"
schema:
  server: "from_file"
  indices: ["index1"]
logging:
  level: "info"
  format: "json"
  output: "stderr"
  directory: "./logs"
"#;
        let temp_file = std::env::temp_dir().join("esfdw_test_config.yaml");
        std::fs::write(&temp_file, config_yaml).unwrap();

        let config = Config::load(&temp_file).unwrap();
        assert_eq!(config.schema.server.as_deref(), Some("from_env")); // Overridden
        assert_eq!(config.schema.indices, vec!["index1"]);

        std::env::remove_var("ESFDW_SERVER");
        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/esfdw.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
