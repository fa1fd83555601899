use core_model::ModelError;
use thiserror::Error;

/// Errors raised while reading a model configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed INI line (1-based)
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number, starting at 1
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Fallo al parsear TOML
    #[error("TOML parsing failed: {0}")]
    Toml(#[from] toml::de::Error),

    /// Fallo al parsear YAML
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension with no known parser
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration parsed but does not describe a complete model
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ConfigError>;
