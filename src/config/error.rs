//! Configuration errors
//!
//! Every variant here is fatal: resolution stops and the process must not
//! start serving. Soft conditions are reported as [`ConfigWarning`] instead.
//!
//! [`ConfigWarning`]: crate::config::ConfigWarning

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The running executable's directory could not be determined
    #[error("Cannot determine root directory: {0}")]
    RootDir(String),

    /// No document was found at any candidate location
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Error reading file
    #[error("Error reading configuration file {}: {}", .0.display(), .1)]
    Read(PathBuf, String),

    /// The document is not valid YAML
    #[error("Error parsing configuration file {}: {}", .0.display(), .1)]
    Parse(PathBuf, String),

    /// A section could not be decoded into the typed configuration
    #[error("Error decoding `{0}`: {1}")]
    Decode(String, String),

    /// Missing required configuration value
    #[error("required configuration option {0} is not set")]
    MissingRequired(String),

    /// Invalid combination of configuration options
    #[error("{0}")]
    InvalidCombination(String),

    /// Invalid value for configuration option
    #[error("{0}")]
    InvalidValue(String),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
