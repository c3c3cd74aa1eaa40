//! Error handling module
//!
//! This module defines the crate-wide error type and result alias.

use thiserror::Error;
use std::io;

use crate::config::ConfigError;

/// Vouch Proxy error type
#[derive(Error, Debug)]
pub enum VouchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `VouchError`.
pub type Result<T> = std::result::Result<T, VouchError>;
