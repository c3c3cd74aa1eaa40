//! Common module
//!
//! This module contains the error type and logging helpers shared by the
//! library and the binary.

pub mod error;
pub mod log;

// Re-export commonly used types and functions
pub use error::{VouchError, Result};
pub use log::{init_logger, LogLevel};
