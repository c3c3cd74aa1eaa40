//! Vouch Proxy: configuration for an SSO authentication proxy
//!
//! This library resolves the proxy's configuration from YAML documents,
//! environment variables and command line flags into one immutable
//! [`Configuration`](config::Configuration) shared through an `Arc`.
//!
//! # Example
//!
//! ```no_run
//! use vouch_proxy::config::{ConfigBuilder, Environment};
//!
//! fn main() -> vouch_proxy::Result<()> {
//!     let resolved = ConfigBuilder::new(Environment::from_process())
//!         .with_port(9090)
//!         .build()?;
//!
//!     for warning in &resolved.warnings {
//!         println!("warning: {}", warning);
//!     }
//!
//!     println!("listening on {}:{}", resolved.config.listen, resolved.config.port);
//!     Ok(())
//! }
//! ```

// Public modules
pub mod common;
pub mod config;

// Re-export commonly used structures and functions for convenience
pub use common::{Result, VouchError};
pub use config::{Configuration, ConfigBuilder, Resolved};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
