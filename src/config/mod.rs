//! Configuration module
//!
//! Turns the on-disk YAML documents, the environment and the command line
//! into a single validated [`Configuration`]. Resolution runs once at startup,
//! before anything serves requests; the result is shared read-only through an
//! `Arc`.

pub mod builder;
pub mod claims;
pub mod cli;
pub mod defaults;
pub mod document;
pub mod error;
pub mod guard;
pub mod locator;
pub mod merger;
pub mod migrate;
pub mod serde_helpers;
pub mod types;
pub mod validator;
pub mod warning;

// Re-export types and traits
pub use self::builder::{auto_load, ConfigBuilder, Resolved};
pub use self::claims::{claim_to_header, clean_claims_headers};
pub use self::cli::CmdLine;
pub use self::document::RawDocument;
pub use self::error::ConfigError;
pub use self::locator::{DocumentSource, Environment};
pub use self::merger::DefaultsOverlay;
pub use self::migrate::{migrate, Migration};
pub use self::types::{Configuration, CookieConfig, HeadersConfig, JwtConfig, SessionConfig};
pub use self::validator::{validate_config, ConfigValidator};
pub use self::warning::ConfigWarning;

// Export constants needed externally
pub use defaults::{BRANDING, ENV_CONFIG, ENV_ROOT, MIN_BASE64_LENGTH, PORT_UNSET, REQUIRED_OPTIONS};
