//! Soft configuration problems
//!
//! Returned alongside the resolved configuration so callers and tests can
//! inspect them. Each one is also logged when it is raised.

use std::fmt;
use std::path::PathBuf;

use log::{error, warn};

use crate::config::defaults::{BASE64_BYTES, BRANDING};

/// A problem that is reported but does not stop startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The strict decode found unknown keys or values of the wrong type
    Schema { problems: Vec<String> },
    /// The deprecated top-level key was used and adopted
    LegacyKey { legacy: String, current: String },
    /// A secret is shorter than the recommended length
    ShortSecret { key: String, length: usize, minimum: usize },
    /// No defaults document was found next to the configuration
    DefaultsMissing { dir: PathBuf },
}

impl ConfigWarning {
    /// Log the warning with enough detail for an operator to act on it
    pub fn log(&self) {
        match self {
            Self::Schema { problems } => {
                error!(
                    "configuration error: config file should have only two top level elements: \
                     `{}` and `oauth`.  These and other syntax errors follow...",
                    BRANDING.lc_name
                );
                for problem in problems {
                    error!("  {}", problem);
                }
                error!("continuing... (maybe you know what you're doing :)");
            }
            Self::LegacyKey { legacy, current } => {
                error!(
                    "\n\nIMPORTANT!\n\nplease update your config file to change '{}:' to '{}:' \
                     as per {}\n",
                    legacy, current, BRANDING.url
                );
            }
            Self::ShortSecret { .. } | Self::DefaultsMissing { .. } => warn!("{}", self),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema { problems } => {
                write!(f, "configuration file is not well formed: {}", problems.join("; "))
            }
            Self::LegacyKey { legacy, current } => write!(
                f,
                "deprecated top level key '{}' used, please rename it to '{}'",
                legacy, current
            ),
            Self::ShortSecret { key, length, minimum } => write!(
                f,
                "{} is too short! ({} characters long). Please consider deleting {} to \
                 automatically generate a secret of {} characters ({} random bytes, base64)",
                key, length, key, minimum, BASE64_BYTES
            ),
            Self::DefaultsMissing { dir } => {
                write!(
                    f,
                    "no defaults document found in {}, built-in defaults not applied",
                    dir.display()
                )
            }
        }
    }
}
