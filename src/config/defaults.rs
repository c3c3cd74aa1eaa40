//! Default configuration values
//!
//! Branding, file names, environment variable names and the fixed option
//! lists used while resolving the configuration.

/// Product branding used for keys, environment variables and messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branding {
    /// lower case, the current top-level key
    pub lc_name: &'static str,
    /// camel case, used in log messages
    pub cc_name: &'static str,
    pub full_name: &'static str,
    /// deprecated top-level key
    pub old_lc_name: &'static str,
    pub url: &'static str,
}

pub const BRANDING: Branding = Branding {
    lc_name: "vouch",
    cc_name: "Vouch",
    full_name: "Vouch Proxy",
    old_lc_name: "lasso",
    url: "https://github.com/vouch/vouch-proxy",
};

/// Top-level key that belongs to the identity provider configuration
pub const OAUTH_KEY: &str = "oauth";

/// Options that must be present for a minimum viable configuration
pub const REQUIRED_OPTIONS: &[&str] = &["oauth.provider", "oauth.client_id"];

/// Environment variable overriding the root directory
pub const ENV_ROOT: &str = "VOUCH_ROOT";

/// Environment variable naming the primary document, highest precedence
pub const ENV_CONFIG: &str = "VOUCH_CONFIG";

/// Directory under the root holding the documents
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Default primary document name (without extension)
pub const DEFAULT_CONFIG_NAME: &str = "config";

/// Defaults document name (without extension)
pub const DEFAULTS_CONFIG_NAME: &str = ".defaults";

/// Document used by test-mode resolution, relative to the root
pub const TEST_CONFIG_FILE: &str = "config/testing/test_config.yml";

/// Extensions tried, in order, when a document is located by name
pub const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Sentinel for "port not given on the command line"
pub const PORT_UNSET: i32 = -1;

/// A base64 string needs 44 characters to carry 32 bytes
pub const MIN_BASE64_LENGTH: usize = 44;

/// Bytes of entropy the minimum length corresponds to
pub const BASE64_BYTES: usize = 32;

/// Characters never allowed in a claim header name
pub const HEADER_DISALLOWED: &str = "\"(),/\\:;<=>?@[]{}_.";

/// Schemes stripped from namespaced claims
pub const CLAIM_SCHEMES: &[&str] = &["http://", "https://"];
