//! Configuration types
//!
//! The typed shape of the `vouch` section. Keys in the raw document are
//! folded to lower case before decoding, so every serde name here is lower
//! case. A zero value (empty string, empty list, `false`, `0`) means "not set"
//! for the purpose of the defaults overlay.

use std::collections::BTreeMap;
use std::fmt;

use http::HeaderName;
use log::{debug, log_enabled, Level};
use serde::{Deserialize, Serialize};

use crate::config::error::{ConfigError, Result};
use crate::config::serde_helpers::{bool_from_scalar, int_from_scalar, string_from_scalar};

/// JWT settings
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Lifetime of the issued token, in minutes
    #[serde(rename = "maxage", deserialize_with = "int_from_scalar")]
    pub max_age: i64,
    #[serde(deserialize_with = "string_from_scalar")]
    pub issuer: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub secret: String,
    #[serde(deserialize_with = "bool_from_scalar")]
    pub compress: bool,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("max_age", &self.max_age)
            .field("issuer", &self.issuer)
            .field("secret", &redact(&self.secret))
            .field("compress", &self.compress)
            .finish()
    }
}

/// Cookie settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    #[serde(deserialize_with = "string_from_scalar")]
    pub name: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub domain: String,
    #[serde(deserialize_with = "bool_from_scalar")]
    pub secure: bool,
    #[serde(rename = "httponly", deserialize_with = "bool_from_scalar")]
    pub http_only: bool,
    /// Cookie lifetime in minutes, never longer than the JWT's
    #[serde(rename = "maxage", deserialize_with = "int_from_scalar")]
    pub max_age: i64,
    #[serde(rename = "samesite", deserialize_with = "string_from_scalar")]
    pub same_site: String,
}

/// Names of the headers forwarded downstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadersConfig {
    #[serde(deserialize_with = "string_from_scalar")]
    pub jwt: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub user: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub querystring: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub redirect: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub success: String,
    /// Prefix prepended to every claim header
    #[serde(rename = "claimheader", deserialize_with = "string_from_scalar")]
    pub claim_header: String,
    /// Raw claim names as issued by the identity provider
    pub claims: Vec<String>,
    #[serde(rename = "accesstoken", deserialize_with = "string_from_scalar")]
    pub access_token: String,
    #[serde(rename = "idtoken", deserialize_with = "string_from_scalar")]
    pub id_token: String,
    /// Raw claim mapped to the header it is forwarded in. Derived, never read
    /// from a document.
    #[serde(skip)]
    pub claims_cleaned: BTreeMap<String, String>,
}

impl HeadersConfig {
    /// The derived claim headers as typed header names
    pub fn claim_header_names(&self) -> Result<Vec<(&str, HeaderName)>> {
        self.claims_cleaned
            .iter()
            .map(|(claim, header)| {
                HeaderName::from_bytes(header.as_bytes())
                    .map(|name| (claim.as_str(), name))
                    .map_err(|e| {
                        ConfigError::InvalidValue(format!(
                            "claim {} maps to invalid header name {}: {}",
                            claim, header, e
                        ))
                    })
            })
            .collect()
    }
}

/// Session settings
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(deserialize_with = "string_from_scalar")]
    pub name: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub key: String,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("name", &self.name)
            .field("key", &redact(&self.key))
            .finish()
    }
}

/// Resolved configuration
///
/// Built once by [`ConfigBuilder`](crate::config::ConfigBuilder) and shared
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    // --- Network settings ---
    #[serde(rename = "loglevel", deserialize_with = "string_from_scalar")]
    pub log_level: String,
    #[serde(deserialize_with = "string_from_scalar")]
    pub listen: String,
    #[serde(deserialize_with = "int_from_scalar")]
    pub port: i32,
    /// Email domains allowed to log in
    pub domains: Vec<String>,
    pub whitelist: Vec<String>,
    #[serde(rename = "teamwhitelist")]
    pub team_whitelist: Vec<String>,
    #[serde(rename = "allowallusers", deserialize_with = "bool_from_scalar")]
    pub allow_all_users: bool,
    #[serde(rename = "publicaccess", deserialize_with = "bool_from_scalar")]
    pub public_access: bool,

    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub headers: HeadersConfig,
    pub session: SessionConfig,

    // --- Testing ---
    #[serde(deserialize_with = "string_from_scalar")]
    pub test_url: String,
    pub test_urls: Vec<String>,
    #[serde(deserialize_with = "bool_from_scalar")]
    pub testing: bool,
    #[serde(rename = "post_logout_redirect_uris")]
    pub logout_redirect_urls: Vec<String>,
}

impl Configuration {
    /// Log the configuration at debug level, secrets redacted
    pub fn log(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }

        debug!("=== Configuration ===");
        debug!("Network settings:");
        debug!("  Listen: {}:{}", self.listen, self.port);
        debug!("  Domains: {:?}", self.domains);
        debug!("  Whitelist: {:?}", self.whitelist);
        debug!("  Team whitelist: {:?}", self.team_whitelist);
        debug!("  Allow all users: {}", self.allow_all_users);
        debug!("  Public access: {}", self.public_access);

        debug!("JWT settings:");
        debug!("  Max age: {} minutes", self.jwt.max_age);
        debug!("  Issuer: {}", self.jwt.issuer);
        debug!("  Secret: {} characters", self.jwt.secret.len());
        debug!("  Compress: {}", self.jwt.compress);

        debug!("Cookie settings:");
        debug!("  Name: {}", self.cookie.name);
        debug!("  Domain: {}", self.cookie.domain);
        debug!("  Secure: {}, HttpOnly: {}", self.cookie.secure, self.cookie.http_only);
        debug!("  Max age: {} minutes", self.cookie.max_age);
        debug!("  SameSite: {}", self.cookie.same_site);

        debug!("Header settings:");
        debug!("  JWT: {}, User: {}", self.headers.jwt, self.headers.user);
        debug!("  Claim prefix: {}", self.headers.claim_header);
        for (claim, header) in &self.headers.claims_cleaned {
            debug!("  Claim {} -> {}", claim, header);
        }

        debug!("Session: {} (key {} characters)", self.session.name, self.session.key.len());

        if self.testing {
            debug!("Testing mode, test urls: {:?} {:?}", self.test_url, self.test_urls);
        }

        debug!("=====================");
    }
}

fn redact(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("<redacted, {} characters>", value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let config = Configuration::default();
        assert_eq!(config.port, 0);
        assert!(config.domains.is_empty());
        assert!(!config.allow_all_users);
        assert_eq!(config.jwt.max_age, 0);
        assert!(config.headers.claims_cleaned.is_empty());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Configuration::default();
        config.jwt.secret = "supersecretvalue".to_string();
        config.session.key = "anothersecret".to_string();

        let printed = format!("{:?}", config);
        assert!(!printed.contains("supersecretvalue"));
        assert!(!printed.contains("anothersecret"));
        assert!(printed.contains("<redacted, 16 characters>"));
    }

    #[test]
    fn test_decode_lowercase_keys() {
        let yaml = "port: 9090\nallowallusers: true\ncookie:\n  maxage: 10\n  httponly: true\n";
        let config: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.port, 9090);
        assert!(config.allow_all_users);
        assert_eq!(config.cookie.max_age, 10);
        assert!(config.cookie.http_only);
    }

    #[test]
    fn test_decode_quoted_scalars() {
        let yaml = concat!(
            "port: \"9091\"\n",
            "allowallusers: \"true\"\n",
            "cookie:\n  secure: \"false\"\n  maxage: \"30\"\n",
            "session:\n  key: 12345\n",
        );
        let config: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.port, 9091);
        assert!(config.allow_all_users);
        assert!(!config.cookie.secure);
        assert_eq!(config.cookie.max_age, 30);
        assert_eq!(config.session.key, "12345");
    }

    #[test]
    fn test_claim_header_names() {
        let mut headers = HeadersConfig::default();
        headers
            .claims_cleaned
            .insert("groups".to_string(), "X-Vouch-IdP-Claims-Groups".to_string());

        let names = headers.claim_header_names().unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].0, "groups");
        assert_eq!(names[0].1.as_str(), "x-vouch-idp-claims-groups");
    }

    #[test]
    fn test_claim_header_names_rejects_bad_prefix() {
        let mut headers = HeadersConfig::default();
        headers
            .claims_cleaned
            .insert("groups".to_string(), "Bad Prefix Groups".to_string());

        assert!(headers.claim_header_names().is_err());
    }
}
