//! Configuration validator
//!
//! Fail-fast: the first violation found is returned. Short secrets are only
//! warned about.

use log::debug;

use crate::config::defaults::{BRANDING, MIN_BASE64_LENGTH, REQUIRED_OPTIONS};
use crate::config::document::RawDocument;
use crate::config::error::{ConfigError, Result};
use crate::config::types::Configuration;
use crate::config::warning::ConfigWarning;

/// Validate the configuration
///
/// Checks, in order: required options in the raw document, domains or
/// allowAllUsers, secret lengths (warnings), cookie maxAge, JWT maxAge,
/// cookie maxAge against JWT maxAge.
pub fn validate_config(
    config: &Configuration,
    document: &RawDocument,
) -> Result<Vec<ConfigWarning>> {
    validate_required_options(document)?;
    validate_access(config)?;

    let warnings = config.check_warnings();
    for warning in &warnings {
        warning.log();
    }

    validate_max_age(config)?;

    Ok(warnings)
}

/// Every required option must be present in the raw document
fn validate_required_options(document: &RawDocument) -> Result<()> {
    match REQUIRED_OPTIONS.iter().find(|opt| !document.is_set(opt)) {
        Some(opt) => Err(ConfigError::MissingRequired(opt.to_string())),
        None => Ok(()),
    }
}

/// Domains are required unless allowAllUsers is set. Both being set is fine.
fn validate_access(config: &Configuration) -> Result<()> {
    if config.domains.is_empty() && !config.allow_all_users {
        return Err(ConfigError::InvalidCombination(format!(
            "configuration error: either one of {}.domains or {}.allowAllUsers needs to be set",
            BRANDING.lc_name, BRANDING.lc_name
        )));
    }

    Ok(())
}

/// Cookie and JWT lifetimes
fn validate_max_age(config: &Configuration) -> Result<()> {
    if config.cookie.max_age < 0 {
        return Err(ConfigError::InvalidValue(format!(
            "configuration error: cookie maxAge cannot be lower than 0 (currently: {})",
            config.cookie.max_age
        )));
    }

    if config.jwt.max_age <= 0 {
        return Err(ConfigError::InvalidValue(format!(
            "configuration error: JWT maxAge cannot be zero or lower (currently: {})",
            config.jwt.max_age
        )));
    }

    if config.cookie.max_age > config.jwt.max_age {
        return Err(ConfigError::InvalidCombination(format!(
            "configuration error: Cookie maxAge ({}) cannot be larger than the JWT maxAge ({})",
            config.cookie.max_age, config.jwt.max_age
        )));
    }

    Ok(())
}

/// Configuration validator trait
pub trait ConfigValidator {
    /// Validate against the document it was resolved from
    fn validate(&self, document: &RawDocument) -> Result<Vec<ConfigWarning>>;

    /// Check configuration for warnings
    fn check_warnings(&self) -> Vec<ConfigWarning>;
}

impl ConfigValidator for Configuration {
    fn validate(&self, document: &RawDocument) -> Result<Vec<ConfigWarning>> {
        validate_config(self, document)
    }

    fn check_warnings(&self) -> Vec<ConfigWarning> {
        let secrets = [
            (format!("{}.jwt.secret", BRANDING.lc_name), &self.jwt.secret),
            (format!("{}.session.key", BRANDING.lc_name), &self.session.key),
        ];

        secrets
            .into_iter()
            .filter_map(|(key, value)| {
                debug!("{} is {} characters long", key, value.len());
                (value.len() < MIN_BASE64_LENGTH).then(|| ConfigWarning::ShortSecret {
                    key,
                    length: value.len(),
                    minimum: MIN_BASE64_LENGTH,
                })
            })
            .collect()
    }
}
