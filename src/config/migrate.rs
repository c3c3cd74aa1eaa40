//! Primary decode and legacy migration
//!
//! The `vouch` section is decoded first. When it names no domains and the
//! deprecated `lasso` section does, the legacy configuration replaces the
//! primary one wholesale. Fields are never mixed between the two.

use log::{debug, error};

use crate::config::defaults::BRANDING;
use crate::config::document::RawDocument;
use crate::config::types::Configuration;
use crate::config::warning::ConfigWarning;

/// Outcome of choosing between the primary and the legacy section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// The current schema's section was kept
    PrimaryKept(Configuration),
    /// The legacy section replaced the primary one
    LegacyAdopted(Configuration),
}

impl Migration {
    /// The chosen configuration
    pub fn into_config(self) -> Configuration {
        match self {
            Self::PrimaryKept(config) | Self::LegacyAdopted(config) => config,
        }
    }

    /// The warning to raise, if the legacy key was adopted
    pub fn warning(&self) -> Option<ConfigWarning> {
        match self {
            Self::PrimaryKept(_) => None,
            Self::LegacyAdopted(_) => Some(ConfigWarning::LegacyKey {
                legacy: BRANDING.old_lc_name.to_string(),
                current: BRANDING.lc_name.to_string(),
            }),
        }
    }
}

/// Choose between the primary and the legacy configuration
///
/// The legacy candidate wins only when the primary names no domains and the
/// legacy one does.
pub fn migrate(primary: Configuration, legacy: Option<Configuration>) -> Migration {
    match legacy {
        Some(legacy) if primary.domains.is_empty() && !legacy.domains.is_empty() => {
            Migration::LegacyAdopted(legacy)
        }
        _ => Migration::PrimaryKept(primary),
    }
}

/// Decode the primary section and apply the legacy migration
///
/// Values that do not fit the typed shape are logged and left out, so the
/// field keeps its zero value and the defaults overlay can fill it. The legacy
/// section is only decoded when the primary has no domains.
pub fn resolve_sections(document: &RawDocument) -> Migration {
    let primary = decode_section(document, BRANDING.lc_name);

    let legacy = (primary.domains.is_empty() && document.is_set(BRANDING.old_lc_name))
        .then(|| decode_section(document, BRANDING.old_lc_name));

    let migration = migrate(primary, legacy);
    match &migration {
        Migration::PrimaryKept(_) => debug!("using the `{}` section", BRANDING.lc_name),
        Migration::LegacyAdopted(_) => {
            debug!("using the legacy `{}` section", BRANDING.old_lc_name)
        }
    }

    migration
}

fn decode_section(document: &RawDocument, key: &str) -> Configuration {
    let (config, dropped) = document.unmarshal_key_lossy::<Configuration>(key);
    for path in dropped {
        error!(
            "configuration error: ignoring {}, its value does not have the expected type",
            path
        );
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_domains(domains: &[&str]) -> Configuration {
        Configuration {
            domains: domains.iter().map(|d| d.to_string()).collect(),
            ..Configuration::default()
        }
    }

    #[test]
    fn test_primary_with_domains_is_kept() {
        let primary = with_domains(&["example.com"]);
        let legacy = with_domains(&["legacy.com"]);
        assert_eq!(
            migrate(primary.clone(), Some(legacy)),
            Migration::PrimaryKept(primary)
        );
    }

    #[test]
    fn test_legacy_adopted_wholesale() {
        let mut primary = with_domains(&[]);
        primary.port = 9090;
        primary.cookie.name = "FromPrimary".to_string();
        let legacy = with_domains(&["legacy.com"]);

        let migration = migrate(primary, Some(legacy.clone()));
        assert!(migration.warning().is_some());

        let config = migration.into_config();
        assert_eq!(config, legacy);
        assert_eq!(config.port, 0);
        assert_eq!(config.cookie.name, "");
    }

    #[test]
    fn test_empty_legacy_keeps_primary() {
        let mut primary = with_domains(&[]);
        primary.allow_all_users = true;
        let migration = migrate(primary.clone(), Some(with_domains(&[])));
        assert_eq!(migration, Migration::PrimaryKept(primary));
        assert_eq!(migration.warning(), None);
    }

    #[test]
    fn test_resolve_from_legacy_document() {
        let document = RawDocument::parse(
            "test.yml",
            "vouch:\n  port: 9090\nlasso:\n  domains: [legacy.com]\n  port: 8080\n",
        )
        .unwrap();

        let migration = resolve_sections(&document);
        assert!(matches!(migration, Migration::LegacyAdopted(_)));
        let config = migration.into_config();
        assert_eq!(config.domains, vec!["legacy.com".to_string()]);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_resolve_ignores_broken_legacy() {
        let document = RawDocument::parse(
            "test.yml",
            "vouch:\n  allowAllUsers: true\nlasso:\n  domains: 5\n",
        )
        .unwrap();

        let config = resolve_sections(&document).into_config();
        assert!(config.allow_all_users);
        assert!(config.domains.is_empty());
    }

    #[test]
    fn test_mistyped_primary_values_are_left_out() {
        let document = RawDocument::parse(
            "test.yml",
            concat!(
                "vouch:\n  port: [1]\n  domains: [example.com]\n",
                "  cookie:\n    secure: maybe\n    name: c\n",
            ),
        )
        .unwrap();

        let config = resolve_sections(&document).into_config();
        assert_eq!(config.port, 0);
        assert!(!config.cookie.secure);
        assert_eq!(config.cookie.name, "c");
        assert_eq!(config.domains, vec!["example.com".to_string()]);
    }

    #[test]
    fn test_quoted_primary_values_decode() {
        let document = RawDocument::parse(
            "test.yml",
            "vouch:\n  port: \"9091\"\n  allowAllUsers: \"true\"\n",
        )
        .unwrap();

        let config = resolve_sections(&document).into_config();
        assert_eq!(config.port, 9091);
        assert!(config.allow_all_users);
    }
}
