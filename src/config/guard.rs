//! Strict schema check
//!
//! Walks the raw document against the full expected shape (`vouch`, the
//! legacy `lasso` and `oauth`) and reports every unknown key and every value
//! the typed decode would reject. Never fatal: a typo'd key should be visible
//! to an operator without blocking startup.

use log::debug;
use serde_yaml::Value;

use crate::config::defaults::{BRANDING, OAUTH_KEY};
use crate::config::document::{key_to_string, RawDocument};
use crate::config::types::Configuration;
use crate::config::warning::ConfigWarning;

/// Check that `document` only uses known keys
///
/// Returns `None` when the document is well formed.
pub fn check_well_formed(document: &RawDocument) -> Option<ConfigWarning> {
    let problems = schema_problems(document);
    if problems.is_empty() {
        debug!("{} is well formed", document.path().display());
        return None;
    }

    let warning = ConfigWarning::Schema { problems };
    warning.log();
    Some(warning)
}

/// Every schema violation in `document`, in document order
pub fn schema_problems(document: &RawDocument) -> Vec<String> {
    let mut problems = Vec::new();

    // the zero value serializes every known key, which makes it the schema
    let schema = match serde_yaml::to_value(Configuration::default()) {
        Ok(schema) => schema,
        Err(e) => {
            problems.push(format!("cannot build schema: {}", e));
            return problems;
        }
    };

    for key in document.top_level_keys() {
        if key == OAUTH_KEY {
            continue;
        }

        if key != BRANDING.lc_name && key != BRANDING.old_lc_name {
            problems.push(format!("'' has invalid keys: {}", key));
            continue;
        }

        if let Some(section) = document.lookup(&key) {
            unknown_keys(section, &schema, &key, &mut problems);
        }

        if let Err(e) = document.unmarshal_key::<Configuration>(&key) {
            problems.push(e.to_string());
        }
    }

    problems
}

fn unknown_keys(raw: &Value, schema: &Value, prefix: &str, problems: &mut Vec<String>) {
    let (Value::Mapping(raw), Value::Mapping(schema)) = (raw, schema) else {
        // type mismatches are reported by the decode
        return;
    };

    let mut invalid = Vec::new();
    for (key, value) in raw {
        match schema.get(key) {
            Some(expected) => {
                let path = format!("{}.{}", prefix, key_to_string(key));
                unknown_keys(value, expected, &path, problems);
            }
            None => invalid.push(key_to_string(key)),
        }
    }

    if !invalid.is_empty() {
        problems.push(format!("'{}' has invalid keys: {}", prefix, invalid.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> RawDocument {
        RawDocument::parse("test.yml", yaml).unwrap()
    }

    #[test]
    fn test_well_formed_document() {
        let document = doc(
            concat!(
                "vouch:\n  domains: [example.com]\n  cookie:\n    name: c\n    maxAge: 5\n",
                "oauth:\n  provider: github\n  anything: goes\n",
            ),
        );
        assert_eq!(check_well_formed(&document), None);
    }

    #[test]
    fn test_unknown_nested_key() {
        let document = doc("vouch:\n  cookie:\n    nmae: typo\n    secure: true\n");
        let problems = schema_problems(&document);
        assert_eq!(problems, vec!["'vouch.cookie' has invalid keys: nmae".to_string()]);
    }

    #[test]
    fn test_unknown_top_level_key() {
        let document = doc("vouch: {}\nvouh:\n  port: 1\n");
        let problems = schema_problems(&document);
        assert_eq!(problems, vec!["'' has invalid keys: vouh".to_string()]);
    }

    #[test]
    fn test_legacy_section_is_checked() {
        let document = doc("lasso:\n  domainz: [example.com]\n");
        let problems = schema_problems(&document);
        assert_eq!(problems, vec!["'lasso' has invalid keys: domainz".to_string()]);
    }

    #[test]
    fn test_derived_claim_map_is_not_a_key() {
        let document = doc("vouch:\n  headers:\n    claimsCleaned:\n      a: b\n");
        let problems = schema_problems(&document);
        assert_eq!(problems, vec!["'vouch.headers' has invalid keys: claimscleaned".to_string()]);
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let document = doc("vouch:\n  port: not-a-number\n");
        let problems = schema_problems(&document);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("vouch"));
    }

    #[test]
    fn test_warning_is_returned() {
        let document = doc("vouch:\n  bogus: 1\n");
        match check_well_formed(&document) {
            Some(ConfigWarning::Schema { problems }) => assert_eq!(problems.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }
}
