//! Property tests for claim header names and lifetime validation

use proptest::prelude::*;

use vouch_proxy::config::claims::{claim_to_header, replace_disallowed};
use vouch_proxy::config::{validate_config, ConfigError, Configuration, RawDocument};

const PREFIX: &str = "X-Vouch-IdP-Claims-";

fn document() -> RawDocument {
    RawDocument::parse("props.yml", "oauth:\n  provider: github\n  client_id: abc\n")
        .expect("Failed to parse document")
}

proptest! {
    #[test]
    fn header_body_is_letters_digits_and_hyphens(claim in "\\PC*") {
        let header = claim_to_header(&claim, PREFIX);

        prop_assert!(header.starts_with(PREFIX));
        let body = &header[PREFIX.len()..];
        prop_assert!(
            body.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'),
            "body {:?}",
            body
        );
    }

    #[test]
    fn replace_disallowed_is_idempotent(claim in ".*") {
        let once = replace_disallowed(&claim);
        prop_assert_eq!(replace_disallowed(&once), once.clone());
        prop_assert_eq!(once.chars().count(), claim.chars().count());
    }

    #[test]
    fn cookie_longer_than_jwt_always_fails(jwt in 1i64..100_000, extra in 1i64..100_000) {
        let mut config = Configuration::default();
        config.allow_all_users = true;
        config.jwt.max_age = jwt;
        config.cookie.max_age = jwt + extra;

        let result = validate_config(&config, &document());
        prop_assert!(matches!(result, Err(ConfigError::InvalidCombination(_))));
    }

    #[test]
    fn cookie_within_jwt_passes(cookie in 0i64..100_000, slack in 0i64..100_000) {
        let mut config = Configuration::default();
        config.allow_all_users = true;
        config.jwt.max_age = (cookie + slack).max(1);
        config.cookie.max_age = cookie;

        prop_assert!(validate_config(&config, &document()).is_ok());
    }
}
