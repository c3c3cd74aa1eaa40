//! Claim to header name mapping
//!
//! Identity provider claims are forwarded downstream as HTTP headers. Claim
//! names can be anything, including URLs (Auth0 namespaces claims that way),
//! so each one is reduced to letters, digits and hyphens, canonicalized and
//! given the configured prefix.
//!
//! Not allowed in a header name: `"(),/:;<=>?@[\]{}` (RFC 7230 section 3.2.6).
//! Underscores and periods are dropped too because nginx rejects them, and
//! anything outside printable ASCII is replaced.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::config::defaults::{BRANDING, CLAIM_SCHEMES, HEADER_DISALLOWED};

/// Strip a leading `http://` or `https://`
pub fn strip_scheme(claim: &str) -> &str {
    CLAIM_SCHEMES
        .iter()
        .find_map(|scheme| claim.strip_prefix(scheme))
        .unwrap_or(claim)
}

/// Replace every character that may not appear in a header name with `-`
///
/// Covers the disallowed set and everything outside printable ASCII. Printable
/// punctuation that is legal in a header token (`!#$%&'*+^|~` and the
/// backtick) is replaced as well, so the result holds only letters, digits and
/// hyphens. Applying it twice is the same as applying it once.
pub fn replace_disallowed(claim: &str) -> String {
    claim
        .chars()
        .map(|c| {
            if HEADER_DISALLOWED.contains(c) || !(c.is_ascii_alphanumeric() || c == '-') {
                '-'
            } else {
                c
            }
        })
        .collect()
}

/// Canonical form of a header name: the first letter and every letter after a
/// hyphen upper case, all others lower case.
pub fn canonical_header_key(key: &str) -> String {
    let mut upper = true;
    key.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// Header name for a single claim
///
/// Must be applied exactly once per raw claim: the prefix is prepended on
/// every call.
pub fn claim_to_header(claim: &str, prefix: &str) -> String {
    let body = replace_disallowed(strip_scheme(claim));
    let header = format!("{}{}", prefix, canonical_header_key(&body));

    if header != claim {
        info!(
            "{}.header.claims {} will be forwarded downstream in the Header {}",
            BRANDING.cc_name, claim, header
        );
        debug!(
            "nginx will populate the variable $auth_resp_{}",
            header.to_lowercase().replace('-', "_")
        );
    }

    header
}

/// Map every raw claim to its header name
///
/// Keyed by raw claim, so a claim listed twice yields one entry. Distinct
/// claims may share a header name.
pub fn clean_claims_headers(claims: &[String], prefix: &str) -> BTreeMap<String, String> {
    claims
        .iter()
        .map(|claim| (claim.clone(), claim_to_header(claim, prefix)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "X-Vouch-IdP-Claims-";

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("http://test.example.com"), "test.example.com");
        assert_eq!(strip_scheme("https://test.example.com"), "test.example.com");
        assert_eq!(strip_scheme("ftp://test.example.com"), "ftp://test.example.com");
        assert_eq!(strip_scheme("groups"), "groups");
    }

    #[test]
    fn test_claim_to_header() {
        let cases = [
            ("http://test.example.com", "Test-Example-Com"),
            ("https://test.auth0.com/user", "Test-Auth0-Com-User"),
            ("cognito:groups", "Cognito-Groups"),
            ("true_user", "True-User"),
            ("test_Ñame", "Test--Ame"),
            ("family name", "Family-Name"),
            ("GROUPS", "Groups"),
            ("a(b)c", "A-B-C"),
        ];

        for (claim, expected) in cases {
            assert_eq!(
                claim_to_header(claim, PREFIX),
                format!("{}{}", PREFIX, expected),
                "claim {}",
                claim
            );
        }
    }

    #[test]
    fn test_prefix_is_kept_verbatim() {
        assert_eq!(claim_to_header("groups", "X-Vouch-IdP-Claims-"), "X-Vouch-IdP-Claims-Groups");
        assert_eq!(claim_to_header("groups", ""), "Groups");
    }

    #[test]
    fn test_not_idempotent_over_prefix() {
        let once = claim_to_header("groups", PREFIX);
        let twice = claim_to_header(&once, PREFIX);
        assert_ne!(once, twice);
        assert!(twice.starts_with(&format!("{}{}", PREFIX, "X-Vouch")));
    }

    #[test]
    fn test_token_punctuation_is_replaced() {
        assert_eq!(replace_disallowed("a!b#c$d%e&f'g*h+i^j|k~l`m"), "a-b-c-d-e-f-g-h-i-j-k-l-m");
    }

    #[test]
    fn test_replace_disallowed_is_idempotent() {
        let once = replace_disallowed("a.b_c/d:e é");
        assert_eq!(once, "a-b-c-d-e--");
        assert_eq!(replace_disallowed(&once), once);
    }

    #[test]
    fn test_one_entry_per_raw_claim() {
        let claims = vec![
            "https://example.com/roles".to_string(),
            "roles".to_string(),
            "roles".to_string(),
        ];
        let cleaned = clean_claims_headers(&claims, PREFIX);

        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned["https://example.com/roles"], format!("{}Example-Com-Roles", PREFIX));
        assert_eq!(cleaned["roles"], format!("{}Roles", PREFIX));
    }

    #[test]
    fn test_empty_claim_list() {
        assert!(clean_claims_headers(&[], PREFIX).is_empty());
    }
}
