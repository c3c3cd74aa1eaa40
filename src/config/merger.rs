//! Defaults overlay
//!
//! Fills the fields the primary document left at their zero value from the
//! defaults document. A field already holding a non-zero value is never
//! touched, so an explicit file value always beats a built-in default.

use crate::config::types::{Configuration, CookieConfig, HeadersConfig, JwtConfig, SessionConfig};

/// Trait for layering baseline values under explicitly set ones
pub trait DefaultsOverlay {
    /// Copy every field of `defaults` into `self` where `self` is still zero
    fn overlay(&mut self, defaults: &Self);
}

/// Take the default when the current value is the zero value
fn fill<T: Clone + Default + PartialEq>(value: &mut T, default: &T) {
    if *value == T::default() {
        *value = default.clone();
    }
}

impl DefaultsOverlay for JwtConfig {
    fn overlay(&mut self, defaults: &Self) {
        fill(&mut self.max_age, &defaults.max_age);
        fill(&mut self.issuer, &defaults.issuer);
        fill(&mut self.secret, &defaults.secret);
        fill(&mut self.compress, &defaults.compress);
    }
}

impl DefaultsOverlay for CookieConfig {
    fn overlay(&mut self, defaults: &Self) {
        fill(&mut self.name, &defaults.name);
        fill(&mut self.domain, &defaults.domain);
        fill(&mut self.secure, &defaults.secure);
        fill(&mut self.http_only, &defaults.http_only);
        fill(&mut self.max_age, &defaults.max_age);
        fill(&mut self.same_site, &defaults.same_site);
    }
}

impl DefaultsOverlay for HeadersConfig {
    fn overlay(&mut self, defaults: &Self) {
        fill(&mut self.jwt, &defaults.jwt);
        fill(&mut self.user, &defaults.user);
        fill(&mut self.querystring, &defaults.querystring);
        fill(&mut self.redirect, &defaults.redirect);
        fill(&mut self.success, &defaults.success);
        fill(&mut self.claim_header, &defaults.claim_header);
        fill(&mut self.claims, &defaults.claims);
        fill(&mut self.access_token, &defaults.access_token);
        fill(&mut self.id_token, &defaults.id_token);
        // claims_cleaned is derived after the overlay
    }
}

impl DefaultsOverlay for SessionConfig {
    fn overlay(&mut self, defaults: &Self) {
        fill(&mut self.name, &defaults.name);
        fill(&mut self.key, &defaults.key);
    }
}

impl DefaultsOverlay for Configuration {
    fn overlay(&mut self, defaults: &Self) {
        // Network settings
        fill(&mut self.log_level, &defaults.log_level);
        fill(&mut self.listen, &defaults.listen);
        fill(&mut self.port, &defaults.port);
        fill(&mut self.domains, &defaults.domains);
        fill(&mut self.whitelist, &defaults.whitelist);
        fill(&mut self.team_whitelist, &defaults.team_whitelist);
        fill(&mut self.allow_all_users, &defaults.allow_all_users);
        fill(&mut self.public_access, &defaults.public_access);

        // Groups
        self.jwt.overlay(&defaults.jwt);
        self.cookie.overlay(&defaults.cookie);
        self.headers.overlay(&defaults.headers);
        self.session.overlay(&defaults.session);

        // Testing
        fill(&mut self.test_url, &defaults.test_url);
        fill(&mut self.test_urls, &defaults.test_urls);
        fill(&mut self.testing, &defaults.testing);
        fill(&mut self.logout_redirect_urls, &defaults.logout_redirect_urls);
    }
}
