//! Shared fixtures for the configuration integration tests
//!
//! Each fixture owns a temporary root directory laid out like an install:
//! `<root>/config/config.yml` and `<root>/config/.defaults.yml`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vouch_proxy::config::{ConfigBuilder, Environment};

pub const SECRET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGH";

pub const OAUTH: &str = "oauth:\n  provider: github\n  client_id: abc123\n";

pub const DEFAULTS: &str = r#"
vouch:
  listen: 0.0.0.0
  port: 9090
  jwt:
    maxAge: 240
    issuer: Vouch
  cookie:
    name: VouchCookie
    maxAge: 240
    httpOnly: true
  headers:
    claimheader: X-Vouch-IdP-Claims-
"#;

pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    /// An install with only a defaults document
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("config")).expect("Failed to create config dir");
        let fixture = Self { root };
        fixture.write("config/.defaults.yml", DEFAULTS);
        fixture
    }

    /// An install with the given primary document
    pub fn with_config(yaml: &str) -> Self {
        let fixture = Self::new();
        fixture.write("config/config.yml", yaml);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write document");
        path
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.root.path().join(relative)).expect("Failed to remove document");
    }

    /// Environment pointing `VOUCH_ROOT` at this fixture
    pub fn environment(&self) -> Environment {
        Environment {
            root: Some(self.root.path().display().to_string()),
            config: None,
        }
    }

    pub fn builder(&self) -> ConfigBuilder {
        ConfigBuilder::new(self.environment())
    }
}

/// A primary document that passes validation
pub fn valid_config(extra: &str) -> String {
    format!(
        concat!(
            "vouch:\n  domains:\n    - example.com\n",
            "  jwt:\n    secret: {}\n  session:\n    key: {}\n{}{}",
        ),
        SECRET, SECRET, extra, OAUTH
    )
}
