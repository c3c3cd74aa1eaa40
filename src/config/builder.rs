//! Configuration builder
//!
//! Runs the resolution pipeline once:
//! locate → strict check → primary decode → legacy migration → defaults
//! overlay → port override → validation → claim headers.
//!
//! Each `build` produces a fresh [`Configuration`]. Nothing is shared with a
//! previous build, so test setups can rebuild freely (one at a time).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::config::claims::clean_claims_headers;
use crate::config::cli::{apply_port_override, CmdLine};
use crate::config::defaults::{BRANDING, PORT_UNSET};
use crate::config::document::RawDocument;
use crate::config::error::Result;
use crate::config::guard::check_well_formed;
use crate::config::locator::{config_dir, defaults_path, root_dir, DocumentSource, Environment};
use crate::config::merger::DefaultsOverlay;
use crate::config::migrate::resolve_sections;
use crate::config::types::Configuration;
use crate::config::validator::validate_config;
use crate::config::warning::ConfigWarning;

/// The output of a successful resolution
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The configuration, read-only from here on
    pub config: Arc<Configuration>,
    /// Soft problems found along the way, in the order they were raised
    pub warnings: Vec<ConfigWarning>,
    /// The primary document, for raw lookups
    pub document: RawDocument,
    /// Root directory used for the search
    pub root: PathBuf,
}

impl Resolved {
    /// String value of a dotted key in the primary document
    pub fn get(&self, key: &str) -> String {
        self.document.get(key)
    }
}

/// Configuration builder
///
/// Provides a fluent API over the sources that feed resolution.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    environment: Environment,
    config_file: Option<PathBuf>,
    port: i32,
    testing: bool,
    validate: bool,
}

impl ConfigBuilder {
    /// Create a builder reading the given environment snapshot
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            config_file: None,
            port: PORT_UNSET,
            testing: false,
            validate: true,
        }
    }

    /// Take the config file, port and health-check flags from the command line
    pub fn with_cmdline(mut self, cmdline: &CmdLine) -> Self {
        self.config_file = cmdline.config_file.clone();
        self.port = cmdline.port;
        if cmdline.healthcheck {
            // bare minimum for a health check
            return self.without_validation();
        }
        self
    }

    /// Search for this file as if it was given with `--config`
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override the port as if it was given with `--port`
    pub fn with_port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    /// Resolve for a test run: the document defaults to
    /// `<root>/config/testing/test_config.yml` and validation is skipped
    pub fn for_testing(mut self) -> Self {
        self.testing = true;
        self.validate = false;
        self
    }

    /// Disable validation
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Resolved> {
        let mut warnings = Vec::new();

        let root = root_dir(&self.environment)?;
        let source = if self.testing {
            DocumentSource::for_testing(&self.environment, &root)
        } else {
            DocumentSource::select(&self.environment, self.config_file.as_deref(), &root)
        };

        let path = source.locate()?;
        info!("loading configuration from {}", path.display());
        let document = RawDocument::load(&path)?;

        warnings.extend(check_well_formed(&document));

        let migration = resolve_sections(&document);
        if let Some(warning) = migration.warning() {
            warning.log();
            warnings.push(warning);
        }
        let mut config = migration.into_config();

        match defaults_path(&root) {
            Some(defaults) => {
                let defaults_doc = RawDocument::load(&defaults)?;
                let baseline: Configuration = defaults_doc.unmarshal_key(BRANDING.lc_name)?;
                config.overlay(&baseline);
                debug!("applied defaults from {}", defaults.display());
            }
            None => {
                let warning = ConfigWarning::DefaultsMissing { dir: config_dir(&root) };
                warning.log();
                warnings.push(warning);
            }
        }

        apply_port_override(&mut config, self.port);

        if self.validate {
            debug!("Validating configuration");
            warnings.extend(validate_config(&config, &document)?);
        }

        config.headers.claims_cleaned =
            clean_claims_headers(&config.headers.claims, &config.headers.claim_header);

        config.log();

        Ok(Resolved {
            config: Arc::new(config),
            warnings,
            document,
            root,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new(Environment::from_process())
    }
}

/// Resolve the configuration from the process environment and command line
pub fn auto_load(cmdline: &CmdLine) -> Result<Resolved> {
    ConfigBuilder::new(Environment::from_process())
        .with_cmdline(cmdline)
        .build()
}
