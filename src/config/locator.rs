//! Locating the root directory and the configuration documents
//!
//! Precedence for the primary document:
//! 1. `VOUCH_CONFIG`, used as a file path directly
//! 2. `--config`, searched for under `/`, the root and `<root>/config`
//! 3. `<root>/config/config.yml`

use std::env;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::defaults::{
    DEFAULTS_CONFIG_NAME, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_NAME, ENV_CONFIG, ENV_ROOT,
    TEST_CONFIG_FILE, YAML_EXTENSIONS,
};
use crate::config::error::{ConfigError, Result};

/// Snapshot of the environment variables that steer resolution
///
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub root: Option<String>,
    pub config: Option<String>,
}

impl Environment {
    /// Read `VOUCH_ROOT` and `VOUCH_CONFIG` from the process environment
    pub fn from_process() -> Self {
        let get_env = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            root: get_env(ENV_ROOT),
            config: get_env(ENV_CONFIG),
        }
    }
}

/// Determine the root directory
///
/// `VOUCH_ROOT` wins when set, otherwise the running executable's directory.
pub fn root_dir(environment: &Environment) -> Result<PathBuf> {
    if let Some(root) = &environment.root {
        warn!("set root directory from {} env var: {}", ENV_ROOT, root);
        return Ok(PathBuf::from(root));
    }

    let exe = env::current_exe().map_err(|e| ConfigError::RootDir(e.to_string()))?;
    let root = exe
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::RootDir(format!("{} has no parent", exe.display())))?;

    debug!("root directory: {}", root.display());
    Ok(root)
}

/// Where the primary document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Path from `VOUCH_CONFIG`
    Environment(PathBuf),
    /// Path given with `--config`, with the directories searched for it
    CommandLine { file: PathBuf, search: Vec<PathBuf> },
    /// A named document in a directory
    Default { dir: PathBuf, name: String },
}

impl DocumentSource {
    /// Pick the source according to precedence
    pub fn select(environment: &Environment, cmdline_file: Option<&Path>, root: &Path) -> Self {
        if let Some(path) = &environment.config {
            warn!("config file loaded from environmental variable {}: {}", ENV_CONFIG, path);
            return Self::Environment(PathBuf::from(path));
        }

        if let Some(file) = cmdline_file {
            info!("config file set on commandline: {}", file.display());
            return Self::CommandLine {
                file: file.to_path_buf(),
                search: vec![
                    PathBuf::from("/"),
                    root.to_path_buf(),
                    config_dir(root),
                ],
            };
        }

        Self::Default {
            dir: config_dir(root),
            name: DEFAULT_CONFIG_NAME.to_string(),
        }
    }

    /// Source used by test-mode resolution: `VOUCH_CONFIG` if set, otherwise
    /// the bundled test document under the root.
    pub fn for_testing(environment: &Environment, root: &Path) -> Self {
        match &environment.config {
            Some(path) => Self::Environment(PathBuf::from(path)),
            None => Self::Environment(root.join(TEST_CONFIG_FILE)),
        }
    }

    /// Resolve to an existing file
    pub fn locate(&self) -> Result<PathBuf> {
        match self {
            Self::Environment(path) => {
                let path = absolute(path);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ConfigError::NotFound(path))
                }
            }
            Self::CommandLine { file, search } => {
                if file.is_absolute() {
                    return if file.is_file() {
                        Ok(file.clone())
                    } else {
                        Err(ConfigError::NotFound(file.clone()))
                    };
                }

                search
                    .iter()
                    .map(|dir| dir.join(file))
                    .chain(std::iter::once(absolute(file)))
                    .find(|candidate| candidate.is_file())
                    .ok_or_else(|| ConfigError::NotFound(file.clone()))
            }
            Self::Default { dir, name } => find_named(dir, name)
                .ok_or_else(|| ConfigError::NotFound(dir.join(format!("{}.yml", name)))),
        }
    }
}

/// `<root>/config`
pub fn config_dir(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_DIR)
}

/// Location of the defaults document, if one exists
pub fn defaults_path(root: &Path) -> Option<PathBuf> {
    find_named(&config_dir(root), DEFAULTS_CONFIG_NAME)
}

/// First `<dir>/<name>.<ext>` that exists, trying the YAML extensions in order
fn find_named(dir: &Path, name: &str) -> Option<PathBuf> {
    YAML_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .find(|candidate| candidate.is_file())
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
