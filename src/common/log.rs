//! Logging helpers
//!
//! The logger is installed once from the command line level. Once the
//! configuration is resolved the level may be adjusted from `vouch.logLevel`.

use std::env;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use env_logger::DEFAULT_FILTER_ENV;
use log::{debug, error, info, warn, LevelFilter};

use crate::common::{Result, VouchError};

/// Log levels accepted on the command line and in `vouch.logLevel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Panic,
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Map onto the `log` crate's filter. `panic` only lets errors through.
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Panic | Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panic => write!(f, "panic"),
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panic" => Ok(Self::Panic),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!(
                "Invalid log level: {}. Valid values are: panic, error, warn, info, debug",
                s
            )),
        }
    }
}

/// Initialize the logging system
///
/// When `RUST_LOG` is set its filter is used as is. Otherwise the logger
/// passes everything up to debug and `level` is applied through the global
/// max level, so it can be raised or lowered later.
pub fn init_logger(level: LogLevel) -> Result<()> {
    let from_env = env::var_os(DEFAULT_FILTER_ENV).is_some();

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if !from_env {
        builder.filter_level(LevelFilter::Debug);
    }

    builder
        .try_init()
        .map_err(|e| VouchError::Logging(e.to_string()))?;

    if !from_env {
        log::set_max_level(level.to_filter());
    }

    Ok(())
}

/// Adjust the global level once the configuration is known.
///
/// A level given on the command line always wins. Testing mode forces debug.
pub fn apply_config_level(cmdline: Option<LogLevel>, configured: &str, testing: bool) {
    if testing {
        log::set_max_level(LevelFilter::Debug);
        debug!("testing mode enabled, log level set to debug");
        return;
    }

    if cmdline.is_some() || configured.is_empty() {
        return;
    }

    match configured.parse::<LogLevel>() {
        Ok(level) => {
            log::set_max_level(level.to_filter());
            info!("log level set to {} from configuration", level);
        }
        Err(e) => warn!("{}", e),
    }
}

/// Emit one message at each level, used by `--logtest`.
pub fn log_test_messages() {
    debug!("logtest: debug message");
    info!("logtest: info message");
    warn!("logtest: warn message");
    error!("logtest: error message");
}
