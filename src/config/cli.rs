//! Command line flags
//!
//! Only `--port` feeds into the configuration itself; the other flags steer
//! where the document is found and how the process behaves.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::common::LogLevel;
use crate::config::defaults::PORT_UNSET;
use crate::config::types::Configuration;

/// Vouch Proxy: an SSO solution for nginx using the auth_request module
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct CmdLine {
    /// invoke healthcheck (check process return value)
    #[arg(long)]
    pub healthcheck: bool,

    /// port, overrides the configured one
    #[arg(long, default_value_t = PORT_UNSET, allow_negative_numbers = true)]
    pub port: i32,

    /// specify alternate config.yml file as command line arg
    #[arg(long = "config")]
    pub config_file: Option<PathBuf>,

    /// set log level to one of: panic, error, warn, info, debug
    #[arg(long = "loglevel", value_enum)]
    pub log_level: Option<LogLevel>,

    /// print a series of log messages and exit (used for testing)
    #[arg(long = "logtest")]
    pub log_test: bool,
}

impl Default for CmdLine {
    fn default() -> Self {
        Self {
            healthcheck: false,
            port: PORT_UNSET,
            config_file: None,
            log_level: None,
            log_test: false,
        }
    }
}

/// Apply the `--port` flag if it was given. Always wins over the documents.
pub fn apply_port_override(config: &mut Configuration, port: i32) {
    if port != PORT_UNSET {
        info!("port {} set on commandline, overriding {}", port, config.port);
        config.port = port;
    }
}
