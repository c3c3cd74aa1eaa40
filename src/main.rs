//! Vouch Proxy command line tool
//!
//! Resolves and validates the configuration at startup. Any fatal
//! configuration error stops the process before anything is served.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use vouch_proxy::common::log::{apply_config_level, log_test_messages};
use vouch_proxy::common::{init_logger, Result};
use vouch_proxy::config::{self, CmdLine, BRANDING};
use vouch_proxy::{APP_NAME, VERSION};

fn main() -> ExitCode {
    // Parse command line arguments
    let cmdline = CmdLine::parse();

    // Initialize logger
    if let Err(e) = init_logger(cmdline.log_level.unwrap_or_default()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if cmdline.log_test {
        log_test_messages();
        return ExitCode::SUCCESS;
    }

    match run(&cmdline) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cmdline: &CmdLine) -> Result<()> {
    info!("Starting {} ({} v{})", BRANDING.full_name, APP_NAME, VERSION);

    let resolved = config::auto_load(cmdline)?;
    let config = &resolved.config;

    apply_config_level(cmdline.log_level, &config.log_level, config.testing);

    if cmdline.healthcheck {
        info!(
            "healthcheck: http://{}:{}/healthcheck",
            if config.listen.is_empty() { "0.0.0.0" } else { config.listen.as_str() },
            config.port
        );
        return Ok(());
    }

    info!("Configuration loaded successfully from {}", resolved.document.path().display());
    if !resolved.warnings.is_empty() {
        info!("{} configuration warning(s), see above", resolved.warnings.len());
    }

    info!("Listen address: {}:{}", config.listen, config.port);
    if config.allow_all_users {
        info!("All authenticated users are allowed");
    } else {
        info!("Allowed domains: {}", config.domains.join(", "));
    }
    for (claim, header) in &config.headers.claims_cleaned {
        info!("Claim {} forwarded as {}", claim, header);
    }

    Ok(())
}
