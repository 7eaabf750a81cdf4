//! # Satoshi Mirror
//!
//! Entry point: parse the command line, load configuration, initialize
//! logging and run the selected mode.
//!
//! Exit codes: 0 on success, 1 when the operation fails (or a grant names
//! an unknown agent), 2 on a usage error.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::watch;
use tracing::{error, info, warn};

use mirror_runtime::{Cli, MirrorConfig, Orchestrator};
use mirror_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(command) = cli.command.clone() else {
        // Usage goes to stderr; a bare invocation is a usage error.
        let _ = Cli::command().write_long_help(&mut std::io::stderr());
        eprintln!();
        return ExitCode::from(2);
    };

    let mut telemetry = TelemetryConfig::from_env();
    if cli.verbose {
        telemetry = telemetry.with_log_level("debug");
    }
    let _telemetry = match init_telemetry(telemetry) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            None
        }
    };

    match run(&cli, command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli, command: mirror_runtime::Command) -> Result<bool> {
    let config = MirrorConfig::load(cli.config.as_deref(), cli.data_dir.as_deref())
        .context("Failed to load configuration")?;
    info!("Data directory: {}", config.storage.data_dir.display());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Interrupt received, finishing current work (Ctrl-C again to abort)");
        let _ = shutdown_tx.send(true);
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    let operation = command.into_operation(&config);
    let name = operation.name();
    let orchestrator = Orchestrator::new(config, shutdown_rx);
    let report = orchestrator
        .run(operation)
        .await
        .with_context(|| format!("{name} failed"))?;

    println!("{report}");
    Ok(report.is_success())
}
