// metascrub - Metadata Anonymisation and Location Analysis Tool
// Copyright (c) 2025 Metascrub Contributors
// Licensed under the MIT License

use clap::Parser;
use metascrub::cli::commands::init::DEFAULT_CONFIG_FILE;
use metascrub::cli::{Cli, Commands};
use metascrub::config::{load_or_default, LoggingConfig, ScrubConfig};
use metascrub::domain::Result;
use metascrub::logging::init_logging;
use std::path::Path;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // `--config`, else ./metascrub.toml when present, else built-in defaults.
    // A broken config still gets console logging so the error can be reported
    let config = load_or_default(cli.config_path().as_deref());
    let (config_level, logging_config) = match &config {
        Ok(c) => (c.application.log_level.clone(), c.logging.clone()),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "metascrub - Metadata Anonymisation and Location Analysis Tool"
    );

    let exit_code = match execute_command(&cli, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: Result<ScrubConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Anonymise(args) => with_config(config, |c| args.execute(c)),
        Commands::AnalyseLocations(args) => with_config(config, |c| args.execute(c)),
        Commands::ValidateConfig(args) => {
            let path = cli
                .config
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
            args.execute(path)
        }
        Commands::Init(args) => args.execute(),
    }
}

fn with_config(
    config: Result<ScrubConfig>,
    run: impl FnOnce(&ScrubConfig) -> anyhow::Result<i32>,
) -> anyhow::Result<i32> {
    match config {
        Ok(config) => run(&config),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            Ok(2)
        }
    }
}
