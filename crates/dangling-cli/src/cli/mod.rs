//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_json);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::resolve(cli.config.as_deref())?;

    // Flags and environment win over the config file
    let ctx = commands::Context {
        api_url: cli.api_url.or_else(|| config.api_url.clone()),
        api_token: cli.api_token.or_else(|| config.api_token.clone()),
        output_format: cli.output.or(config.output_format).unwrap_or_default(),
        timeout_secs: cli.timeout.or(config.timeout_secs),
        max_retries: cli.max_retries.or(config.max_retries),
        config_path: cli.config,
        config,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Scan(args) => commands::scan::execute(ctx, args).await,
        Commands::Zones => commands::zones::execute(ctx).await,
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}
