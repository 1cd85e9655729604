//! `dangling-scan config` - CLI configuration inspection.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = ctx.config.redacted();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let unset = || "(not set)".dimmed().to_string();
            println!("  {} {}", "api_url:".bold(), config.api_url.unwrap_or_else(unset));
            println!("  {} {}", "api_token:".bold(), config.api_token.unwrap_or_else(unset));
            println!("  {} {}", "notify_url:".bold(), config.notify_url.unwrap_or_else(unset));
            println!(
                "  {} {}",
                "concurrency:".bold(),
                config.concurrency.map_or_else(unset, |c| c.to_string())
            );
            println!(
                "  {} {}",
                "timeout_secs:".bold(),
                config.timeout_secs.map_or_else(unset, |t| t.to_string())
            );
            println!(
                "  {} {}",
                "max_retries:".bold(),
                config.max_retries.map_or_else(unset, |r| r.to_string())
            );
            println!(
                "  {} {}",
                "requests_per_second:".bold(),
                config.requests_per_second.map_or_else(unset, |r| r.to_string())
            );
            println!("  {} {}", "skip_private_zones:".bold(), config.skip_private_zones);
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    println!("{}", path.display());
    Ok(())
}
