//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Find DNS records that point at deleted cloud resources
///
/// Every hosted zone is cross-referenced against the load balancers and
/// instances that currently exist. Records whose target is gone can be
/// claimed by someone else and are reported as dangling.
#[derive(Parser, Debug)]
#[command(name = "dangling-scan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Cloud gateway base URL
    #[arg(long, env = "DANGLING_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the gateway
    #[arg(long, env = "DANGLING_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Retries per failed request
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile every hosted zone and report dangling records
    Scan(ScanArgs),

    /// List hosted zones
    Zones,

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Scan command
// ============================================================================

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Zones processed concurrently
    #[arg(short = 'j', long, env = "DANGLING_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Webhook receiving an alert per dangling record
    #[arg(long, env = "DANGLING_NOTIFY_URL")]
    pub notify_url: Option<String>,

    /// Do not send alerts even if a webhook is configured
    #[arg(long)]
    pub no_notify: bool,

    /// Stop launching zones after this many seconds
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Refresh the inventory before each zone instead of once per run
    #[arg(long)]
    pub per_zone_inventory: bool,

    /// Skip private hosted zones
    #[arg(long)]
    pub skip_private: bool,

    /// Only scan these zones (name or id, repeatable)
    #[arg(short, long = "zone")]
    pub zones: Vec<String>,

    /// Only report dangling findings
    #[arg(long)]
    pub only_dangling: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the configuration file contents
    Show,

    /// Show the configuration file path
    Path,
}
