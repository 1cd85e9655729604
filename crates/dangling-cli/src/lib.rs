//! # dangling-cli
//!
//! Command-line scanner for dangling DNS records.
//!
//! ## Features
//!
//! - **Scan**: reconcile every hosted zone against live load balancers and
//!   instances, optionally posting alerts to a webhook
//! - **Zones**: list the hosted zones the gateway exposes
//! - **Config**: TOML config file overridden by flags and environment
//! - **Output formats**: pretty (colored) or JSON
//!
//! Exit codes: `0` on a completed run (dangling records or not), `2` when the
//! DNS directory cannot be enumerated, `1` for any other error.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;

use dangling::DanglingError;

/// Exit status for a failed run
pub const EXIT_FAILURE: u8 = 1;

/// Exit status when the DNS directory could not be enumerated
pub const EXIT_DIRECTORY_UNREACHABLE: u8 = 2;

/// Map an error to the process exit status
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DanglingError>() {
        Some(e) if e.is_fatal() => EXIT_DIRECTORY_UNREACHABLE,
        _ => EXIT_FAILURE,
    }
}
