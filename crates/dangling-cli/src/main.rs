//! dangling-scan - find DNS records pointing at deleted cloud resources.

use colored::Colorize;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match dangling_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            ExitCode::from(dangling_cli::exit_code(&err))
        }
    }
}
