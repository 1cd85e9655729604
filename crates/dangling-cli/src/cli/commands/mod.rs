//! Command implementations.

pub mod config;
pub mod scan;
pub mod zones;

use dangling::{CloudClient, RateLimit, RetryConfig};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::output::OutputFormat;

/// Request timeout when neither flag nor config sets one
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Gateway base URL
    pub api_url: Option<String>,

    /// Gateway bearer token
    pub api_token: Option<String>,

    /// Output format
    pub output_format: OutputFormat,

    /// Request timeout override
    pub timeout_secs: Option<u64>,

    /// Retry budget override
    pub max_retries: Option<u32>,

    /// Explicit config file, if one was passed
    pub config_path: Option<PathBuf>,

    /// Loaded config file
    pub config: Config,
}

impl Context {
    /// Get the gateway URL, returning an error if not set.
    pub fn require_api_url(&self) -> anyhow::Result<&str> {
        self.api_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gateway URL required.\n\n\
                 Set it with one of:\n  \
                 1. --api-url <URL>\n  \
                 2. DANGLING_API_URL environment variable\n  \
                 3. api_url in the config file (see `dangling-scan config path`)"
            )
        })
    }

    /// Effective request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a gateway client from the resolved settings.
    pub fn client(&self) -> anyhow::Result<CloudClient> {
        let mut retry = RetryConfig::new();
        if let Some(max) = self.max_retries {
            retry = retry.max_retries(max);
        }

        let mut builder = CloudClient::builder(self.require_api_url()?)
            .timeout(self.timeout())
            .retry(retry);
        if let Some(rps) = self.config.requests_per_second {
            builder = builder.rate_limit(RateLimit::per_second(rps));
        }
        if let Some(token) = &self.api_token {
            builder = builder.api_token(token.clone());
        }

        Ok(builder.build()?)
    }
}
