//! Configuration management.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration file.
///
/// Every field is optional; flags and environment variables override it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cloud gateway base URL.
    pub api_url: Option<String>,

    /// Bearer token for the gateway.
    pub api_token: Option<String>,

    /// Alert webhook URL.
    pub notify_url: Option<String>,

    /// Zones processed concurrently.
    pub concurrency: Option<usize>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Retries per failed request.
    pub max_retries: Option<u32>,

    /// Client-side request rate limit.
    pub requests_per_second: Option<u32>,

    /// Skip private hosted zones.
    pub skip_private_zones: bool,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "dangling", "dangling-scan")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default path; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load from `explicit` if given, otherwise from the default location.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        explicit.map_or_else(Self::load, Self::load_from)
    }

    /// Copy with the API token masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.api_token = config.api_token.as_deref().map(mask);
        config
    }
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}
