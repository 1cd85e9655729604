//! Run configuration.

use dangling_core::{normalize_dns_name, normalize_zone_id, HostedZone};
use std::time::Duration;

/// When the inventory snapshot is captured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InventoryScope {
    /// One snapshot shared by every zone of the run
    #[default]
    PerRun,
    /// A fresh snapshot before each zone
    PerZone,
}

/// Configuration for a reconciliation run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum zones processed at once
    pub concurrency: usize,

    /// Timeout applied to each outbound request by the collaborators
    pub timeout: Duration,

    /// Alert webhook; no endpoint means notifications are skipped
    pub notify_endpoint: Option<String>,

    /// Wall-clock budget for the whole run
    pub deadline: Option<Duration>,

    /// When to capture the inventory snapshot
    pub inventory_scope: InventoryScope,

    /// Skip zones only resolvable inside a private network
    pub skip_private_zones: bool,

    /// Restrict the run to these zones (by name or id); empty means all
    pub zone_names: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            timeout: Duration::from_secs(30),
            notify_endpoint: None,
            deadline: None,
            inventory_scope: InventoryScope::PerRun,
            skip_private_zones: false,
            zone_names: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set zone concurrency (at least one)
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the alert webhook endpoint
    #[must_use]
    pub fn notify_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.notify_endpoint = Some(endpoint.into());
        self
    }

    /// Bound the run by a deadline
    #[must_use]
    pub const fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set when the inventory snapshot is captured
    #[must_use]
    pub const fn inventory_scope(mut self, scope: InventoryScope) -> Self {
        self.inventory_scope = scope;
        self
    }

    /// Skip private zones
    #[must_use]
    pub const fn skip_private_zones(mut self, skip: bool) -> Self {
        self.skip_private_zones = skip;
        self
    }

    /// Only reconcile the named zones
    #[must_use]
    pub fn zones<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zone_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `zone` should be reconciled under this configuration
    #[must_use]
    pub fn accepts(&self, zone: &HostedZone) -> bool {
        if self.skip_private_zones && zone.private_zone {
            return false;
        }
        if self.zone_names.is_empty() {
            return true;
        }

        let name = normalize_dns_name(&zone.name);
        self.zone_names
            .iter()
            .any(|wanted| {
                normalize_zone_id(wanted) == zone.id || normalize_dns_name(wanted) == name
            })
    }
}
