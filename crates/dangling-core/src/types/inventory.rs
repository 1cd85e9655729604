use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::normalize_dns_name;
use super::record::DUALSTACK_MARKER;

/// One independently-fetched dimension of the resource inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryDimension {
    /// Load balancer DNS names
    LoadBalancers,
    /// Compute instance private IPs
    Instances,
}

impl fmt::Display for InventoryDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadBalancers => write!(f, "load balancers"),
            Self::Instances => write!(f, "instances"),
        }
    }
}

/// Point-in-time view of the live backing resources in the account.
///
/// Load balancer names are stored normalized (lowercase, no root dot).
/// A dimension that could not be fetched is recorded in `unavailable`
/// and its set is left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    load_balancer_dns_names: BTreeSet<String>,
    instance_private_ips: BTreeSet<String>,
    unavailable: BTreeMap<InventoryDimension, String>,
    captured_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Build a complete snapshot from both dimensions
    #[must_use]
    pub fn new<L, LS, I, IS>(load_balancer_dns_names: L, instance_private_ips: I) -> Self
    where
        L: IntoIterator<Item = LS>,
        LS: AsRef<str>,
        I: IntoIterator<Item = IS>,
        IS: AsRef<str>,
    {
        Self {
            load_balancer_dns_names: load_balancer_dns_names
                .into_iter()
                .map(|name| normalize_dns_name(name.as_ref()))
                .collect(),
            instance_private_ips: instance_private_ips
                .into_iter()
                .map(|ip| ip.as_ref().trim().to_string())
                .collect(),
            unavailable: BTreeMap::new(),
            captured_at: Utc::now(),
        }
    }

    /// Snapshot in which neither dimension could be fetched
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(Vec::<String>::new(), Vec::<String>::new())
            .with_unavailable(InventoryDimension::LoadBalancers, message.clone())
            .with_unavailable(InventoryDimension::Instances, message)
    }

    /// Mark a dimension as failed, clearing whatever it held
    #[must_use]
    pub fn with_unavailable(mut self, dimension: InventoryDimension, message: impl Into<String>) -> Self {
        match dimension {
            InventoryDimension::LoadBalancers => self.load_balancer_dns_names.clear(),
            InventoryDimension::Instances => self.instance_private_ips.clear(),
        }
        self.unavailable.insert(dimension, message.into());
        self
    }

    /// True if a load balancer answers to `dns_name`.
    ///
    /// The provider reports load balancers without the `dualstack.` prefix
    /// that alias targets carry, so both spellings are accepted.
    #[must_use]
    pub fn has_load_balancer(&self, dns_name: &str) -> bool {
        let name = normalize_dns_name(dns_name);
        if self.load_balancer_dns_names.contains(&name) {
            return true;
        }
        name.strip_prefix(DUALSTACK_MARKER)
            .is_some_and(|bare| self.load_balancer_dns_names.contains(bare))
    }

    /// True if a live instance holds the private IP
    #[must_use]
    pub fn has_instance_ip(&self, ip: &str) -> bool {
        self.instance_private_ips.contains(ip.trim())
    }

    /// True if the dimension was fetched successfully
    #[must_use]
    pub fn is_available(&self, dimension: InventoryDimension) -> bool {
        !self.unavailable.contains_key(&dimension)
    }

    /// True if at least one dimension failed
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.unavailable.is_empty()
    }

    /// Failed dimensions with their failure messages
    pub fn unavailable_dimensions(&self) -> impl Iterator<Item = (InventoryDimension, &str)> {
        self.unavailable.iter().map(|(d, m)| (*d, m.as_str()))
    }

    /// Normalized load balancer DNS names
    #[must_use]
    pub const fn load_balancer_dns_names(&self) -> &BTreeSet<String> {
        &self.load_balancer_dns_names
    }

    /// Instance private IPs
    #[must_use]
    pub const fn instance_private_ips(&self) -> &BTreeSet<String> {
        &self.instance_private_ips
    }

    /// When the snapshot was taken
    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
