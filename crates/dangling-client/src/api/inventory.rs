//! Load balancer and compute instance endpoints.

use super::next_cursor;
use crate::CloudClient;
use async_trait::async_trait;
use dangling_core::{
    DanglingError, InventoryDimension, InventorySnapshot, InventorySource, Result,
};
use serde::Deserialize;
use tracing::{info, warn};

/// Instance states whose addresses have been handed back to the provider
const RELEASED_STATES: [&str; 2] = ["terminated", "shutting-down"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeLoadBalancersResponse {
    #[serde(default)]
    load_balancers: Vec<WireLoadBalancer>,
    #[serde(default)]
    next_marker: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLoadBalancer {
    #[serde(rename = "DNSName")]
    dns_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstancesResponse {
    #[serde(default)]
    reservations: Vec<WireReservation>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireReservation {
    #[serde(default)]
    instances: Vec<WireInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireInstance {
    #[serde(default)]
    private_ip_address: Option<String>,
    #[serde(default)]
    state: Option<WireInstanceState>,
    #[serde(default)]
    network_interfaces: Vec<WireNetworkInterface>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireInstanceState {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireNetworkInterface {
    #[serde(default)]
    private_ip_addresses: Vec<WirePrivateIp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WirePrivateIp {
    private_ip_address: String,
}

impl WireInstance {
    fn is_released(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| RELEASED_STATES.contains(&s.name.as_str()))
    }

    fn private_ips(self) -> impl Iterator<Item = String> {
        let secondary = self
            .network_interfaces
            .into_iter()
            .flat_map(|nic| nic.private_ip_addresses)
            .map(|ip| ip.private_ip_address);
        self.private_ip_address.into_iter().chain(secondary)
    }
}

/// Resource inventory endpoints
#[derive(Clone, Copy)]
pub struct InventoryApi<'a> {
    client: &'a CloudClient,
}

impl<'a> InventoryApi<'a> {
    pub(crate) const fn new(client: &'a CloudClient) -> Self {
        Self { client }
    }

    /// DNS names of every load balancer in the account
    pub async fn load_balancer_dns_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let params: Vec<(&str, &str)> = marker.as_deref().map(|m| ("marker", m)).into_iter().collect();
            let page: DescribeLoadBalancersResponse = self.client.get("loadbalancers", &params).await?;

            names.extend(page.load_balancers.into_iter().map(|lb| lb.dns_name));

            match next_cursor(marker.as_deref(), page.next_marker) {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        Ok(names)
    }

    /// Private IPs held by instances that have not been released
    pub async fn instance_private_ips(&self) -> Result<Vec<String>> {
        let mut ips = Vec::new();
        let mut next: Option<String> = None;

        loop {
            let params: Vec<(&str, &str)> = next.as_deref().map(|t| ("next", t)).into_iter().collect();
            let page: DescribeInstancesResponse = self.client.get("instances", &params).await?;

            ips.extend(
                page.reservations
                    .into_iter()
                    .flat_map(|r| r.instances)
                    .filter(|i| !i.is_released())
                    .flat_map(WireInstance::private_ips),
            );

            match next_cursor(next.as_deref(), page.next_token) {
                Some(token) => next = Some(token),
                None => break,
            }
        }

        Ok(ips)
    }

    /// Capture both inventory dimensions concurrently.
    ///
    /// A dimension that fails is recorded as unavailable on the snapshot;
    /// only when both fail does the call itself fail.
    pub async fn snapshot(&self) -> Result<InventorySnapshot> {
        let (lbs, ips) = tokio::join!(self.load_balancer_dns_names(), self.instance_private_ips());

        if let (Err(lb_err), Err(ip_err)) = (&lbs, &ips) {
            return Err(DanglingError::inventory(format!(
                "load balancers: {lb_err}; instances: {ip_err}"
            )));
        }

        let mut snapshot = InventorySnapshot::new(
            lbs.as_deref().unwrap_or_default(),
            ips.as_deref().unwrap_or_default(),
        );

        if let Err(err) = &lbs {
            warn!(error = %err, "load balancer inventory unavailable");
            snapshot = snapshot.with_unavailable(InventoryDimension::LoadBalancers, err.to_string());
        }
        if let Err(err) = &ips {
            warn!(error = %err, "instance inventory unavailable");
            snapshot = snapshot.with_unavailable(InventoryDimension::Instances, err.to_string());
        }

        info!(
            load_balancers = snapshot.load_balancer_dns_names().len(),
            instance_ips = snapshot.instance_private_ips().len(),
            "captured inventory snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl InventorySource for CloudClient {
    async fn fetch_inventory(&self) -> Result<InventorySnapshot> {
        self.inventory().snapshot().await
    }
}
