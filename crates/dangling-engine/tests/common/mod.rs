//! In-memory collaborators for driving the reconciler in tests.

#![allow(dead_code)]

use async_trait::async_trait;
use dangling_core::{
    AlertSink, DanglingError, DnsRecord, HostedZone, InventorySnapshot, InventorySource,
    RecordStream, Result, ZoneDirectory,
};
use futures_util::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Zone directory backed by fixed record lists
#[derive(Default)]
pub struct FakeDirectory {
    zones: Vec<HostedZone>,
    records: HashMap<String, Vec<DnsRecord>>,
    fail_after: HashMap<String, usize>,
    fail_listing: bool,
    record_delay: Option<Duration>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone(mut self, id: &str, name: &str, records: Vec<DnsRecord>) -> Self {
        self.zones.push(HostedZone::new(id, name));
        self.records.insert(id.to_string(), records);
        self
    }

    pub fn private_zone(mut self, id: &str, name: &str, records: Vec<DnsRecord>) -> Self {
        let mut zone = HostedZone::new(id, name);
        zone.private_zone = true;
        self.zones.push(zone);
        self.records.insert(id.to_string(), records);
        self
    }

    /// Yield `count` records of the zone, then a listing failure
    pub fn fail_zone_after(mut self, id: &str, count: usize) -> Self {
        self.fail_after.insert(id.to_string(), count);
        self
    }

    pub fn fail_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn record_delay(mut self, delay: Duration) -> Self {
        self.record_delay = Some(delay);
        self
    }
}

#[async_trait]
impl ZoneDirectory for FakeDirectory {
    async fn list_zones(&self) -> Result<Vec<HostedZone>> {
        if self.fail_listing {
            return Err(DanglingError::Connection("connection refused".into()));
        }
        Ok(self.zones.clone())
    }

    fn list_records<'a>(&'a self, zone_id: &'a str) -> RecordStream<'a> {
        let records = self.records.get(zone_id).cloned().unwrap_or_default();

        let mut items: Vec<Result<DnsRecord>> = match self.fail_after.get(zone_id) {
            Some(&count) => records.into_iter().take(count).map(Ok).collect(),
            None => records.into_iter().map(Ok).collect(),
        };
        if self.fail_after.contains_key(zone_id) {
            items.push(Err(DanglingError::directory(zone_id, "API error (503): service unavailable")));
        }

        let delay = self.record_delay;
        stream::iter(items)
            .then(move |item| async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                item
            })
            .boxed()
    }
}

/// Inventory source returning a fixed snapshot
pub struct FakeInventory {
    snapshot: Option<InventorySnapshot>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeInventory {
    pub fn new(snapshot: InventorySnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn with(load_balancers: &[&str], instance_ips: &[&str]) -> Self {
        Self::new(InventorySnapshot::new(load_balancers, instance_ips))
    }

    pub fn failing() -> Self {
        Self {
            snapshot: None,
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventorySource for FakeInventory {
    async fn fetch_inventory(&self) -> Result<InventorySnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.snapshot
            .clone()
            .ok_or_else(|| DanglingError::inventory("load balancers: timed out; instances: timed out"))
    }
}

/// Alert sink that records messages
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
            delay: None,
        }
    }

    /// Wait `delay` before accepting each message
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn send(&self, message: &str) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(DanglingError::NotificationFailed("webhook returned 500".into()));
        }
        Ok(())
    }
}
