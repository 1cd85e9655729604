//! Collaborator seams consumed by the reconciliation engine.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::Result;
use crate::types::{DnsRecord, HostedZone, InventorySnapshot};

/// Lazy, paginated sequence of records in one zone
pub type RecordStream<'a> = BoxStream<'a, Result<DnsRecord>>;

/// Source of hosted zones and their record sets
#[async_trait]
pub trait ZoneDirectory: Send + Sync {
    /// List every hosted zone in the account
    async fn list_zones(&self) -> Result<Vec<HostedZone>>;

    /// Stream the records of one zone.
    ///
    /// Pages are fetched on demand; a page that still fails after retries
    /// surfaces as a single `DirectoryUnavailable` item and ends the stream.
    fn list_records<'a>(&'a self, zone_id: &'a str) -> RecordStream<'a>;
}

/// Source of live backing-resource identifiers
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Capture a snapshot of the account's live resources.
    ///
    /// A failed dimension is reported inside the snapshot; an error is only
    /// returned when nothing at all could be fetched.
    async fn fetch_inventory(&self) -> Result<InventorySnapshot>;
}

/// Outbound alert destination
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert message
    async fn send(&self, message: &str) -> Result<()>;
}
