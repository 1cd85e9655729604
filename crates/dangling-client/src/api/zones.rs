//! Hosted zone and record set endpoints.

use super::next_cursor;
use crate::CloudClient;
use async_trait::async_trait;
use dangling_core::{
    normalize_zone_id, AliasTarget, DanglingError, DnsRecord, HostedZone, RecordStream, RecordType,
    Result, ZoneDirectory,
};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListHostedZonesResponse {
    #[serde(default)]
    hosted_zones: Vec<WireHostedZone>,
    #[serde(default)]
    is_truncated: bool,
    #[serde(default)]
    next_marker: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireHostedZone {
    id: String,
    name: String,
    #[serde(default)]
    config: Option<WireZoneConfig>,
    #[serde(default)]
    resource_record_set_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireZoneConfig {
    #[serde(default)]
    private_zone: bool,
}

impl From<WireHostedZone> for HostedZone {
    fn from(wire: WireHostedZone) -> Self {
        let mut zone = Self::new(&wire.id, wire.name);
        zone.private_zone = wire.config.is_some_and(|c| c.private_zone);
        zone.record_count = wire.resource_record_set_count;
        zone
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListRecordSetsResponse {
    #[serde(default)]
    resource_record_sets: Vec<WireRecordSet>,
    #[serde(default)]
    is_truncated: bool,
    #[serde(default)]
    next_record_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireRecordSet {
    name: String,
    #[serde(rename = "Type")]
    record_type: String,
    #[serde(default)]
    resource_records: Vec<WireResourceRecord>,
    #[serde(default)]
    alias_target: Option<WireAliasTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireResourceRecord {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WireAliasTarget {
    #[serde(rename = "DNSName")]
    dns_name: String,
}

impl WireRecordSet {
    /// Alias record sets are listed under the type they answer for (A, AAAA),
    /// so the presence of an alias target decides the record type.
    fn into_record(self, zone_id: &str) -> DnsRecord {
        let record_type = if self.alias_target.is_some() {
            RecordType::Alias
        } else {
            RecordType::from(self.record_type.as_str())
        };

        DnsRecord {
            zone_id: zone_id.to_string(),
            name: self.name,
            record_type,
            values: self.resource_records.into_iter().map(|r| r.value).collect(),
            alias_target: self.alias_target.map(|a| AliasTarget::new(a.dns_name)),
        }
    }
}

/// One page of record sets
#[derive(Debug, Clone)]
pub struct RecordSetPage {
    /// Records on this page, in listing order
    pub records: Vec<DnsRecord>,

    /// Cursor for the next page, if any
    pub next_token: Option<String>,
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

type PageItems = stream::Iter<std::vec::IntoIter<Result<DnsRecord>>>;

/// Hosted zone endpoints
#[derive(Clone, Copy)]
pub struct ZonesApi<'a> {
    client: &'a CloudClient,
}

impl<'a> ZonesApi<'a> {
    pub(crate) const fn new(client: &'a CloudClient) -> Self {
        Self { client }
    }

    /// List every hosted zone, following pagination markers
    pub async fn list(&self) -> Result<Vec<HostedZone>> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let params: Vec<(&str, &str)> = marker.as_deref().map(|m| ("marker", m)).into_iter().collect();
            let page: ListHostedZonesResponse = self.client.get("hostedzones", &params).await?;

            zones.extend(page.hosted_zones.into_iter().map(HostedZone::from));

            let truncated = page.is_truncated;
            match next_cursor(marker.as_deref(), page.next_marker.filter(|_| truncated)) {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        debug!(count = zones.len(), "listed hosted zones");
        Ok(zones)
    }

    /// Fetch a single page of record sets for a zone
    pub async fn records_page(&self, zone_id: &str, next_token: Option<&str>) -> Result<RecordSetPage> {
        let zone_id = normalize_zone_id(zone_id);
        let path = format!("hostedzones/{zone_id}/rrset");
        let params: Vec<(&str, &str)> = next_token.map(|t| ("next", t)).into_iter().collect();

        let page: ListRecordSetsResponse = self
            .client
            .get(&path, &params)
            .await
            .map_err(|e| DanglingError::directory(zone_id, e))?;

        let next_token = page.next_record_token.filter(|_| page.is_truncated);
        debug!(
            zone_id,
            records = page.resource_record_sets.len(),
            more = next_token.is_some(),
            "fetched record set page"
        );

        Ok(RecordSetPage {
            records: page
                .resource_record_sets
                .into_iter()
                .map(|r| r.into_record(zone_id))
                .collect(),
            next_token,
        })
    }

    /// Stream every record of a zone, fetching pages lazily
    #[must_use]
    pub fn records(&self, zone_id: &'a str) -> RecordStream<'a> {
        let api = *self;
        stream::try_unfold(Cursor::Start, move |cursor| next_page(api, zone_id, cursor))
            .try_flatten()
            .boxed()
    }
}

async fn next_page(
    api: ZonesApi<'_>,
    zone_id: &str,
    cursor: Cursor,
) -> Result<Option<(PageItems, Cursor)>> {
    let token = match cursor {
        Cursor::Done => return Ok(None),
        Cursor::Start => None,
        Cursor::Next(token) => Some(token),
    };

    let page = api.records_page(zone_id, token.as_deref()).await?;
    let next = next_cursor(token.as_deref(), page.next_token).map_or(Cursor::Done, Cursor::Next);
    let items: Vec<Result<DnsRecord>> = page.records.into_iter().map(Ok).collect();

    Ok(Some((stream::iter(items), next)))
}

#[async_trait]
impl ZoneDirectory for CloudClient {
    async fn list_zones(&self) -> Result<Vec<HostedZone>> {
        self.zones().list().await
    }

    fn list_records<'a>(&'a self, zone_id: &'a str) -> RecordStream<'a> {
        self.zones().records(zone_id)
    }
}
