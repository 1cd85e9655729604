use serde::{Deserialize, Serialize};

/// A hosted zone as reported by the DNS directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Zone identifier (normalized, without the `/hostedzone/` prefix)
    pub id: String,

    /// Domain name of the zone (e.g. `example.com.`)
    pub name: String,

    /// Whether the zone is only resolvable inside a private network
    #[serde(default)]
    pub private_zone: bool,

    /// Number of record sets, if the directory reports it
    #[serde(default)]
    pub record_count: Option<u64>,
}

impl HostedZone {
    /// Create a zone, normalizing path-style ids
    #[must_use]
    pub fn new(id: &str, name: impl Into<String>) -> Self {
        Self {
            id: normalize_zone_id(id).to_string(),
            name: name.into(),
            private_zone: false,
            record_count: None,
        }
    }

    /// Zone name without the trailing root dot
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.trim_end_matches('.')
    }
}

/// Strip a resource-path prefix from a zone id.
///
/// `/hostedzone/Z0123` becomes `Z0123`; bare ids are returned as-is.
#[must_use]
pub fn normalize_zone_id(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
