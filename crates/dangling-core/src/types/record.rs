use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker carried by dual-stack load balancer alias targets
pub const DUALSTACK_MARKER: &str = "dualstack.";

/// DNS record type, as far as dangling detection cares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// Canonical name record
    Cname,
    /// Alias to a named cloud resource
    Alias,
    /// Any other type (MX, TXT, NS, ...), kept verbatim
    Other(String),
}

impl RecordType {
    /// Record type as written in zone listings
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Cname => "CNAME",
            Self::Alias => "ALIAS",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "CNAME" => Self::Cname,
            "ALIAS" => Self::Alias,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target of an alias record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    /// DNS name of the aliased resource
    pub dns_name: String,

    /// Whether the target is a dual-stack load balancer name
    pub is_dualstack: bool,
}

impl AliasTarget {
    /// Create an alias target, deriving the dual-stack flag from the name
    #[must_use]
    pub fn new(dns_name: impl Into<String>) -> Self {
        let dns_name = dns_name.into();
        let is_dualstack = has_dualstack_marker(&dns_name);
        Self {
            dns_name,
            is_dualstack,
        }
    }
}

/// True if the name carries the dual-stack load balancer marker
#[must_use]
pub fn has_dualstack_marker(dns_name: &str) -> bool {
    dns_name.to_ascii_lowercase().contains(DUALSTACK_MARKER)
}

/// One record set as listed by the DNS directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Zone the record belongs to
    pub zone_id: String,

    /// Fully qualified record name
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Resource record values (IP addresses or DNS targets), in listing order
    #[serde(default)]
    pub values: Vec<String>,

    /// Alias target, for alias records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,
}

impl DnsRecord {
    /// Create a record with literal values
    #[must_use]
    pub fn new<I, S>(
        zone_id: impl Into<String>,
        name: impl Into<String>,
        record_type: RecordType,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            zone_id: zone_id.into(),
            name: name.into(),
            record_type,
            values: values.into_iter().map(Into::into).collect(),
            alias_target: None,
        }
    }

    /// Create an A record
    #[must_use]
    pub fn a<I, S>(zone_id: impl Into<String>, name: impl Into<String>, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(zone_id, name, RecordType::A, ips)
    }

    /// Create a CNAME record
    #[must_use]
    pub fn cname<I, S>(zone_id: impl Into<String>, name: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(zone_id, name, RecordType::Cname, targets)
    }

    /// Create an alias record pointing at `dns_name`
    #[must_use]
    pub fn alias(
        zone_id: impl Into<String>,
        name: impl Into<String>,
        dns_name: impl Into<String>,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            name: name.into(),
            record_type: RecordType::Alias,
            values: Vec::new(),
            alias_target: Some(AliasTarget::new(dns_name)),
        }
    }

    /// Record name without the trailing root dot
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.trim_end_matches('.')
    }
}
