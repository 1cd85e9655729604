use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::DnsRecord;

/// Outcome of checking one record value against the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The value resolves to a live resource
    Live,
    /// The value points at a resource that no longer exists
    Dangling,
    /// The value could not be checked
    Indeterminate,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Dangling => write!(f, "dangling"),
            Self::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Classification of a single record value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The record the value belongs to
    pub record: DnsRecord,

    /// Verdict for the value
    pub verdict: Verdict,

    /// The IP or DNS name that was examined, if any
    pub value: Option<String>,

    /// Human-readable explanation
    pub reason: String,
}

impl Finding {
    /// A value that resolves to a live resource
    #[must_use]
    pub fn live(record: &DnsRecord, value: &str, reason: impl Into<String>) -> Self {
        Self::with_verdict(record, Verdict::Live, Some(value.to_string()), reason)
    }

    /// A value with no backing resource
    #[must_use]
    pub fn dangling(record: &DnsRecord, value: &str, reason: impl Into<String>) -> Self {
        Self::with_verdict(record, Verdict::Dangling, Some(value.to_string()), reason)
    }

    /// A record or value that could not be checked
    #[must_use]
    pub fn indeterminate(record: &DnsRecord, value: Option<&str>, reason: impl Into<String>) -> Self {
        Self::with_verdict(record, Verdict::Indeterminate, value.map(str::to_string), reason)
    }

    fn with_verdict(
        record: &DnsRecord,
        verdict: Verdict,
        value: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            record: record.clone(),
            verdict,
            value,
            reason: reason.into(),
        }
    }

    /// The value that failed to resolve to a live resource
    #[must_use]
    pub fn dangling_value(&self) -> Option<&str> {
        match self.verdict {
            Verdict::Dangling => self.value.as_deref(),
            _ => None,
        }
    }

    /// True if this finding reports a dangling record
    #[must_use]
    pub fn is_dangling(&self) -> bool {
        self.verdict == Verdict::Dangling
    }

    /// Alert text for a dangling finding
    #[must_use]
    pub fn alert_message(&self) -> String {
        format!(
            "Dangling {} Record Detected: {} -> {}",
            self.record.record_type,
            self.record.display_name(),
            self.value.as_deref().unwrap_or("<none>")
        )
    }
}
