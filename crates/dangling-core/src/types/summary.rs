use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finding::{Finding, Verdict};

/// A zone-scoped failure recorded during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneError {
    /// Zone the failure belongs to
    pub zone_id: String,

    /// What went wrong
    pub message: String,
}

/// Final result of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Zones whose processing was attempted
    pub zones_checked: usize,

    /// Records classified across all zones
    pub records_checked: usize,

    /// Findings in production order (listing order within a zone)
    pub findings: Vec<Finding>,

    /// Zone-scoped failures in production order
    pub errors: Vec<ZoneError>,

    /// Whether the run was cut short by cancellation or deadline
    pub cancelled: bool,

    /// Capture time of the oldest inventory snapshot the run classified against.
    ///
    /// Resources created after this instant are reported as dangling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_captured_at: Option<DateTime<Utc>>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Dangling findings only
    pub fn dangling(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_dangling())
    }

    /// Number of findings with the given verdict
    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.findings.iter().filter(|f| f.verdict == verdict).count()
    }

    /// Number of dangling findings
    #[must_use]
    pub fn dangling_count(&self) -> usize {
        self.count(Verdict::Dangling)
    }

    /// Number of live findings
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.count(Verdict::Live)
    }

    /// Number of indeterminate findings
    #[must_use]
    pub fn indeterminate_count(&self) -> usize {
        self.count(Verdict::Indeterminate)
    }

    /// Copy with zones in a stable order.
    ///
    /// Zones run concurrently, so raw order across zones is not reproducible.
    /// Only zones are reordered; within a zone, findings and errors keep the
    /// order they were produced in.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.findings
            .sort_by(|a, b| a.record.zone_id.cmp(&b.record.zone_id));
        self.errors.sort_by(|a, b| a.zone_id.cmp(&b.zone_id));
        self
    }
}
