//! Per-zone results and their accumulation into a run summary.

use chrono::{DateTime, Utc};
use dangling_core::{Finding, RunSummary, Verdict, ZoneError};

/// Everything one zone produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReport {
    /// Zone the report belongs to
    pub zone_id: String,

    /// Records pulled from the listing and classified
    pub records_checked: usize,

    /// Findings in listing order
    pub findings: Vec<Finding>,

    /// Failures scoped to this zone
    pub errors: Vec<ZoneError>,

    /// Processing stopped early on cancellation
    pub interrupted: bool,

    /// When the inventory used for this zone was captured
    pub inventory_captured_at: Option<DateTime<Utc>>,
}

impl ZoneReport {
    /// Empty report for `zone_id`
    #[must_use]
    pub fn new(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            records_checked: 0,
            findings: Vec::new(),
            errors: Vec::new(),
            interrupted: false,
            inventory_captured_at: None,
        }
    }

    /// Record a zone-scoped failure
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(ZoneError {
            zone_id: self.zone_id.clone(),
            message: message.into(),
        });
    }

    /// Number of findings with the given verdict
    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.findings.iter().filter(|f| f.verdict == verdict).count()
    }
}

/// Folds zone reports into a [`RunSummary`], keeping arrival order
#[derive(Debug)]
pub struct ReportAggregator {
    zones_checked: usize,
    records_checked: usize,
    findings: Vec<Finding>,
    errors: Vec<ZoneError>,
    inventory_captured_at: Option<DateTime<Utc>>,
    started_at: DateTime<Utc>,
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportAggregator {
    /// Start aggregating; the run's start time is taken now
    #[must_use]
    pub fn new() -> Self {
        Self {
            zones_checked: 0,
            records_checked: 0,
            findings: Vec::new(),
            errors: Vec::new(),
            inventory_captured_at: None,
            started_at: Utc::now(),
        }
    }

    /// Append one zone's results
    pub fn absorb(&mut self, report: ZoneReport) {
        self.zones_checked += 1;
        self.records_checked += report.records_checked;
        self.findings.extend(report.findings);
        self.errors.extend(report.errors);
        self.inventory_captured_at =
            match (self.inventory_captured_at, report.inventory_captured_at) {
                (Some(seen), Some(at)) => Some(seen.min(at)),
                (seen, at) => seen.or(at),
            };
    }

    /// Freeze the accumulated results
    #[must_use]
    pub fn finish(self, cancelled: bool) -> RunSummary {
        RunSummary {
            zones_checked: self.zones_checked,
            records_checked: self.records_checked,
            findings: self.findings,
            errors: self.errors,
            cancelled,
            inventory_captured_at: self.inventory_captured_at,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}
