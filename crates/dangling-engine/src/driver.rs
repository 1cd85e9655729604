//! Reconciliation driver.

use crate::cancel::CancelSignal;
use crate::config::{InventoryScope, ScanConfig};
use crate::notify::Notifier;
use crate::report::{ReportAggregator, ZoneReport};
use dangling_core::{
    classify, DanglingError, HostedZone, InventorySnapshot, InventorySource, Result, RunSummary,
    Verdict, ZoneDirectory,
};
use futures_util::{future, stream, StreamExt};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Phase of a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not started
    Idle,
    /// Listing hosted zones
    EnumeratingZones,
    /// Fetching and classifying records, zones in parallel
    ReconcilingZones,
    /// Building the summary
    Aggregating,
    /// Sending alerts for dangling findings
    Notifying,
    /// Finished
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::EnumeratingZones => "enumerating-zones",
            Self::ReconcilingZones => "reconciling-zones",
            Self::Aggregating => "aggregating",
            Self::Notifying => "notifying",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!(from = %state, to = %next, "run state");
    *state = next;
}

/// Cross-references DNS records against live resources.
///
/// Collaborators are injected once and reused across runs.
pub struct Reconciler {
    directory: Arc<dyn ZoneDirectory>,
    inventory: Arc<dyn InventorySource>,
    notifier: Notifier,
    config: ScanConfig,
}

impl Reconciler {
    /// Create a reconciler without notifications
    #[must_use]
    pub fn new(
        directory: Arc<dyn ZoneDirectory>,
        inventory: Arc<dyn InventorySource>,
        config: ScanConfig,
    ) -> Self {
        Self {
            directory,
            inventory,
            notifier: Notifier::disabled(),
            config,
        }
    }

    /// Send alerts for dangling findings through `notifier`
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Run configuration
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run to completion (or until the configured deadline)
    pub async fn run(&self) -> Result<RunSummary> {
        self.run_with_cancel(CancelSignal::new()).await
    }

    /// Run until done or until `cancel` fires.
    ///
    /// Cancellation stops new zones from starting; zones already running stop
    /// at the next record and keep what they found. An inventory fetch or an
    /// alert still in flight is abandoned. The only error is
    /// [`DanglingError::FatalDirectoryFailure`].
    pub async fn run_with_cancel(&self, cancel: CancelSignal) -> Result<RunSummary> {
        let mut state = RunState::Idle;
        let deadline = self.config.deadline.map(|d| cancel.cancel_after(d));
        let mut aggregator = ReportAggregator::new();

        advance(&mut state, RunState::EnumeratingZones);
        let listed = match self.directory.list_zones().await {
            Ok(zones) => zones,
            Err(err) => {
                if let Some(handle) = deadline {
                    handle.abort();
                }
                warn!(error = %err, "hosted zone enumeration failed");
                return Err(DanglingError::FatalDirectoryFailure(err.to_string()));
            }
        };

        let total = listed.len();
        let zones: Vec<HostedZone> = listed.into_iter().filter(|z| self.config.accepts(z)).collect();
        info!(zones = zones.len(), skipped = total - zones.len(), "reconciling hosted zones");

        // A cancelled fetch leaves `shared` empty, and no zone starts after cancellation
        let shared = match self.config.inventory_scope {
            InventoryScope::PerRun => tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                snapshot = self.load_inventory() => Some(Arc::new(snapshot)),
            },
            InventoryScope::PerZone => None,
        };

        advance(&mut state, RunState::ReconcilingZones);
        let mut reports = stream::iter(zones)
            .take_while(|_| future::ready(!cancel.is_cancelled()))
            .map(|zone| self.process_zone(zone, shared.clone(), &cancel))
            .buffer_unordered(self.config.concurrency.max(1));

        while let Some(report) = reports.next().await {
            aggregator.absorb(report);
        }
        drop(reports);

        advance(&mut state, RunState::Aggregating);
        let summary = aggregator.finish(cancel.is_cancelled());

        info!(
            zones = summary.zones_checked,
            records = summary.records_checked,
            dangling = summary.dangling_count(),
            indeterminate = summary.indeterminate_count(),
            errors = summary.errors.len(),
            cancelled = summary.cancelled,
            "reconciliation finished"
        );

        if self.notifier.is_enabled() && summary.dangling_count() > 0 {
            advance(&mut state, RunState::Notifying);
            let stats = self.notifier.notify_all(summary.dangling(), &cancel).await;
            info!(delivered = stats.delivered, failed = stats.failed, "alerts sent");
        }

        if let Some(handle) = deadline {
            handle.abort();
        }

        advance(&mut state, RunState::Done);
        Ok(summary)
    }

    /// Capture a snapshot, degrading to an all-unavailable one on failure
    async fn load_inventory(&self) -> InventorySnapshot {
        match self.inventory.fetch_inventory().await {
            Ok(snapshot) => {
                debug!(
                    load_balancers = snapshot.load_balancer_dns_names().len(),
                    instance_ips = snapshot.instance_private_ips().len(),
                    captured_at = %snapshot.captured_at(),
                    "inventory captured"
                );
                snapshot
            }
            Err(err) => {
                warn!(error = %err, "resource inventory unavailable");
                InventorySnapshot::unavailable(err.to_string())
            }
        }
    }

    async fn process_zone(
        &self,
        zone: HostedZone,
        shared: Option<Arc<InventorySnapshot>>,
        cancel: &CancelSignal,
    ) -> ZoneReport {
        let mut report = ZoneReport::new(&zone.id);

        let inventory = match shared {
            Some(snapshot) => snapshot,
            None => tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    report.interrupted = true;
                    return report;
                }
                snapshot = self.load_inventory() => Arc::new(snapshot),
            },
        };
        report.inventory_captured_at = Some(inventory.captured_at());
        for (dimension, message) in inventory.unavailable_dimensions() {
            report.push_error(format!("inventory unavailable ({dimension}): {message}"));
        }

        debug!(zone_id = %zone.id, zone = zone.display_name(), "fetching records");
        let mut records = self.directory.list_records(&zone.id);

        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    report.interrupted = true;
                    break;
                }
                next = records.next() => next,
            };

            match next {
                Some(Ok(record)) => {
                    report.records_checked += 1;
                    report.findings.extend(classify(&record, &inventory));
                }
                Some(Err(err)) => {
                    warn!(zone_id = %zone.id, error = %err, "record listing failed");
                    report.push_error(err.to_string());
                    break;
                }
                None => break,
            }
        }

        info!(
            zone_id = %zone.id,
            zone = zone.display_name(),
            records = report.records_checked,
            dangling = report.count(Verdict::Dangling),
            interrupted = report.interrupted,
            "zone reconciled"
        );
        report
    }
}
