//! Alert dispatch for dangling findings.

use crate::cancel::CancelSignal;
use dangling_core::{AlertSink, Finding};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a single notification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The sink accepted the alert
    Delivered,
    /// Nothing was sent (no sink, or the finding is not dangling)
    Skipped,
    /// The sink rejected the alert or could not be reached
    Failed,
}

/// Tally of outcomes over a batch of findings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyStats {
    /// Alerts accepted by the sink
    pub delivered: usize,
    /// Findings not sent
    pub skipped: usize,
    /// Alerts that failed
    pub failed: usize,
}

impl NotifyStats {
    fn record(&mut self, outcome: NotifyOutcome) {
        match outcome {
            NotifyOutcome::Delivered => self.delivered += 1,
            NotifyOutcome::Skipped => self.skipped += 1,
            NotifyOutcome::Failed => self.failed += 1,
        }
    }
}

/// Sends dangling findings to an optional [`AlertSink`]
#[derive(Clone, Default)]
pub struct Notifier {
    sink: Option<Arc<dyn AlertSink>>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Notifier {
    /// Notifier that skips every finding
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Notifier delivering to `sink`
    #[must_use]
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Whether a sink is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Deliver one finding. Failures are logged, never returned.
    pub async fn notify(&self, finding: &Finding) -> NotifyOutcome {
        let Some(sink) = &self.sink else {
            return NotifyOutcome::Skipped;
        };
        if !finding.is_dangling() {
            return NotifyOutcome::Skipped;
        }

        let message = finding.alert_message();
        match sink.send(&message).await {
            Ok(()) => {
                debug!(record = %finding.record.name, "alert delivered");
                NotifyOutcome::Delivered
            }
            Err(err) => {
                warn!(record = %finding.record.name, error = %err, "failed to deliver alert");
                NotifyOutcome::Failed
            }
        }
    }

    /// Deliver findings one after another, in order.
    ///
    /// Stops once `cancel` fires: an alert in flight is abandoned and later
    /// findings are not sent.
    pub async fn notify_all<'a, I>(&self, findings: I, cancel: &CancelSignal) -> NotifyStats
    where
        I: IntoIterator<Item = &'a Finding>,
    {
        let mut stats = NotifyStats::default();
        for finding in findings {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!(delivered = stats.delivered, "alert delivery cancelled");
                    break;
                }
                outcome = self.notify(finding) => outcome,
            };
            stats.record(outcome);
        }
        stats
    }
}
