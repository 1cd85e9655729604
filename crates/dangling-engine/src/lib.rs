//! Reconciliation engine for dangling DNS record detection.
//!
//! The [`Reconciler`] walks every hosted zone of a [`ZoneDirectory`],
//! classifies each record against an [`InventorySnapshot`] and folds the
//! per-zone results into a single [`RunSummary`]. Dangling findings are then
//! handed to the [`Notifier`].
//!
//! [`ZoneDirectory`]: dangling_core::ZoneDirectory
//! [`InventorySnapshot`]: dangling_core::InventorySnapshot
//! [`RunSummary`]: dangling_core::RunSummary

#![doc(html_root_url = "https://docs.rs/dangling-engine/0.3.0")]

mod cancel;
mod config;
mod driver;
mod notify;
mod report;

pub use cancel::CancelSignal;
pub use config::{InventoryScope, ScanConfig};
pub use driver::{Reconciler, RunState};
pub use notify::{NotifyOutcome, NotifyStats, Notifier};
pub use report::{ReportAggregator, ZoneReport};
