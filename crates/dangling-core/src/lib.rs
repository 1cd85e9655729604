//! Core types and traits for dangling DNS record detection.
//!
//! This crate provides the foundational pieces shared by the client, engine
//! and CLI crates:
//!
//! - **Types**: hosted zones, DNS records, inventory snapshots, findings and
//!   the run summary
//! - **Errors**: the [`DanglingError`] taxonomy
//! - **Traits**: the collaborator seams ([`ZoneDirectory`], [`InventorySource`],
//!   [`AlertSink`]) the reconciliation engine consumes
//! - **Classification**: [`classify`], the pure record-versus-inventory check
//!
//! # Example
//!
//! ```rust
//! use dangling_core::{classify, DnsRecord, InventorySnapshot, Verdict};
//!
//! let record = DnsRecord::a("Z1", "www.example.com.", ["10.0.0.5"]);
//! let inventory = InventorySnapshot::new(Vec::<String>::new(), ["10.0.0.9"]);
//!
//! let findings = classify(&record, &inventory);
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].verdict, Verdict::Dangling);
//! assert_eq!(findings[0].dangling_value(), Some("10.0.0.5"));
//! ```

#![doc(html_root_url = "https://docs.rs/dangling-core/0.3.0")]

mod classify;
mod error;
mod traits;
pub mod types;

pub use classify::{classify, is_load_balancer_name, LOAD_BALANCER_SUFFIXES};
pub use error::{DanglingError, Result};
pub use traits::{AlertSink, InventorySource, RecordStream, ZoneDirectory};
pub use types::*;
