//! HTTP clients for the cloud gateway used by dangling DNS detection.
//!
//! This crate provides [`CloudClient`], which implements the
//! [`ZoneDirectory`](dangling_core::ZoneDirectory) and
//! [`InventorySource`](dangling_core::InventorySource) traits, and
//! [`WebhookSink`], the reference [`AlertSink`](dangling_core::AlertSink).

#![doc(html_root_url = "https://docs.rs/dangling-client/0.3.0")]

mod client;
mod config;
mod webhook;
pub mod api;

pub use client::{CloudClient, CloudClientBuilder};
pub use config::*;
pub use dangling_core::{DanglingError, Result};
pub use webhook::WebhookSink;
