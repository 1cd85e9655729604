//! Detect dangling DNS records that point at deleted cloud resources.
//!
//! A record is *dangling* when it still routes traffic to a load balancer or
//! instance address that no longer belongs to the account, which lets anyone
//! who later claims that resource take over the name.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dangling::{CloudClient, ScanConfig};
//!
//! #[tokio::main]
//! async fn main() -> dangling::Result<()> {
//!     let client = CloudClient::builder("https://gateway.example.com/v1")
//!         .api_token("your-token")
//!         .build()?;
//!
//!     let config = ScanConfig::new()
//!         .concurrency(8)
//!         .notify_endpoint("https://hooks.example.com/services/T000/B000/XXXX");
//!
//!     let summary = dangling::reconciler(client, config)?.run().await?;
//!     for finding in summary.dangling() {
//!         println!("{}", finding.alert_message());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/dangling/0.3.0")]

use std::sync::Arc;

// Re-export core types
pub use dangling_core::*;

// Re-export clients
pub use dangling_client::{CloudClient, CloudClientBuilder, RateLimit, RetryConfig, WebhookSink};

// Re-export engine
pub use dangling_engine::{
    CancelSignal, InventoryScope, NotifyOutcome, NotifyStats, Notifier, Reconciler, ReportAggregator,
    RunState, ScanConfig, ZoneReport,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;

/// Wire a [`Reconciler`] to a gateway client.
///
/// The client serves as both zone directory and inventory source. When
/// `config.notify_endpoint` is set, dangling findings are posted to it
/// through a [`WebhookSink`] using `config.timeout`.
pub fn reconciler(client: CloudClient, config: ScanConfig) -> Result<Reconciler> {
    let notifier = match &config.notify_endpoint {
        Some(endpoint) => {
            Notifier::new(Arc::new(WebhookSink::with_timeout(endpoint, config.timeout)?))
        }
        None => Notifier::disabled(),
    };

    let client = Arc::new(client);
    Ok(Reconciler::new(client.clone(), client, config).with_notifier(notifier))
}
