//! Chat webhook alert sink.

use async_trait::async_trait;
use dangling_core::{AlertSink, DanglingError, Result};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts alert messages to an incoming-webhook endpoint as `{"text": ...}`
#[derive(Clone)]
pub struct WebhookSink {
    http: HttpClient,
    endpoint: Url,
}

impl WebhookSink {
    /// Create a sink posting to `endpoint`
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a sink with a custom request timeout
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| DanglingError::InvalidUrl(format!("{endpoint}: {e}")))?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DanglingError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, endpoint })
    }

    /// Webhook endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl AlertSink for WebhookSink {
    async fn send(&self, message: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&serde_json::json!({ "text": message }))
            .send()
            .await
            .map_err(|e| DanglingError::NotificationFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DanglingError::NotificationFailed(format!(
                "webhook returned {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        debug!(endpoint = %self.endpoint, "alert delivered");
        Ok(())
    }
}
