//! Main cloud gateway client implementation.

use crate::api::{InventoryApi, ZonesApi};
use crate::config::{RateLimit, RetryConfig};
use dangling_core::{DanglingError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::RETRY_AFTER;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Client for the cloud gateway exposing DNS zones and the resource inventory.
///
/// Cheap to clone; clones share the HTTP connection pool and the rate limiter.
#[derive(Clone)]
pub struct CloudClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    api_token: Option<String>,
    retry_config: RetryConfig,
    rate_limiter: DirectRateLimiter,
}

impl CloudClient {
    /// Create a new client for `base_url` using default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        CloudClientBuilder::new(base_url).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> CloudClientBuilder {
        CloudClientBuilder::new(base_url)
    }

    /// Access hosted zone and record set endpoints
    #[must_use]
    pub const fn zones(&self) -> ZonesApi<'_> {
        ZonesApi::new(self)
    }

    /// Access load balancer and instance endpoints
    #[must_use]
    pub const fn inventory(&self) -> InventoryApi<'_> {
        InventoryApi::new(self)
    }

    /// Gateway base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Perform a GET request, retrying transient failures with backoff
    #[instrument(level = "debug", skip(self, params))]
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let retry = &self.inner.retry_config;
        let mut attempt = 0;

        loop {
            match self.get_once(path, params).await {
                Ok(value) => return Ok(value),
                Err(err) if retry.should_retry(&err, attempt) => {
                    let mut backoff = retry.backoff_for(attempt);
                    if let DanglingError::RateLimited {
                        retry_after: Some(secs),
                    } = &err
                    {
                        backoff = backoff.max(Duration::from_secs(*secs)).min(retry.max_backoff);
                    }

                    warn!(
                        path,
                        attempt = attempt + 1,
                        backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.build_url(path, params)?;

        self.inner.rate_limiter.until_ready().await;
        debug!(url = %url, "GET request");

        let mut request = self.inner.http.get(url);
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Build a URL relative to the gateway base with query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DanglingError::InvalidUrl(format!("{path}: {e}")))?;

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(transport_error)?;
            serde_json::from_str(&body).map_err(DanglingError::Json)
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a `DanglingError`
    async fn handle_error<T>(&self, status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();

        // Gateways report either {"error": ...} or {"message": ...}
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(|e| e.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);

        match status {
            401 | 403 => Err(DanglingError::Unauthorized),
            404 => Err(DanglingError::NotFound { resource: message }),
            429 => {
                warn!(retry_after = ?retry_after, "rate limited by cloud API");
                Err(DanglingError::RateLimited { retry_after })
            }
            _ => Err(DanglingError::Api {
                code: status,
                message,
            }),
        }
    }
}

fn transport_error(err: reqwest::Error) -> DanglingError {
    if err.is_timeout() {
        DanglingError::Timeout(err.to_string())
    } else if err.is_connect() {
        DanglingError::Connection(err.to_string())
    } else {
        DanglingError::Http(err.to_string())
    }
}

/// Builder for configuring a [`CloudClient`]
pub struct CloudClientBuilder {
    base_url: String,
    api_token: Option<String>,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
    rate_limit: RateLimit,
}

impl CloudClientBuilder {
    /// Create a new builder for the gateway at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("dangling-dns/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
            rate_limit: RateLimit::default(),
        }
    }

    /// Set the bearer token sent with every request
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub const fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set the client-side rate limit
    #[must_use]
    pub const fn rate_limit(mut self, limit: RateLimit) -> Self {
        self.rate_limit = limit;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CloudClient> {
        let mut base_url = Url::parse(&self.base_url)
            .map_err(|e| DanglingError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| DanglingError::Config(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_second(
            NonZeroU32::new(self.rate_limit.requests_per_second).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(self.rate_limit.burst).unwrap_or(NonZeroU32::MIN));

        Ok(CloudClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                api_token: self.api_token,
                retry_config: self.retry_config,
                rate_limiter: RateLimiter::direct(quota),
            }),
        })
    }
}
