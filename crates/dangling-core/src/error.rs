use thiserror::Error;

/// Result type alias for dangling DNS operations
pub type Result<T> = std::result::Result<T, DanglingError>;

/// Errors that can occur while reconciling DNS records against the inventory
#[derive(Error, Debug)]
pub enum DanglingError {
    /// Record listing for a zone failed after retries (zone-scoped)
    #[error("DNS directory unavailable for zone {zone_id}: {message}")]
    DirectoryUnavailable {
        /// Zone whose listing failed
        zone_id: String,
        /// Underlying failure
        message: String,
    },

    /// Resource inventory could not be fetched
    #[error("resource inventory unavailable: {message}")]
    InventoryUnavailable {
        /// Underlying failure
        message: String,
    },

    /// Hosted zone enumeration failed; nothing can be reconciled
    #[error("DNS directory service unreachable: {0}")]
    FatalDirectoryFailure(String),

    /// Alert delivery failed
    #[error("notification failed: {0}")]
    NotificationFailed(String),

    /// Authentication against the cloud API failed
    #[error("authentication failed: invalid or missing API token")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl DanglingError {
    /// Wrap a failure as a zone-scoped directory error
    pub fn directory(zone_id: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::DirectoryUnavailable {
            zone_id: zone_id.into(),
            message: source.to_string(),
        }
    }

    /// Wrap a failure as an inventory error
    pub fn inventory(source: impl std::fmt::Display) -> Self {
        Self::InventoryUnavailable {
            message: source.to_string(),
        }
    }

    /// Returns true if the error is transient and the request may be retried
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_) => true,
            Self::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }

    /// Returns true if this error must abort the whole run
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalDirectoryFailure(_))
    }
}
