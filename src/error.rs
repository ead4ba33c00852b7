//! Error types for the storefront client
//!
//! This module defines the error hierarchy for the whole crate.
//! Transport and configuration APIs return `Result<T, Error>`; the feed and
//! cart state machines never return errors and instead capture them as a
//! cloneable [`FetchFailure`].

use serde::Serialize;
use thiserror::Error;

/// The main error type for the storefront client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Whether sending the same request again may succeed.
    ///
    /// Connection failures, timeouts, 429 and 5xx gateway statuses qualify;
    /// a response that arrived but failed to decode does not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Classify the error for state reporting.
    ///
    /// A response with a non-success status is an `HttpStatusFailure`;
    /// everything else that prevented a usable response is a `NetworkFailure`.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::HttpStatus { .. } | Error::RateLimited { .. } => FailureKind::HttpStatusFailure,
            Error::Http(e) if e.status().is_some() => FailureKind::HttpStatusFailure,
            _ => FailureKind::NetworkFailure,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the storefront client
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Captured failures
// ============================================================================

/// The two ways a request can fail, as seen by state machines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request could not complete (connect, timeout, decode)
    NetworkFailure,
    /// A response arrived with a non-2xx status
    HttpStatusFailure,
}

/// A failed request captured into state.
///
/// `Error` wraps non-cloneable transport errors, so state holds this
/// flattened copy instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct FetchFailure {
    /// Failure classification
    pub kind: FailureKind,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Rendered error message
    pub message: String,
}

impl FetchFailure {
    /// Create a network failure
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::NetworkFailure,
            status: None,
            message: message.into(),
        }
    }

    /// Create a status failure
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::HttpStatusFailure,
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<&Error> for FetchFailure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.failure_kind(),
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl From<Error> for FetchFailure {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
