//! Client configuration
//!
//! `StorefrontConfig` is loaded from YAML, optionally overridden from the
//! environment, validated, and then turned into the runtime pieces: the
//! HTTP client, the paginator and the scroll trigger.

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, RateLimiterConfig, RetryPolicy, TransportConfig};
use crate::pagination::{PageNumberPaginator, DEFAULT_FIRST_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "STOREFRONT_BASE_URL";
/// Environment variable holding the user identifier for Basic auth
pub const ENV_USER_ID: &str = "STOREFRONT_USER_ID";
/// Environment variable holding the secret for Basic auth
pub const ENV_PASSWORD: &str = "STOREFRONT_PASSWORD";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Base URL of the storefront API
    #[serde(default)]
    pub base_url: String,

    /// Credential attached to every request
    #[serde(default)]
    pub auth: AuthConfig,

    /// Endpoint paths relative to `base_url`
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Page sizes
    #[serde(default)]
    pub pagination: PaginationSettings,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Scroll trigger configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl StorefrontConfig {
    /// Create a config for a base URL with all defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to load config '{}'", path.display()))
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored. A user id and password together replace
    /// the configured auth with Basic credentials.
    #[must_use]
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).none_if_empty() {
            debug!("base_url overridden from {}", ENV_BASE_URL);
            self.base_url = base_url;
        }

        let user = lookup(ENV_USER_ID).none_if_empty();
        let password = lookup(ENV_PASSWORD).none_if_empty();
        if let (Some(user), Some(password)) = (user, password) {
            debug!("Basic credentials taken from environment");
            self.auth = AuthConfig::basic(user, password);
        }

        self
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        self.paginator()?;

        if !(self.scroll.threshold > 0.0 && self.scroll.threshold <= 1.0) {
            return Err(Error::invalid_value(
                "scroll.threshold",
                "must be in (0, 1]",
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Paginator for the configured page sizes
    pub fn paginator(&self) -> Result<PageNumberPaginator> {
        PageNumberPaginator::new(self.pagination.first_page_size, self.pagination.page_size)
    }

    /// Transport settings for the HTTP client
    pub fn transport_config(&self) -> TransportConfig {
        let http = &self.http;
        let mut transport = TransportConfig::new(self.base_url.clone());
        transport.timeout = Duration::from_secs(http.timeout_seconds);
        transport.retry = RetryPolicy::new(
            http.max_retries,
            http.retry_backoff.backoff_type,
            Duration::from_millis(http.retry_backoff.initial_ms),
            Duration::from_millis(http.retry_backoff.max_ms),
        );
        transport.rate_limit = http.rate_limit;
        transport.headers.clone_from(&http.headers);
        transport
    }

    /// Validate and build the HTTP client.
    ///
    /// The credential header is computed here, once.
    pub fn build_client(&self) -> Result<HttpClient> {
        self.validate()?;
        HttpClient::new(self.transport_config(), &self.auth)
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// Endpoint paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Catalog query path
    #[serde(default = "default_products_path")]
    pub products: String,

    /// Cart item collection path
    #[serde(default = "default_cart_items_path")]
    pub cart_items: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            products: default_products_path(),
            cart_items: default_cart_items_path(),
        }
    }
}

fn default_products_path() -> String {
    "/products".to_string()
}

fn default_cart_items_path() -> String {
    "/cart-items".to_string()
}

// ============================================================================
// Pagination
// ============================================================================

/// Page size settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Size of the first page of each query
    #[serde(default = "default_first_page_size")]
    pub first_page_size: u32,

    /// Size of every later page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            first_page_size: default_first_page_size(),
            page_size: default_page_size(),
        }
    }
}

fn default_first_page_size() -> u32 {
    DEFAULT_FIRST_PAGE_SIZE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries; failures surface immediately by default
    #[serde(default)]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client-side rate limit, off when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers for every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: 0,
            retry_backoff: BackoffConfig::default(),
            rate_limit: None,
            headers: HashMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    10_000
}

// ============================================================================
// Scroll
// ============================================================================

/// Scroll trigger configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Visible fraction of the sentinel that fires the trigger
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 {
    0.8
}
