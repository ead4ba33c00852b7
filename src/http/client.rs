//! Storefront HTTP transport
//!
//! One `reqwest::Client` per API. The base URL, default headers and the
//! credential header are fixed when it is built. Endpoint paths are joined
//! onto the base URL segment by segment, so a base with a path prefix such
//! as `https://shop.example.com/api` keeps its prefix.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::retry::RetryPolicy;
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Fallback wait when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Settings for building an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry policy, none by default
    pub retry: RetryPolicy,
    /// Client-side rate limit, off when `None`
    pub rate_limit: Option<RateLimiterConfig>,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl TransportConfig {
    /// Defaults for a base URL: 30s timeout, no retries, no rate limit
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::none(),
            rate_limit: None,
            headers: HashMap::new(),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

/// Transport for the catalog and cart endpoints
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    retry: RetryPolicy,
    credential: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Build the client; the credential header is computed here, once
    pub fn new(config: TransportConfig, auth: &AuthConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                "must be a hierarchical http(s) URL",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .default_headers(header_map(&config.headers)?)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
            retry: config.retry,
            credential: Authenticator::new(auth)?,
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
        })
    }

    /// Base URL endpoints are joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Retry policy in effect
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Whether requests carry a credential
    pub fn has_authenticator(&self) -> bool {
        self.credential.header().is_some()
    }

    /// Whether client-side rate limiting is on
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Absolute URL for an endpoint path plus query pairs in order
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "cannot carry a path"))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET an endpoint and decode its JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.endpoint(path, query)?;
        let response = self.execute(Method::GET, url, None).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body; the response body is ignored
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.endpoint(path, &[])?;
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, url, Some(&body)).await?;
        Ok(())
    }

    /// DELETE an endpoint
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.endpoint(path, &[])?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn execute(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let err = match self.send_once(&method, &url, body).await {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };
            let Some(delay) = self.retry.delay_after(&err, attempt) else {
                return Err(err);
            };
            attempt += 1;
            warn!(
                %method,
                %url,
                attempt,
                max_retries = self.retry.max_retries,
                ?delay,
                error = %err,
                "Retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(&self, method: &Method, url: &Url, body: Option<&Value>) -> Result<Response> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.wait().await;
        }

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        request = self.credential.apply(request);

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        debug!(%method, %url, status = status.as_u16(), "Request failed");
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                retry_after_seconds: retry_after(&response),
            });
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::http_status(status.as_u16(), body))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(err)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("credential", &self.credential)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::invalid_value("http.headers", format!("'{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::invalid_value("http.headers", format!("'{name}': {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Seconds from a `Retry-After` header in delta-seconds form
fn retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
