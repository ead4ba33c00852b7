//! Authenticator implementation
//!
//! Resolves an `AuthConfig` into a single header once and applies it to
//! outgoing requests.

use super::types::AuthConfig;
use crate::error::{Error, Result};
use base64::Engine as _;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

/// Build a `Basic` credential from a user identifier and secret
pub fn generate_basic_token(username: &str, password: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

/// Authenticator holding a precomputed `Authorization` value
#[derive(Clone)]
pub struct Authenticator {
    /// `None` for unauthenticated clients
    header: Option<HeaderValue>,
}

impl Authenticator {
    /// Resolve the credential header for the given config
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let header = match config {
            AuthConfig::None => None,
            AuthConfig::Basic { username, password } => {
                Some(sensitive(generate_basic_token(username, password))?)
            }
        };
        Ok(Self { header })
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.header {
            Some(value) => req.header(AUTHORIZATION, value.clone()),
            None => req,
        }
    }

    /// The resolved `Authorization` value, if any
    pub fn header(&self) -> Option<&HeaderValue> {
        self.header.as_ref()
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("authenticated", &self.header.is_some())
            .finish()
    }
}

fn sensitive(value: String) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(&value)
        .map_err(|e| Error::invalid_value("auth", format!("not a valid header value: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}
