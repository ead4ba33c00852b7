//! HTTP client module
//!
//! The transport used by the catalog and cart APIs.
//!
//! # Features
//!
//! - **Credential Header**: Every request carries the precomputed auth header
//! - **Status Mapping**: Non-2xx responses become `Error::HttpStatus`
//! - **Optional Retries**: Off by default; constant, linear or exponential backoff
//! - **Optional Rate Limiting**: Token bucket rate limiter using governor

mod client;
mod rate_limit;
mod retry;

pub use client::{HttpClient, TransportConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::RetryPolicy;
