// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Storefront Client
//!
//! A Rust client for a paginated storefront catalog API: an infinite-scroll
//! product feed with category filtering and sorting, plus a shopping cart.
//!
//! ## Features
//!
//! - **Product Feed**: Explicit `Idle | Loading | Loaded | Failed` state machine
//! - **Stale-Safe**: Request generations discard responses to superseded queries
//! - **Scroll Trigger**: Threshold-based next-page firing, gated on load state
//! - **Cart**: Add/remove/toggle with per-product pending state
//! - **HTTP**: Basic auth, optional retry with backoff and rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_client::{Category, ProductFeed, StorefrontApi, StorefrontConfig};
//!
//! #[tokio::main]
//! async fn main() -> storefront_client::Result<()> {
//!     let config = StorefrontConfig::from_file("storefront.yaml")?.with_env();
//!     let api = StorefrontApi::from_config(&config)?;
//!
//!     let mut feed = ProductFeed::start(api, config.paginator()?).await;
//!     feed.fetch_next_page().await;
//!     feed.filter_by_category(Category::Books).await;
//!
//!     for product in feed.products() {
//!         println!("{} {}", product.name, product.price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI / CLI commands                        │
//! │        FeedAction → ProductFeed       CartAction → CartStore    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────┬─────────────────────┐
//! │  Pagination  │      API (traits)         │       Config        │
//! ├──────────────┼───────────────────────────┼─────────────────────┤
//! │ Page number  │ CatalogApi  CartApi       │ YAML + env + flags  │
//! │ First page   │ StorefrontApi (REST)      │ Validation          │
//! └──────────────┴───────────────────────────┴─────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │              HTTP: Basic auth, retry, rate limit                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document wire-format struct fields

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page number pagination
pub mod pagination;

/// Client configuration
pub mod config;

/// Storefront API traits and REST implementation
pub mod api;

/// Product feed state machine and scroll trigger
pub mod feed;

/// Shopping cart
pub mod cart;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FailureKind, FetchFailure, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{CartApi, CatalogApi, ProductQuery, StorefrontApi};
pub use cart::{CartAction, CartStore};
pub use config::StorefrontConfig;
pub use feed::{FeedAction, FeedStatus, ProductFeed, ScrollTrigger};
pub use pagination::PageNumberPaginator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
