//! Storefront API transport
//!
//! The traits the feed and cart consume, and their REST implementation over
//! [`HttpClient`](crate::http::HttpClient).
//!
//! State machines depend on the traits only, so tests and alternative
//! backends can be injected without a network.

mod client;
mod query;

pub use client::StorefrontApi;
pub use query::ProductQuery;

use crate::error::Result;
use crate::types::{CartItem, CartItemId, ProductId, ProductPage};
use async_trait::async_trait;

/// Catalog query endpoint
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of products; non-2xx responses are errors
    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage>;
}

/// Cart endpoints
#[async_trait]
pub trait CartApi: Send + Sync {
    /// List the items currently in the cart
    async fn list_items(&self) -> Result<Vec<CartItem>>;

    /// Add one unit of a product
    async fn add_item(&self, product_id: ProductId) -> Result<()>;

    /// Remove a cart item by its cart item id
    async fn remove_item(&self, cart_item_id: CartItemId) -> Result<()>;
}
