//! REST implementation of the storefront API

use super::{CartApi, CatalogApi, ProductQuery};
use crate::config::{EndpointsConfig, StorefrontConfig};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{
    AddCartItemRequest, CartItem, CartItemId, CartItemsResponse, ProductId, ProductPage,
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Storefront REST API
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: HttpClient,
    endpoints: EndpointsConfig,
}

impl StorefrontApi {
    /// Create an API over an existing client
    pub fn new(client: HttpClient, endpoints: EndpointsConfig) -> Self {
        Self { client, endpoints }
    }

    /// Validate the config and build the API with its client
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        let client = config.build_client()?;
        debug!(
            base_url = %client.base_url(),
            authenticated = client.has_authenticator(),
            rate_limited = client.has_rate_limiter(),
            "Built storefront client"
        );
        Ok(Self::new(client, config.endpoints.clone()))
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    fn cart_item_path(&self, cart_item_id: CartItemId) -> String {
        format!(
            "{}/{}",
            self.endpoints.cart_items.trim_end_matches('/'),
            cart_item_id
        )
    }
}

#[async_trait]
impl CatalogApi for StorefrontApi {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        debug!(
            page = query.page,
            size = query.size,
            category = %query.category,
            "Fetching products"
        );
        let page: ProductPage = self
            .client
            .get_json(&self.endpoints.products, &query.to_params())
            .await?;
        debug!(count = page.content.len(), last = page.last, "Fetched products");
        Ok(page)
    }
}

#[async_trait]
impl CartApi for StorefrontApi {
    async fn list_items(&self) -> Result<Vec<CartItem>> {
        let response: CartItemsResponse = self
            .client
            .get_json(&self.endpoints.cart_items, &[])
            .await?;
        Ok(response.content)
    }

    async fn add_item(&self, product_id: ProductId) -> Result<()> {
        self.client
            .post_json(
                &self.endpoints.cart_items,
                &AddCartItemRequest::single(product_id),
            )
            .await?;
        info!(product_id, "Added product to cart");
        Ok(())
    }

    async fn remove_item(&self, cart_item_id: CartItemId) -> Result<()> {
        self.client.delete(&self.cart_item_path(cart_item_id)).await?;
        info!(cart_item_id, "Removed cart item");
        Ok(())
    }
}
