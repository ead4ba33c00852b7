//! Cart store implementation

use super::types::{CartAction, CartRequest, CartSnapshot};
use crate::api::CartApi;
use crate::error::{FetchFailure, Result};
use crate::types::{CartItem, CartItemId, ProductId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Shopping cart state over an injected [`CartApi`].
///
/// Errors are captured into `error`, never returned. A product with a
/// mutation in flight is pending; further mutations for it are ignored until
/// the first one completes.
pub struct CartStore<A> {
    api: A,
    items: Vec<CartItem>,
    pending: HashSet<ProductId>,
    error: Option<FetchFailure>,
}

impl<A: CartApi> CartStore<A> {
    /// Create an empty store; nothing is requested until `refresh`
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            pending: HashSet::new(),
            error: None,
        }
    }

    /// Create the store and load the cart
    pub async fn load(api: A) -> Self {
        let mut store = Self::new(api);
        store.refresh().await;
        store
    }

    // ========================================================================
    // Async operations
    // ========================================================================

    /// Reload the cart from the server; keeps the old items on failure
    pub async fn refresh(&mut self) {
        match self.api.list_items().await {
            Ok(items) => {
                debug!(count = items.len(), "Cart refreshed");
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "Cart refresh failed");
                self.error = Some(FetchFailure::from(&err));
            }
        }
    }

    /// Add one unit of a product
    pub async fn add(&mut self, product_id: ProductId) {
        if let Some(request) = self.begin_add(product_id) {
            self.run(request).await;
        }
    }

    /// Remove a cart item
    pub async fn remove(&mut self, cart_item_id: CartItemId) {
        if let Some(request) = self.begin_remove(cart_item_id) {
            self.run(request).await;
        }
    }

    /// Remove the product if it is in the cart, add it otherwise
    pub async fn toggle(&mut self, product_id: ProductId) {
        if let Some(request) = self.begin_toggle(product_id) {
            self.run(request).await;
        }
    }

    /// Apply a UI command
    pub async fn dispatch(&mut self, action: CartAction) {
        match action {
            CartAction::Refresh => self.refresh().await,
            CartAction::Add(product_id) => self.add(product_id).await,
            CartAction::Remove(cart_item_id) => self.remove(cart_item_id).await,
            CartAction::Toggle(product_id) => self.toggle(product_id).await,
        }
    }

    async fn run(&mut self, request: CartRequest) {
        let result = match request {
            CartRequest::Add { product_id } => self.api.add_item(product_id).await,
            CartRequest::Remove { cart_item_id, .. } => self.api.remove_item(cart_item_id).await,
        };
        if self.complete(request, result) {
            self.refresh().await;
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Mark the product pending and return the add request
    pub fn begin_add(&mut self, product_id: ProductId) -> Option<CartRequest> {
        if !self.pending.insert(product_id) {
            debug!(product_id, "Add ignored: product pending");
            return None;
        }
        Some(CartRequest::Add { product_id })
    }

    /// Mark the item's product pending and return the remove request
    pub fn begin_remove(&mut self, cart_item_id: CartItemId) -> Option<CartRequest> {
        let product_id = self
            .items
            .iter()
            .find(|item| item.id == cart_item_id)
            .map(|item| item.product.id);

        if let Some(product_id) = product_id {
            if !self.pending.insert(product_id) {
                debug!(cart_item_id, product_id, "Remove ignored: product pending");
                return None;
            }
        }
        Some(CartRequest::Remove {
            cart_item_id,
            product_id,
        })
    }

    /// Remove when the product has a cart item, add otherwise
    pub fn begin_toggle(&mut self, product_id: ProductId) -> Option<CartRequest> {
        match self.cart_item_for(product_id).map(|item| item.id) {
            Some(cart_item_id) => self.begin_remove(cart_item_id),
            None => self.begin_add(product_id),
        }
    }

    /// Reconcile a mutation. Returns whether it succeeded and the cart
    /// should be refreshed.
    pub fn complete(&mut self, request: CartRequest, result: Result<()>) -> bool {
        if let Some(product_id) = request.product_id() {
            self.pending.remove(&product_id);
        }
        match result {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(err) => {
                warn!(?request, error = %err, "Cart update failed");
                self.error = Some(FetchFailure::from(&err));
                false
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Items as last read from the server
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The cart item holding a product, if any
    pub fn cart_item_for(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    /// Whether a product is in the cart
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.cart_item_for(product_id).is_some()
    }

    /// Number of items in the cart
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether a mutation for the product is in flight
    pub fn is_pending(&self, product_id: ProductId) -> bool {
        self.pending.contains(&product_id)
    }

    /// The last failure, cleared by the next successful request
    pub fn error(&self) -> Option<&FetchFailure> {
        self.error.as_ref()
    }

    /// The injected cart API
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the state for rendering
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            count: self.count(),
            error: self.error.clone(),
        }
    }
}

impl<A> std::fmt::Debug for CartStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items.len())
            .field("pending", &self.pending)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
