//! Cart types

use crate::error::FetchFailure;
use crate::types::{CartItem, CartItemId, ProductId};
use serde::Serialize;

/// UI commands understood by the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Reload the cart from the server
    Refresh,
    /// Add one unit of a product
    Add(ProductId),
    /// Remove a cart item
    Remove(CartItemId),
    /// Remove the product's cart item if present, add the product otherwise
    Toggle(ProductId),
}

/// A mutation issued by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartRequest {
    /// Add a product
    Add {
        /// Product to add
        product_id: ProductId,
    },
    /// Remove a cart item
    Remove {
        /// Cart item to delete
        cart_item_id: CartItemId,
        /// Product held by the item, when it is in the loaded cart
        product_id: Option<ProductId>,
    },
}

impl CartRequest {
    /// Product the request is pending for
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartRequest::Add { product_id } => Some(*product_id),
            CartRequest::Remove { product_id, .. } => *product_id,
        }
    }
}

/// Read-only view of the cart for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub count: usize,
    pub error: Option<FetchFailure>,
}
