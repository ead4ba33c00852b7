//! Cart module
//!
//! Cart contents plus the add/remove/toggle commands the catalog UI issues.
//!
//! # Overview
//!
//! The cart module provides:
//! - `CartStore` - cart items, per-product pending set, last failure
//! - `CartAction` - command entry point for UI events
//! - `CartRequest` - a mutation issued by the store, answered through `complete`
//!
//! The store re-reads the cart from the server after every successful
//! mutation rather than patching its local copy.

mod store;
mod types;

pub use store::CartStore;
pub use types::{CartAction, CartRequest, CartSnapshot};
