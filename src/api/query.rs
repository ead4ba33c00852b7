//! Catalog query parameters

use crate::types::{CategoryFilter, QueryParams, SortSpec};
use serde::Serialize;

/// One catalog request: page coordinates plus the query state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    /// Zero-based page index
    pub page: u32,
    /// Items per page
    pub size: u32,
    /// Category filter; omitted from the request when `All`
    pub category: CategoryFilter,
    /// Sort map
    pub sort: SortSpec,
}

impl ProductQuery {
    /// Query parameters in request order
    ///
    /// `page`, `size`, then `category` if filtered, then one
    /// `sortBy`/`sortDirection` pair per sort entry.
    pub fn to_params(&self) -> QueryParams {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];

        if let Some(category) = self.category.category() {
            params.push(("category".to_string(), category.to_string()));
        }

        for (field, order) in &self.sort {
            params.push(("sortBy".to_string(), field.to_string()));
            params.push(("sortDirection".to_string(), order.to_string()));
        }

        params
    }
}
