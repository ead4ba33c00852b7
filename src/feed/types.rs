//! Feed state types

use crate::api::ProductQuery;
use crate::error::FetchFailure;
use crate::types::{default_sort, CategoryFilter, Product, SortField, SortOrder, SortSpec};
use serde::Serialize;

/// Filter and sort of the current query session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    /// Category filter
    pub category: CategoryFilter,
    /// Sort map
    pub sort: SortSpec,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            sort: default_sort(),
        }
    }
}

/// Load status of the feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum FeedStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The last request succeeded
    Loaded,
    /// The last request failed; stays until a retry or a new query
    Failed(FetchFailure),
}

impl FeedStatus {
    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure, if the last request failed
    pub fn error(&self) -> Option<&FetchFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Why a request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// First page after creation or reload
    Initial,
    /// Continuation of the current session
    NextPage,
    /// First page of a new filter or sort
    Reset,
}

/// A request issued by the feed, to be answered through `complete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Generation the request was issued under
    pub generation: u64,
    /// Why it was issued
    pub kind: RequestKind,
    /// The catalog query to send
    pub query: ProductQuery,
    /// Cursor before the request, restored if a next-page fetch fails
    pub previous_page: u32,
}

/// UI commands understood by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAction {
    /// Load the first page of the current query
    Initialize,
    /// Load the page after the current cursor
    NextPage,
    /// Switch category filter
    FilterByCategory(CategoryFilter),
    /// Merge a sort entry into the sort map
    SetSorting(SortField, SortOrder),
    /// Re-issue the request that failed
    Retry,
}

/// Read-only view of the feed for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSnapshot {
    pub products: Vec<Product>,
    pub page: u32,
    pub category: CategoryFilter,
    pub sort: SortSpec,
    pub loading: bool,
    pub error: Option<FetchFailure>,
    pub last: bool,
}
