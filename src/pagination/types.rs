//! Pagination types
//!
//! Cursor bookkeeping shared by the paginator and the product feed.

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request this page index with this size
    Continue {
        /// Page index to request
        page: u32,
        /// Page size to request
        size: u32,
    },
    /// No more pages for the current query
    Done,
}

/// Tracks the cursor of one query session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Page index of the most recent request
    pub page: u32,
    /// Last page observed for this session
    pub last: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session at `start_page`
    pub fn reset(&mut self, start_page: u32) {
        *self = Self {
            page: start_page,
            ..Self::default()
        };
    }

    /// Move the cursor to `page`, returning the previous cursor
    pub fn advance_to(&mut self, page: u32) -> u32 {
        std::mem::replace(&mut self.page, page)
    }

    /// Restore the cursor after a failed request
    pub fn rollback_to(&mut self, page: u32) {
        self.page = page;
    }

    /// Record the `last` flag of a successfully applied page
    pub fn record_page(&mut self, last: bool) {
        self.last = last;
    }
}
