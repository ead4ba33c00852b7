//! Page number paginator
//!
//! Computes page sizes and cursor steps for `?page=N&size=M` APIs.

use super::types::{NextPage, PaginationState};
use crate::error::{Error, Result};

/// Default size of the first page of a query
pub const DEFAULT_FIRST_PAGE_SIZE: u32 = 20;

/// Default size of every later page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page number pagination with a distinct first page
///
/// Common patterns:
/// - `?page=0&size=20` then `?page=1&size=20`
/// - `?page=0&size=20` then `?page=5&size=4` (first page spans five steady pages)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumberPaginator {
    /// First page index
    pub start_page: u32,
    /// Size of the first page
    pub first_page_size: u32,
    /// Size of every later page
    pub page_size: u32,
}

impl Default for PageNumberPaginator {
    fn default() -> Self {
        Self {
            start_page: 0,
            first_page_size: DEFAULT_FIRST_PAGE_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageNumberPaginator {
    /// Create a paginator; `first_page_size` must be a positive multiple of `page_size`
    pub fn new(first_page_size: u32, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value(
                "pagination.page_size",
                "must be greater than zero",
            ));
        }
        if first_page_size == 0 || first_page_size % page_size != 0 {
            return Err(Error::invalid_value(
                "pagination.first_page_size",
                format!("must be a positive multiple of page_size ({page_size})"),
            ));
        }

        Ok(Self {
            first_page_size,
            page_size,
            ..Self::default()
        })
    }

    /// Size requested for a page index
    pub fn size_for(&self, page: u32) -> u32 {
        if page == self.start_page {
            self.first_page_size
        } else {
            self.page_size
        }
    }

    /// Cursor increment from `page` to the page after it
    pub fn step_after(&self, page: u32) -> u32 {
        if page == self.start_page {
            self.first_page_size / self.page_size
        } else {
            1
        }
    }

    /// The request following the state's current cursor
    pub fn next(&self, state: &PaginationState) -> NextPage {
        if state.last {
            return NextPage::Done;
        }
        let page = state.page.saturating_add(self.step_after(state.page));
        NextPage::Continue {
            page,
            size: self.size_for(page),
        }
    }
}
