//! Pagination module
//!
//! Page-number pagination with a distinct first-page size.
//!
//! # Overview
//!
//! The catalog is addressed by a zero-based page index in units of the
//! steady-state page size. The first page of a query may be larger than the
//! rest; the first step after it skips the indices it already covered so the
//! loaded items stay contiguous.

mod paginator;
mod types;

pub use paginator::{PageNumberPaginator, DEFAULT_FIRST_PAGE_SIZE, DEFAULT_PAGE_SIZE};
pub use types::{NextPage, PaginationState};
