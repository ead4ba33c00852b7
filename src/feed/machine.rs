//! Pagination/filter state machine

use super::types::{FeedAction, FeedSnapshot, FeedStatus, PageRequest, QueryState, RequestKind};
use crate::api::{CatalogApi, ProductQuery};
use crate::error::{FetchFailure, Result};
use crate::pagination::{NextPage, PageNumberPaginator, PaginationState};
use crate::types::{CategoryFilter, Product, ProductPage, SortField, SortOrder};
use tracing::{debug, info, warn};

/// Paged product list for one query at a time.
///
/// `products` is always a fully loaded prefix of pages for the current
/// `QueryState`. Errors are captured into `status`, never returned.
pub struct ProductFeed<C> {
    api: C,
    paginator: PageNumberPaginator,
    pagination: PaginationState,
    products: Vec<Product>,
    query: QueryState,
    status: FeedStatus,
    generation: u64,
    failed_kind: Option<RequestKind>,
}

impl<C: CatalogApi> ProductFeed<C> {
    /// Create an idle feed; nothing is requested until `initialize`
    pub fn new(api: C, paginator: PageNumberPaginator) -> Self {
        Self {
            api,
            paginator,
            pagination: PaginationState::new(),
            products: Vec::new(),
            query: QueryState::default(),
            status: FeedStatus::Idle,
            generation: 0,
            failed_kind: None,
        }
    }

    /// Start from a query other than the default
    #[must_use]
    pub fn with_query(mut self, query: QueryState) -> Self {
        self.query = query;
        self
    }

    /// Create the feed and load its first page
    pub async fn start(api: C, paginator: PageNumberPaginator) -> Self {
        let mut feed = Self::new(api, paginator);
        feed.initialize().await;
        feed
    }

    // ========================================================================
    // Async operations
    // ========================================================================

    /// Load the first page of the current query
    pub async fn initialize(&mut self) {
        let request = self.begin_initialize();
        self.run(request).await;
    }

    /// Load the next page; no-op while loading, failed, or after the last page
    pub async fn fetch_next_page(&mut self) {
        if let Some(request) = self.begin_next_page() {
            self.run(request).await;
        }
    }

    /// Switch category; no-op when already selected
    pub async fn filter_by_category(&mut self, category: impl Into<CategoryFilter>) {
        if let Some(request) = self.begin_filter_by_category(category.into()) {
            self.run(request).await;
        }
    }

    /// Merge `field → order` into the sort map; no-op when already set
    pub async fn set_sorting(&mut self, field: SortField, order: SortOrder) {
        if let Some(request) = self.begin_set_sorting(field, order) {
            self.run(request).await;
        }
    }

    /// Re-issue the failed request; no-op unless failed
    pub async fn retry(&mut self) {
        if let Some(request) = self.begin_retry() {
            self.run(request).await;
        }
    }

    /// Apply a UI command
    pub async fn dispatch(&mut self, action: FeedAction) {
        let request = self.begin(action);
        if let Some(request) = request {
            self.run(request).await;
        }
    }

    async fn run(&mut self, request: PageRequest) {
        let result = self.api.fetch_products(&request.query).await;
        self.complete(request, result);
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Transition for a command, returning the request to issue
    pub fn begin(&mut self, action: FeedAction) -> Option<PageRequest> {
        match action {
            FeedAction::Initialize => Some(self.begin_initialize()),
            FeedAction::NextPage => self.begin_next_page(),
            FeedAction::FilterByCategory(category) => self.begin_filter_by_category(category),
            FeedAction::SetSorting(field, order) => self.begin_set_sorting(field, order),
            FeedAction::Retry => self.begin_retry(),
        }
    }

    /// Clear the list and request the first page of the current query
    pub fn begin_initialize(&mut self) -> PageRequest {
        self.restart(RequestKind::Initial)
    }

    /// Request the page after the cursor, if allowed
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        match self.status {
            FeedStatus::Idle => return Some(self.begin_initialize()),
            FeedStatus::Loading => {
                debug!("Next page ignored: request in flight");
                return None;
            }
            FeedStatus::Failed(_) => {
                debug!("Next page ignored: last request failed");
                return None;
            }
            FeedStatus::Loaded => {}
        }
        self.advance()
    }

    /// Switch category and restart from the first page
    pub fn begin_filter_by_category(&mut self, category: CategoryFilter) -> Option<PageRequest> {
        if self.query.category == category {
            debug!(%category, "Category unchanged");
            return None;
        }
        info!(from = %self.query.category, to = %category, "Filtering by category");
        self.query.category = category;
        Some(self.restart(RequestKind::Reset))
    }

    /// Merge a sort entry and restart from the first page
    pub fn begin_set_sorting(&mut self, field: SortField, order: SortOrder) -> Option<PageRequest> {
        if self.query.sort.get(&field) == Some(&order) {
            debug!(%field, %order, "Sort unchanged");
            return None;
        }
        info!(%field, %order, "Sorting");
        self.query.sort.insert(field, order);
        Some(self.restart(RequestKind::Reset))
    }

    /// Re-issue the request that failed
    pub fn begin_retry(&mut self) -> Option<PageRequest> {
        if !matches!(self.status, FeedStatus::Failed(_)) {
            return None;
        }
        match self.failed_kind.take() {
            Some(RequestKind::NextPage) => {
                self.status = FeedStatus::Loaded;
                self.advance()
            }
            Some(kind) => Some(self.restart(kind)),
            None => Some(self.restart(RequestKind::Initial)),
        }
    }

    /// Reconcile a response. Returns whether it was applied.
    ///
    /// Responses to requests from an older generation are dropped, and so
    /// is a second response for a request that was already reconciled.
    pub fn complete(&mut self, request: PageRequest, result: Result<ProductPage>) -> bool {
        if request.generation != self.generation {
            debug!(
                stale = request.generation,
                current = self.generation,
                "Discarding stale response"
            );
            return false;
        }
        if !self.status.is_loading() {
            debug!(
                generation = request.generation,
                "Discarding response: no request in flight"
            );
            return false;
        }

        match result {
            Ok(page) => {
                let count = page.content.len();
                self.products.extend(page.content);
                self.pagination.record_page(page.last);
                self.status = FeedStatus::Loaded;
                self.failed_kind = None;
                debug!(
                    page = request.query.page,
                    count,
                    total = self.products.len(),
                    last = page.last,
                    "Page applied"
                );
            }
            Err(err) => {
                warn!(page = request.query.page, error = %err, "Product fetch failed");
                if request.kind == RequestKind::NextPage {
                    self.pagination.rollback_to(request.previous_page);
                }
                self.status = FeedStatus::Failed(FetchFailure::from(&err));
                self.failed_kind = Some(request.kind);
            }
        }
        true
    }

    fn restart(&mut self, kind: RequestKind) -> PageRequest {
        self.pagination.reset(self.paginator.start_page);
        self.products.clear();
        self.failed_kind = None;
        let page = self.paginator.start_page;
        self.issue(kind, page, self.paginator.first_page_size, page)
    }

    fn advance(&mut self) -> Option<PageRequest> {
        match self.paginator.next(&self.pagination) {
            NextPage::Done => {
                debug!("Next page ignored: last page reached");
                None
            }
            NextPage::Continue { page, size } => {
                let previous = self.pagination.advance_to(page);
                Some(self.issue(RequestKind::NextPage, page, size, previous))
            }
        }
    }

    fn issue(&mut self, kind: RequestKind, page: u32, size: u32, previous_page: u32) -> PageRequest {
        self.generation += 1;
        self.status = FeedStatus::Loading;
        PageRequest {
            generation: self.generation,
            kind,
            query: ProductQuery {
                page,
                size,
                category: self.query.category,
                sort: self.query.sort.clone(),
            },
            previous_page,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Loaded products, in arrival order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Current page cursor
    pub fn page(&self) -> u32 {
        self.pagination.page
    }

    /// Current filter and sort
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Current category filter
    pub fn category(&self) -> CategoryFilter {
        self.query.category
    }

    /// Current status
    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    /// Whether a request is in flight
    pub fn loading(&self) -> bool {
        self.status.is_loading()
    }

    /// The last failure, if the feed is failed
    pub fn error(&self) -> Option<&FetchFailure> {
        self.status.error()
    }

    /// Whether the last page of the current query has been loaded
    pub fn is_last(&self) -> bool {
        self.pagination.last
    }

    /// Generation of the most recently issued request
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The injected catalog API
    pub fn api(&self) -> &C {
        &self.api
    }

    /// Copy of the state for rendering
    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            products: self.products.clone(),
            page: self.page(),
            category: self.query.category,
            sort: self.query.sort.clone(),
            loading: self.loading(),
            error: self.error().cloned(),
            last: self.is_last(),
        }
    }
}

impl<C> std::fmt::Debug for ProductFeed<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductFeed")
            .field("page", &self.pagination.page)
            .field("products", &self.products.len())
            .field("query", &self.query)
            .field("status", &self.status)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
