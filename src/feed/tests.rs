//! Tests for the product feed

use super::*;
use crate::api::{CatalogApi, ProductQuery};
use crate::error::{Error, FailureKind, Result};
use crate::pagination::PageNumberPaginator;
use crate::types::{Category, CategoryFilter, Product, ProductPage, SortField, SortOrder};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use test_case::test_case;

// ============================================================================
// In-memory catalog
// ============================================================================

struct FakeCatalog {
    products: Vec<Product>,
    failures_remaining: AtomicUsize,
    requests: Mutex<Vec<ProductQuery>>,
}

impl FakeCatalog {
    fn with_products(count: u64) -> Self {
        let products = (0..count)
            .map(|i| Product {
                id: i + 1,
                name: format!("Product {}", i + 1),
                price: (i * 37 % 100) * 100,
                image_url: format!("https://img.example.com/{}.png", i + 1),
                category: Category::ALL[(i % 6) as usize],
            })
            .collect();

        Self {
            products,
            failures_remaining: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn fail_next(&self, count: usize) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> ProductQuery {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    fn answer(&self, query: &ProductQuery) -> ProductPage {
        let mut matching: Vec<Product> = self
            .products
            .iter()
            .filter(|p| query.category.matches(p))
            .cloned()
            .collect();

        if let Some(order) = query.sort.get(&SortField::Price) {
            matching.sort_by_key(|p| p.price);
            if *order == SortOrder::Desc {
                matching.reverse();
            }
        }

        let start = (query.page * query.size) as usize;
        let end = (start + query.size as usize).min(matching.len());
        let content = matching.get(start..end).map(<[Product]>::to_vec).unwrap_or_default();

        ProductPage {
            content,
            last: end >= matching.len(),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        self.requests.lock().unwrap().push(query.clone());

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(Error::http_status(500, "Internal Server Error"));
        }

        Ok(self.answer(query))
    }
}

fn feed_of(count: u64) -> ProductFeed<FakeCatalog> {
    ProductFeed::new(FakeCatalog::with_products(count), PageNumberPaginator::default())
}

// ============================================================================
// Initial load
// ============================================================================

#[tokio::test]
async fn test_initial_load_yields_first_page() {
    let mut feed = feed_of(97);
    feed.initialize().await;

    assert_eq!(feed.products().len(), 20);
    assert_eq!(feed.page(), 0);
    assert!(!feed.loading());
    assert!(feed.error().is_none());
    assert_eq!(feed.status(), &FeedStatus::Loaded);
    assert!(!feed.is_last());
}

#[tokio::test]
async fn test_start_issues_default_query() {
    let feed = ProductFeed::start(
        FakeCatalog::with_products(50),
        PageNumberPaginator::default(),
    )
    .await;

    let request = feed.api().last_request();
    assert_eq!(request.page, 0);
    assert_eq!(request.size, 20);
    assert_eq!(request.category, CategoryFilter::All);
    assert_eq!(request.sort.get(&SortField::Price), Some(&SortOrder::Asc));
}

#[test]
fn test_loading_is_set_while_initial_request_is_pending() {
    let mut feed = feed_of(97);
    let request = feed.begin_initialize();

    assert!(feed.loading());
    assert!(feed.error().is_none());
    assert_eq!(request.kind, RequestKind::Initial);
    assert_eq!(request.query.page, 0);
}

#[tokio::test]
async fn test_initial_load_failure_leaves_list_empty() {
    let mut feed = feed_of(97);
    feed.api().fail_next(1);
    feed.initialize().await;

    assert!(feed.products().is_empty());
    assert!(!feed.loading());
    let error = feed.error().unwrap();
    assert_eq!(error.kind, FailureKind::HttpStatusFailure);
    assert_eq!(error.status, Some(500));
    assert_eq!(feed.page(), 0);
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_pages_through_97_products() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    assert_eq!(feed.products().len(), 20);
    assert_eq!(feed.page(), 0);

    feed.fetch_next_page().await;
    assert_eq!(feed.products().len(), 40);
    assert_eq!(feed.page(), 1);

    for _ in 0..3 {
        feed.fetch_next_page().await;
    }
    assert_eq!(feed.products().len(), 97);
    assert_eq!(feed.page(), 4);
    assert!(feed.is_last());

    let requests = feed.api().request_count();
    for _ in 0..5 {
        feed.fetch_next_page().await;
    }
    assert_eq!(feed.products().len(), 97);
    assert_eq!(feed.page(), 4);
    assert_eq!(feed.api().request_count(), requests);
}

#[tokio::test]
async fn test_products_keep_arrival_order_without_duplicates() {
    let mut feed = feed_of(60);
    feed.initialize().await;
    feed.fetch_next_page().await;
    feed.fetch_next_page().await;

    let ids: Vec<u64> = feed.products().iter().map(|p| p.id).collect();
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 60);
    assert_eq!(unique.len(), 60);

    let prices: Vec<u64> = feed.products().iter().map(|p| p.price).collect();
    let mut sorted = prices.clone();
    sorted.sort_unstable();
    assert_eq!(prices, sorted);
}

#[tokio::test]
async fn test_large_first_page_then_small_steps() {
    let mut feed = ProductFeed::new(
        FakeCatalog::with_products(30),
        PageNumberPaginator::new(20, 4).unwrap(),
    );
    feed.initialize().await;
    assert_eq!(feed.products().len(), 20);

    feed.fetch_next_page().await;
    assert_eq!(feed.page(), 5);
    assert_eq!(feed.products().len(), 24);
    let request = feed.api().last_request();
    assert_eq!((request.page, request.size), (5, 4));

    feed.fetch_next_page().await;
    assert_eq!(feed.page(), 6);
    assert_eq!(feed.products().len(), 28);

    let unique: HashSet<u64> = feed.products().iter().map(|p| p.id).collect();
    assert_eq!(unique.len(), 28);
}

#[test]
fn test_next_page_ignored_while_loading() {
    let mut feed = feed_of(97);
    let _pending = feed.begin_initialize();

    assert!(feed.begin_next_page().is_none());
    assert!(feed.loading());
}

#[tokio::test]
async fn test_next_page_before_initialize_loads_first_page() {
    let mut feed = feed_of(97);
    feed.fetch_next_page().await;

    assert_eq!(feed.products().len(), 20);
    assert_eq!(feed.page(), 0);
}

#[tokio::test]
async fn test_failed_next_page_rolls_back_cursor() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.fetch_next_page().await;
    assert_eq!(feed.page(), 1);

    feed.api().fail_next(1);
    feed.fetch_next_page().await;

    assert_eq!(feed.page(), 1);
    assert_eq!(feed.products().len(), 40);
    assert!(!feed.loading());
    assert!(feed.error().is_some());
}

#[tokio::test]
async fn test_failed_state_blocks_next_page() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.api().fail_next(1);
    feed.fetch_next_page().await;

    let requests = feed.api().request_count();
    feed.fetch_next_page().await;

    assert_eq!(feed.api().request_count(), requests);
    assert_eq!(feed.products().len(), 20);
}

#[tokio::test]
async fn test_retry_after_failed_next_page() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.api().fail_next(1);
    feed.fetch_next_page().await;
    assert!(feed.error().is_some());

    feed.retry().await;

    assert!(feed.error().is_none());
    assert_eq!(feed.page(), 1);
    assert_eq!(feed.products().len(), 40);
}

#[tokio::test]
async fn test_retry_after_failed_initial_load() {
    let mut feed = feed_of(97);
    feed.api().fail_next(1);
    feed.initialize().await;

    feed.dispatch(FeedAction::Retry).await;

    assert_eq!(feed.products().len(), 20);
    assert_eq!(feed.status(), &FeedStatus::Loaded);
}

#[tokio::test]
async fn test_retry_is_noop_when_not_failed() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    let requests = feed.api().request_count();

    feed.retry().await;

    assert_eq!(feed.api().request_count(), requests);
}

// ============================================================================
// Filtering and sorting
// ============================================================================

#[test_case(Category::Fashion)]
#[test_case(Category::Beverage)]
#[test_case(Category::Books)]
#[test_case(Category::Electronics)]
#[test_case(Category::Fitness)]
#[test_case(Category::Kitchen)]
#[tokio::test]
async fn test_filter_by_category_only_returns_category(category: Category) {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.fetch_next_page().await;
    assert!(!feed.products().iter().all(|p| p.category == category));

    feed.filter_by_category(category).await;

    assert!(!feed.products().is_empty());
    assert!(feed.products().iter().all(|p| p.category == category));
    assert_eq!(feed.page(), 0);
    assert_eq!(feed.category(), CategoryFilter::Only(category));
}

#[tokio::test]
async fn test_filter_with_current_category_is_noop() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.filter_by_category(Category::Books).await;
    let before = feed.snapshot();
    let requests = feed.api().request_count();

    feed.filter_by_category(Category::Books).await;

    assert_eq!(feed.api().request_count(), requests);
    assert_eq!(feed.snapshot(), before);
}

#[tokio::test]
async fn test_filter_rearms_pagination_after_last() {
    let mut feed = feed_of(30);
    feed.initialize().await;
    feed.fetch_next_page().await;
    assert!(feed.is_last());

    feed.filter_by_category(CategoryFilter::Only(Category::Fashion))
        .await;
    assert!(feed.is_last());

    feed.filter_by_category(CategoryFilter::All).await;
    assert!(!feed.is_last());
    assert_eq!(feed.products().len(), 20);

    feed.fetch_next_page().await;
    assert_eq!(feed.products().len(), 30);
}

#[tokio::test]
async fn test_filter_clears_error() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.api().fail_next(1);
    feed.fetch_next_page().await;
    assert!(feed.error().is_some());

    feed.filter_by_category(Category::Kitchen).await;

    assert!(feed.error().is_none());
    assert!(feed.products().iter().all(|p| p.category == Category::Kitchen));
}

#[test]
fn test_filter_resets_synchronously() {
    let mut feed = feed_of(97);
    let first = feed.begin_initialize();
    let page = FakeCatalog::with_products(97).answer(&first.query);
    feed.complete(first, Ok(page));
    assert_eq!(feed.products().len(), 20);

    let request = feed
        .begin_filter_by_category(CategoryFilter::Only(Category::Books))
        .unwrap();

    assert!(feed.products().is_empty());
    assert!(feed.loading());
    assert_eq!(feed.page(), 0);
    assert_eq!(request.kind, RequestKind::Reset);
    assert_eq!(request.query.category, CategoryFilter::Only(Category::Books));
}

#[tokio::test]
async fn test_set_sorting_descending() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.fetch_next_page().await;

    feed.set_sorting(SortField::Price, SortOrder::Desc).await;

    assert_eq!(feed.page(), 0);
    assert_eq!(feed.products().len(), 20);
    let prices: Vec<u64> = feed.products().iter().map(|p| p.price).collect();
    let mut sorted = prices.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(prices, sorted);
}

#[tokio::test]
async fn test_set_sorting_rearms_pagination_after_last() {
    let mut feed = feed_of(30);
    feed.initialize().await;
    feed.fetch_next_page().await;
    assert!(feed.is_last());
    assert_eq!(feed.page(), 1);

    feed.set_sorting(SortField::Price, SortOrder::Desc).await;

    assert_eq!(feed.page(), 0);
    assert!(!feed.is_last());
    assert_eq!(feed.products().len(), 20);

    let requests = feed.api().request_count();
    feed.fetch_next_page().await;
    assert_eq!(feed.api().request_count(), requests + 1);
    assert_eq!(feed.products().len(), 30);
    assert!(feed.is_last());
}

#[tokio::test]
async fn test_set_sorting_merges_fields() {
    let mut feed = feed_of(97);
    feed.initialize().await;

    feed.dispatch(FeedAction::SetSorting(SortField::Name, SortOrder::Desc))
        .await;

    let sort = &feed.query().sort;
    assert_eq!(sort.get(&SortField::Price), Some(&SortOrder::Asc));
    assert_eq!(sort.get(&SortField::Name), Some(&SortOrder::Desc));
}

#[tokio::test]
async fn test_set_sorting_unchanged_is_noop() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    let requests = feed.api().request_count();

    feed.set_sorting(SortField::Price, SortOrder::Asc).await;

    assert_eq!(feed.api().request_count(), requests);
}

#[tokio::test]
async fn test_filter_failure_leaves_list_empty() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    feed.api().fail_next(1);

    feed.filter_by_category(Category::Fitness).await;

    assert!(feed.products().is_empty());
    assert_eq!(feed.page(), 0);
    assert!(feed.error().is_some());
    assert_eq!(feed.category(), CategoryFilter::Only(Category::Fitness));
}

// ============================================================================
// Stale responses
// ============================================================================

#[test]
fn test_stale_page_discarded_after_filter_change() {
    let catalog = FakeCatalog::with_products(97);
    let mut feed = feed_of(97);

    let first = feed.begin_initialize();
    let page = catalog.answer(&first.query);
    assert!(feed.complete(first, Ok(page)));

    let slow = feed.begin_next_page().unwrap();
    let fresh = feed
        .begin_filter_by_category(CategoryFilter::Only(Category::Books))
        .unwrap();
    assert!(fresh.generation > slow.generation);

    let fresh_page = catalog.answer(&fresh.query);
    assert!(feed.complete(fresh, Ok(fresh_page)));

    let stale_page = catalog.answer(&slow.query);
    assert!(!feed.complete(slow, Ok(stale_page)));

    assert!(feed.products().iter().all(|p| p.category == Category::Books));
    assert_eq!(feed.page(), 0);
}

#[test]
fn test_completing_same_request_twice_applies_once() {
    let catalog = FakeCatalog::with_products(97);
    let mut feed = feed_of(97);

    let request = feed.begin_initialize();
    let page = catalog.answer(&request.query);
    assert!(feed.complete(request.clone(), Ok(page.clone())));
    assert!(!feed.complete(request, Ok(page)));

    assert_eq!(feed.products().len(), 20);
    assert!(!feed.loading());
}

#[test]
fn test_late_failure_after_success_is_ignored() {
    let catalog = FakeCatalog::with_products(97);
    let mut feed = feed_of(97);

    let first = feed.begin_initialize();
    let page = catalog.answer(&first.query);
    feed.complete(first, Ok(page));

    let next = feed.begin_next_page().unwrap();
    let page = catalog.answer(&next.query);
    assert!(feed.complete(next.clone(), Ok(page)));
    assert!(!feed.complete(next, Err(Error::http_status(503, ""))));

    assert_eq!(feed.page(), 1);
    assert_eq!(feed.products().len(), 40);
    assert!(feed.error().is_none());
}

#[test]
fn test_stale_failure_does_not_roll_back_new_session() {
    let catalog = FakeCatalog::with_products(97);
    let mut feed = feed_of(97);

    let first = feed.begin_initialize();
    let page = catalog.answer(&first.query);
    feed.complete(first, Ok(page));

    let slow = feed.begin_next_page().unwrap();
    let fresh = feed.begin_set_sorting(SortField::Price, SortOrder::Desc).unwrap();

    assert!(!feed.complete(slow, Err(Error::http_status(503, ""))));
    assert!(feed.loading());
    assert!(feed.error().is_none());

    let fresh_page = catalog.answer(&fresh.query);
    feed.complete(fresh, Ok(fresh_page));
    assert_eq!(feed.products().len(), 20);
}

// ============================================================================
// Snapshot and status
// ============================================================================

#[tokio::test]
async fn test_snapshot_serializes() {
    let mut feed = feed_of(3);
    feed.initialize().await;

    let json = serde_json::to_value(feed.snapshot()).unwrap();
    assert_eq!(json["products"].as_array().unwrap().len(), 3);
    assert_eq!(json["last"], true);
    assert_eq!(json["category"], "");
    assert_eq!(json["sort"]["price"], "asc");
}

#[test]
fn test_status_accessors() {
    assert!(FeedStatus::Loading.is_loading());
    assert!(FeedStatus::Idle.error().is_none());
    let failed = FeedStatus::Failed(crate::error::FetchFailure::network("offline"));
    assert!(!failed.is_loading());
    assert_eq!(failed.error().unwrap().message, "offline");
}

// ============================================================================
// Scroll trigger
// ============================================================================

#[test]
fn test_trigger_fires_once_per_crossing() {
    let mut trigger = ScrollTrigger::new(0.8);

    assert!(!trigger.observe(0.5, false, false));
    assert!(trigger.observe(0.9, false, false));
    assert!(!trigger.observe(1.0, false, false));

    assert!(!trigger.observe(0.1, false, false));
    assert!(trigger.observe(0.85, false, false));
}

#[test_case(f64::NAN ; "nan")]
#[test_case(f64::INFINITY ; "infinity")]
#[test_case(f64::NEG_INFINITY ; "negative infinity")]
fn test_trigger_non_finite_threshold_uses_default(threshold: f64) {
    let mut trigger = ScrollTrigger::new(threshold);
    assert_eq!(trigger.threshold(), 0.8);
    assert!(!trigger.observe(0.0, false, false));
    assert!(trigger.observe(0.9, false, false));
}

#[test]
fn test_trigger_threshold_clamped() {
    assert_eq!(ScrollTrigger::new(1.7).threshold(), 1.0);
    assert_eq!(ScrollTrigger::new(-0.3).threshold(), 0.0);
}

#[test]
fn test_trigger_gated_by_loading_and_error() {
    let mut trigger = ScrollTrigger::default();

    assert!(!trigger.observe(1.0, true, false));
    assert!(!trigger.observe(1.0, false, true));
    assert!(trigger.is_armed());
}

#[test]
fn test_trigger_rearms_when_gates_clear() {
    let mut trigger = ScrollTrigger::new(0.8);

    assert!(trigger.observe(1.0, false, false));
    assert!(!trigger.observe(1.0, true, false));
    assert!(trigger.observe(1.0, false, false));
}

#[tokio::test]
async fn test_trigger_drives_feed_until_last() {
    let mut feed = feed_of(97);
    feed.initialize().await;
    let mut trigger = ScrollTrigger::new(0.8);

    for _ in 0..10 {
        trigger.on_visibility(1.0, &mut feed).await;
    }

    assert_eq!(feed.products().len(), 97);
    assert_eq!(feed.page(), 4);
    assert!(!trigger.is_armed());
}

#[tokio::test]
async fn test_trigger_does_not_fire_on_failed_feed() {
    let mut feed = feed_of(97);
    feed.api().fail_next(1);
    feed.initialize().await;
    let mut trigger = ScrollTrigger::new(0.8);

    assert!(!trigger.on_visibility(1.0, &mut feed).await);
    assert_eq!(feed.api().request_count(), 1);
}
