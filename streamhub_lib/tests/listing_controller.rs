use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use streamhub_lib::types::{Category, ListResponse, Movie};
use streamhub_lib::{
    CatalogSource, ListQuery, ListingConfig, ListingController, StreamhubError,
};

const PAGE_SIZE: u32 = 20;
const DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Default)]
struct Script {
    default_total: u64,
    totals: HashMap<String, u64>,
    search_delays: HashMap<String, Duration>,
    page_delays: HashMap<u32, Duration>,
    fail_searches: HashSet<String>,
    fail_pages: HashSet<u32>,
    categories: Option<Vec<Category>>,
    calls: Vec<ListQuery>,
    category_calls: usize,
}

/// Serves a virtual catalog of `total` movies per search term. Item ids encode
/// the query that produced them: `<search>|<category>|<index>`.
#[derive(Clone)]
struct FakeCatalog(Arc<Mutex<Script>>);

impl FakeCatalog {
    fn new(default_total: u64) -> Self {
        Self(Arc::new(Mutex::new(Script {
            default_total,
            categories: Some(vec![Category {
                id: Some("1".to_string()),
                name: "News".to_string(),
            }]),
            ..Script::default()
        })))
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.0.lock().unwrap()
    }

    fn calls(&self) -> Vec<ListQuery> {
        self.script().calls.clone()
    }
}

impl CatalogSource for FakeCatalog {
    type Item = Movie;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<Movie>, StreamhubError> {
        let page = query.page();
        let (delay, fail, total) = {
            let mut script = self.script();
            script.calls.push(query.clone());
            let delay = script
                .page_delays
                .get(&page)
                .or_else(|| script.search_delays.get(&query.search))
                .copied()
                .unwrap_or(Duration::from_millis(10));
            let fail =
                script.fail_searches.contains(&query.search) || script.fail_pages.contains(&page);
            let total = script
                .totals
                .get(&query.search)
                .copied()
                .unwrap_or(script.default_total);
            (delay, fail, total)
        };

        tokio::time::sleep(delay).await;
        if fail {
            return Err(StreamhubError::Api(streamhub_lib::streamhub_api::Error::RequestFailed));
        }

        let limit = u64::from(query.common.limit);
        let start = u64::from(page - 1) * limit;
        let end = (start + limit).min(total);
        let category = query.category.clone().unwrap_or_default();
        let items: Vec<Movie> = (start..end)
            .map(|n| Movie {
                id: format!("{}|{}|{}", query.search, category, n),
                title: format!("Movie {}", n),
                stream_icon: None,
                rating: None,
            })
            .collect();
        let featured = if page == 1 { items.first().cloned() } else { None };
        Ok(ListResponse {
            items,
            total,
            featured,
        })
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, StreamhubError> {
        let categories = {
            let mut script = self.script();
            script.category_calls += 1;
            script.categories.clone()
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        categories.ok_or_else(|| {
            StreamhubError::Api(streamhub_lib::streamhub_api::Error::HttpStatus {
                status: 503,
                body: "down".to_string(),
            })
        })
    }
}

async fn mounted(source: &FakeCatalog) -> ListingController<FakeCatalog> {
    let config = ListingConfig::new(PAGE_SIZE, DEBOUNCE).unwrap();
    let controller = ListingController::mount(source.clone(), config);
    controller.settled().await;
    controller
}

fn searches(calls: &[ListQuery]) -> Vec<&str> {
    calls.iter().map(|q| q.search.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn mount_loads_first_page_and_categories() {
    let source = FakeCatalog::new(45);
    let config = ListingConfig::new(PAGE_SIZE, DEBOUNCE).unwrap();
    let controller = ListingController::mount(source.clone(), config);
    assert!(controller.status().is_initial_load);

    controller.settled().await;
    assert!(!controller.status().is_initial_load);

    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert_eq!(snap.total_count, 45);
    assert_eq!(snap.total_pages, 3);
    assert_eq!(snap.current_page, 1);
    assert_eq!(snap.featured.unwrap().id, "||0");

    let calls = source.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].page(), 1);
    assert_eq!(calls[0].common.limit, 20);
    assert_eq!(calls[0].search, "");
    assert_eq!(calls[0].category, None);

    assert_eq!(
        controller.categories(),
        vec![
            Category {
                id: None,
                name: "All".to_string()
            },
            Category {
                id: Some("1".to_string()),
                name: "News".to_string()
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn search_burst_issues_one_fetch_with_last_text() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;

    controller.set_search_term("a");
    tokio::time::advance(Duration::from_millis(100)).await;
    controller.set_search_term("ab");
    tokio::time::advance(Duration::from_millis(400)).await;
    controller.set_search_term("abc");
    assert!(controller.status().search_pending);
    controller.settled().await;

    let calls = source.calls();
    assert_eq!(searches(&calls), ["", "abc"]);
    assert_eq!(calls[1].page(), 1);
    assert_eq!(controller.snapshot().search_term, "abc");
}

#[tokio::test(start_paused = true)]
async fn debounce_waits_for_quiet_window() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;

    controller.set_search_term("matrix");
    tokio::time::advance(Duration::from_millis(499)).await;
    tokio::task::yield_now().await;
    assert_eq!(source.calls().len(), 1);

    controller.settled().await;
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn pages_accumulate_until_total_is_reached() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;
    assert_eq!(controller.snapshot().items.len(), 20);

    assert!(controller.notify_scroll_near_bottom());
    controller.settled().await;
    assert_eq!(controller.snapshot().items.len(), 40);

    assert!(controller.notify_scroll_near_bottom());
    controller.settled().await;
    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 45);
    assert_eq!(snap.current_page, 3);
    assert!(!snap.has_more());

    assert!(!controller.notify_scroll_near_bottom());
    controller.settled().await;
    assert_eq!(source.calls().len(), 3);
    assert_eq!(controller.snapshot().items.len(), 45);
}

#[tokio::test(start_paused = true)]
async fn items_keep_arrival_order_across_pages() {
    let source = FakeCatalog::new(30);
    let controller = mounted(&source).await;
    controller.notify_scroll_near_bottom();
    controller.settled().await;

    let ids: Vec<String> = controller.snapshot().items.into_iter().map(|m| m.id).collect();
    let expected: Vec<String> = (0..30).map(|n| format!("||{}", n)).collect();
    assert_eq!(ids, expected);
}

#[tokio::test(start_paused = true)]
async fn scroll_is_ignored_while_fetching() {
    let source = FakeCatalog::new(100);
    let controller = mounted(&source).await;

    assert!(controller.notify_scroll_near_bottom());
    assert!(!controller.notify_scroll_near_bottom());
    assert!(!controller.notify_scroll_near_bottom());
    controller.settled().await;

    let calls = source.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].page(), 2);
    assert_eq!(controller.snapshot().items.len(), 40);
}

#[tokio::test(start_paused = true)]
async fn selecting_active_category_does_not_fetch() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;

    assert!(!controller.set_category(None));
    controller.settled().await;
    assert_eq!(source.calls().len(), 1);

    assert!(controller.set_category(Some("1".to_string())));
    controller.settled().await;
    assert!(!controller.set_category(Some("1".to_string())));
    controller.settled().await;

    let calls = source.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].category.as_deref(), Some("1"));
    assert_eq!(calls[1].page(), 1);
}

#[tokio::test(start_paused = true)]
async fn category_change_replaces_accumulated_pages() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;
    controller.notify_scroll_near_bottom();
    controller.settled().await;
    assert_eq!(controller.snapshot().items.len(), 40);

    controller.set_category(Some("1".to_string()));
    controller.settled().await;

    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert_eq!(snap.current_page, 1);
    assert!(snap.items.iter().all(|m| m.id.starts_with("|1|")));
}

#[tokio::test(start_paused = true)]
async fn stale_search_response_is_discarded() {
    let source = FakeCatalog::new(45);
    {
        let mut script = source.script();
        script
            .search_delays
            .insert("A".to_string(), Duration::from_millis(1000));
        script.totals.insert("A".to_string(), 5);
        script.totals.insert("B".to_string(), 3);
    }
    let controller = mounted(&source).await;

    controller.set_search_term("A");
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
    assert_eq!(searches(&source.calls()), ["", "A"]);

    controller.set_search_term("B");
    controller.settled().await;
    // Let the slow "A" response land after "B".
    tokio::time::sleep(Duration::from_secs(2)).await;

    let snap = controller.snapshot();
    assert_eq!(snap.search_term, "B");
    assert_eq!(snap.items.len(), 3);
    assert_eq!(snap.total_count, 3);
    assert!(snap.items.iter().all(|m| m.id.starts_with("B|")));
}

#[tokio::test(start_paused = true)]
async fn page_response_after_category_change_is_discarded() {
    let source = FakeCatalog::new(45);
    source
        .script()
        .page_delays
        .insert(2, Duration::from_millis(1000));
    let controller = mounted(&source).await;

    assert!(controller.notify_scroll_near_bottom());
    controller.set_category(Some("7".to_string()));
    controller.settled().await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert_eq!(snap.current_page, 1);
    assert!(snap.items.iter().all(|m| m.id.starts_with("|7|")));
}

#[tokio::test(start_paused = true)]
async fn scroll_during_search_debounce_does_not_mix_listings() {
    let source = FakeCatalog::new(45);
    source.script().totals.insert("B".to_string(), 30);
    let controller = mounted(&source).await;

    controller.set_search_term("B");
    assert!(!controller.notify_scroll_near_bottom());
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(searches(&source.calls()), [""]);
    assert_eq!(controller.snapshot().current_page, 1);

    controller.settled().await;
    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert!(snap.items.iter().all(|m| m.id.starts_with("B|")));

    assert!(controller.notify_scroll_near_bottom());
    controller.settled().await;
    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 30);
    assert!(snap.items.iter().all(|m| m.id.starts_with("B|")));
    assert_eq!(searches(&source.calls()), ["", "B", "B"]);
}

#[tokio::test(start_paused = true)]
async fn category_change_during_search_debounce_uses_new_text() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;

    controller.set_search_term("B");
    assert!(controller.set_category(Some("1".to_string())));
    controller.settled().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let calls = source.calls();
    assert_eq!(searches(&calls), ["", "B"]);
    assert_eq!(calls[1].category.as_deref(), Some("1"));
    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert!(snap.items.iter().all(|m| m.id.starts_with("B|1|")));
}

#[tokio::test(start_paused = true)]
async fn clearing_search_refetches_unfiltered_first_page() {
    let source = FakeCatalog::new(45);
    source.script().totals.insert("x".to_string(), 3);
    let controller = mounted(&source).await;

    controller.set_search_term("x");
    controller.settled().await;
    assert_eq!(controller.snapshot().items.len(), 3);

    controller.set_search_term("");
    controller.settled().await;

    let calls = source.calls();
    let last = calls.last().unwrap();
    assert_eq!(last.search, "");
    assert_eq!(last.page(), 1);
    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert_eq!(snap.total_count, 45);
}

#[tokio::test(start_paused = true)]
async fn failed_search_keeps_last_good_listing() {
    let source = FakeCatalog::new(45);
    source.script().fail_searches.insert("boom".to_string());
    let controller = mounted(&source).await;

    controller.set_search_term("boom");
    controller.settled().await;

    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert!(snap.items.iter().all(|m| m.id.starts_with("||")));
    assert!(snap.last_error.is_some());
    // The shown items belong to the previous search, so paging stays off.
    assert!(!controller.notify_scroll_near_bottom());

    controller.set_search_term("");
    controller.settled().await;
    let snap = controller.snapshot();
    assert!(snap.last_error.is_none());
    assert!(controller.notify_scroll_near_bottom());
}

#[tokio::test(start_paused = true)]
async fn failed_page_can_be_requested_again() {
    let source = FakeCatalog::new(45);
    source.script().fail_pages.insert(2);
    let controller = mounted(&source).await;

    assert!(controller.notify_scroll_near_bottom());
    controller.settled().await;
    let snap = controller.snapshot();
    assert_eq!(snap.items.len(), 20);
    assert_eq!(snap.current_page, 1);
    assert!(snap.last_error.is_some());

    source.script().fail_pages.clear();
    assert!(controller.notify_scroll_near_bottom());
    controller.settled().await;
    assert_eq!(controller.snapshot().items.len(), 40);
}

#[tokio::test(start_paused = true)]
async fn empty_catalog_never_pages() {
    let source = FakeCatalog::new(0);
    let controller = mounted(&source).await;

    let snap = controller.snapshot();
    assert!(snap.items.is_empty());
    assert_eq!(snap.total_pages, 0);
    assert!(snap.last_error.is_none());
    assert!(!controller.notify_scroll_near_bottom());
    assert_eq!(source.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn category_failure_exposes_only_all() {
    let source = FakeCatalog::new(45);
    source.script().categories = None;
    let controller = mounted(&source).await;
    assert_eq!(controller.categories(), vec![Category::all()]);

    source.script().categories = Some(vec![Category {
        id: Some("3".to_string()),
        name: "Kids".to_string(),
    }]);
    controller.fetch_categories();
    controller.settled().await;
    assert_eq!(controller.categories().len(), 2);
    assert_eq!(source.script().category_calls, 2);

    // Loaded once; further calls are no-ops.
    controller.fetch_categories();
    controller.settled().await;
    assert_eq!(source.script().category_calls, 2);
}

#[tokio::test(start_paused = true)]
async fn dropping_controller_cancels_pending_search() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;

    controller.set_search_term("late");
    drop(controller);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(searches(&source.calls()), [""]);
}

#[tokio::test(start_paused = true)]
async fn status_channel_reports_progress() {
    let source = FakeCatalog::new(45);
    let controller = mounted(&source).await;
    let mut rx = controller.subscribe();
    let before = rx.borrow_and_update().revision;

    controller.notify_scroll_near_bottom();
    assert!(controller.status().is_fetching);
    controller.settled().await;

    let status = rx.borrow_and_update().clone();
    assert!(status.revision > before);
    assert_eq!(status.item_count, 40);
    assert_eq!(status.current_page, 2);
    assert!(status.is_idle());
}
