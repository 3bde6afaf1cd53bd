//! Event-driven controller wiring a [`ListingState`] to a [`CatalogSource`].

use std::sync::{Arc, Mutex, MutexGuard};

use streamhub_api::types::{Category, CategoryId, ListResponse};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::ListingConfig;
use crate::error::StreamhubError;
use crate::source::{CatalogItem, CatalogSource};

use super::state::{Applied, FetchTicket, ListingState};

/// Lightweight progress report published after every state change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingStatus {
    /// Increments on every publish.
    pub revision: u64,
    pub item_count: usize,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    /// A listing fetch of the current search/category is outstanding.
    pub is_fetching: bool,
    /// Nothing has been shown yet and the first page is outstanding.
    pub is_initial_load: bool,
    /// A search term is waiting out the debounce window.
    pub search_pending: bool,
    pub categories_loading: bool,
}

impl ListingStatus {
    /// No debounce pending and no fetch outstanding.
    pub fn is_idle(&self) -> bool {
        !self.is_fetching && !self.search_pending && !self.categories_loading
    }
}

/// Point-in-time copy of a listing, for rendering.
#[derive(Clone, Debug)]
pub struct ListingSnapshot<T> {
    pub items: Vec<T>,
    pub featured: Option<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub search_term: String,
    pub category: Option<CategoryId>,
    pub is_fetching: bool,
    pub last_error: Option<String>,
}

/// Owns the paging, search and category state of one mounted catalog view.
///
/// Search input is debounced, category changes fetch immediately and scroll
/// notifications page forward. Responses that no longer match the current
/// search/category are discarded, so the list never mixes two queries.
/// Dropping the controller unmounts it: the debounce timer is cancelled and
/// results still in flight are ignored.
pub struct ListingController<S: CatalogSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: CatalogSource> {
    source: S,
    config: ListingConfig,
    shared: Mutex<Shared<S::Item>>,
    status: watch::Sender<ListingStatus>,
}

struct Shared<T> {
    listing: ListingState<T>,
    categories: Vec<Category>,
    categories_loaded: bool,
    categories_loading: bool,
    debounce: Option<JoinHandle<()>>,
    /// Identifies the newest debounce timer; older timers that already woke up do nothing.
    debounce_seq: u64,
    revision: u64,
    closed: bool,
}

impl<S: CatalogSource> ListingController<S> {
    /// Mounts a view: starts the category fetch and the unfiltered first page.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(source: S, config: ListingConfig) -> Self {
        let (status, _) = watch::channel(ListingStatus::default());
        let inner = Arc::new(Inner {
            source,
            config,
            shared: Mutex::new(Shared {
                listing: ListingState::new(config.page_size()),
                categories: vec![Category::all()],
                categories_loaded: false,
                categories_loading: false,
                debounce: None,
                debounce_seq: 0,
                revision: 0,
                closed: false,
            }),
            status,
        });

        let controller = Self { inner };
        controller.fetch_categories();
        let ticket = {
            let mut shared = controller.inner.lock();
            let ticket = shared.listing.begin_fresh();
            controller.inner.publish(&mut shared);
            ticket
        };
        Inner::spawn_fetch(&controller.inner, ticket);
        controller
    }

    /// Records new search text and (re)starts the debounce timer. When the
    /// input stays quiet for the configured window, page 1 is fetched for
    /// the last text supplied and replaces the list.
    pub fn set_search_term(&self, text: &str) {
        let mut shared = self.inner.lock();
        shared.listing.record_search_term(text);
        shared.debounce_seq += 1;
        let seq = shared.debounce_seq;
        if let Some(handle) = shared.debounce.take() {
            handle.abort();
        }

        let inner = Arc::clone(&self.inner);
        let delay = self.inner.config.debounce();
        shared.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Inner::fire_debounce(&inner, seq);
        }));
        self.inner.publish(&mut shared);
    }

    /// Switches category and fetches page 1 immediately. Returns `false`,
    /// without any request, when the category is already active.
    ///
    /// The fetch carries any search text still waiting out the debounce, so
    /// the pending timer is dropped.
    pub fn set_category(&self, category: Option<CategoryId>) -> bool {
        let ticket = {
            let mut shared = self.inner.lock();
            let Some(ticket) = shared.listing.select_category(category) else {
                return false;
            };
            shared.debounce_seq += 1;
            if let Some(handle) = shared.debounce.take() {
                handle.abort();
            }
            self.inner.publish(&mut shared);
            ticket
        };
        tracing::debug!("Category changed, fetching {:?}", ticket.query());
        Inner::spawn_fetch(&self.inner, ticket);
        true
    }

    /// Requests the next page when the consumer nears the end of the list.
    /// Returns `false` when there is no further page, a fetch is already
    /// outstanding or new search text has not been fetched yet.
    pub fn notify_scroll_near_bottom(&self) -> bool {
        let ticket = {
            let mut shared = self.inner.lock();
            let Some(ticket) = shared.listing.begin_next_page() else {
                return false;
            };
            self.inner.publish(&mut shared);
            ticket
        };
        Inner::spawn_fetch(&self.inner, ticket);
        true
    }

    /// Loads the category chips. Runs once at mount; calling it again only
    /// does something after a failed attempt.
    pub fn fetch_categories(&self) {
        {
            let mut shared = self.inner.lock();
            if shared.categories_loaded || shared.categories_loading {
                return;
            }
            shared.categories_loading = true;
            self.inner.publish(&mut shared);
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.source.fetch_categories().await;
            let mut shared = inner.lock();
            shared.categories_loading = false;
            if shared.closed {
                return;
            }
            match result {
                Ok(categories) => {
                    shared.categories = with_all_category(categories);
                    shared.categories_loaded = true;
                }
                Err(e) => tracing::warn!("Failed to fetch categories: {}", e),
            }
            inner.publish(&mut shared);
        });
    }

    /// Category chips, "All" first. Only "All" until the fetch succeeds.
    pub fn categories(&self) -> Vec<Category> {
        self.inner.lock().categories.clone()
    }

    pub fn snapshot(&self) -> ListingSnapshot<S::Item> {
        let shared = self.inner.lock();
        let listing = &shared.listing;
        ListingSnapshot {
            items: listing.items().to_vec(),
            featured: listing.featured().cloned(),
            current_page: listing.current_page(),
            total_pages: listing.total_pages(),
            total_count: listing.total_count(),
            search_term: listing.search_term().to_string(),
            category: listing.category().cloned(),
            is_fetching: listing.is_fetching(),
            last_error: listing.last_error().map(str::to_string),
        }
    }

    pub fn status(&self) -> ListingStatus {
        self.inner.status.borrow().clone()
    }

    /// Subscribes to status changes.
    pub fn subscribe(&self) -> watch::Receiver<ListingStatus> {
        self.inner.status.subscribe()
    }

    /// Resolves once no debounce timer is pending and no fetch is outstanding.
    pub async fn settled(&self) {
        let mut rx = self.inner.status.subscribe();
        let _ = rx.wait_for(ListingStatus::is_idle).await;
    }

    pub fn has_more(&self) -> bool {
        self.inner.lock().listing.has_more()
    }

    pub fn total_pages(&self) -> u32 {
        self.inner.lock().listing.total_pages()
    }

    pub fn page_size(&self) -> u32 {
        self.inner.config.page_size()
    }
}

impl<S: CatalogSource> Drop for ListingController<S> {
    fn drop(&mut self) {
        let mut shared = self.inner.lock();
        shared.closed = true;
        shared.debounce_seq += 1;
        if let Some(handle) = shared.debounce.take() {
            handle.abort();
        }
    }
}

impl<S: CatalogSource> Inner<S> {
    fn lock(&self) -> MutexGuard<'_, Shared<S::Item>> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, shared: &mut Shared<S::Item>) {
        shared.revision += 1;
        let listing = &shared.listing;
        self.status.send_replace(ListingStatus {
            revision: shared.revision,
            item_count: listing.items().len(),
            current_page: listing.current_page(),
            total_pages: listing.total_pages(),
            total_count: listing.total_count(),
            is_fetching: listing.is_fetching(),
            is_initial_load: listing.is_initial_load(),
            search_pending: shared.debounce.is_some(),
            categories_loading: shared.categories_loading,
        });
    }

    fn fire_debounce(inner: &Arc<Self>, seq: u64) {
        let ticket = {
            let mut shared = inner.lock();
            if shared.closed || shared.debounce_seq != seq {
                return;
            }
            shared.debounce = None;
            let ticket = shared.listing.begin_fresh();
            inner.publish(&mut shared);
            ticket
        };
        tracing::debug!("Search settled, fetching {:?}", ticket.query());
        Self::spawn_fetch(inner, ticket);
    }

    fn spawn_fetch(inner: &Arc<Self>, ticket: FetchTicket) {
        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            let result = inner.source.fetch_page(ticket.query()).await;
            inner.complete(ticket, result);
        });
    }

    fn complete(
        &self,
        ticket: FetchTicket,
        result: Result<ListResponse<S::Item>, StreamhubError>,
    ) {
        let mut shared = self.lock();
        if shared.closed {
            return;
        }
        let page = ticket.page();
        let result = result.map_err(|e| {
            tracing::warn!("Failed to fetch page {}: {}", page, e);
            e.to_string()
        });
        match shared.listing.apply(ticket, result) {
            Applied::Stale => tracing::debug!("Discarded stale response for page {}", page),
            Applied::Appended { duplicates, .. } if duplicates > 0 => {
                tracing::debug!("Dropped {} duplicate items from page {}", duplicates, page)
            }
            _ => {}
        }
        self.publish(&mut shared);
    }
}

/// Prefixes the backend's categories with the synthetic "All" entry.
pub fn with_all_category(categories: Vec<Category>) -> Vec<Category> {
    let mut all = Vec::with_capacity(categories.len() + 1);
    all.push(Category::all());
    all.extend(categories.into_iter().filter(|c| c.id.is_some()));
    all
}

impl<T: CatalogItem> ListingSnapshot<T> {
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}
