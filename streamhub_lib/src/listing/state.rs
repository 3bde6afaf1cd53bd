//! Paging, search and filter state of one catalog view, independent of any
//! runtime. The controller drives it; tests can drive it directly.

use std::collections::HashSet;

use streamhub_api::types::{CategoryId, ListResponse};
use streamhub_api::{ListQuery, Query};

use crate::source::CatalogItem;

/// An issued fetch. Completing it with [`ListingState::apply`] merges or
/// discards the response depending on what changed in the meantime.
#[derive(Clone, Debug)]
pub struct FetchTicket {
    generation: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`ListingState::apply`] did with a completed fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// Page 1 replaced the list.
    Replaced { count: usize },
    /// A later page was appended. Items whose id was already listed are dropped.
    Appended { count: usize, duplicates: usize },
    /// The user moved on before the response arrived.
    Stale,
    /// The fetch failed; the list is untouched.
    Failed,
}

/// Accumulated listing of one mounted view.
#[derive(Clone, Debug)]
pub struct ListingState<T> {
    items: Vec<T>,
    ids: HashSet<String>,
    featured: Option<T>,
    current_page: u32,
    page_size: u32,
    total_count: u64,
    search_term: String,
    category: Option<CategoryId>,
    /// Bumped on every reset to page 1.
    generation: u64,
    /// Search and category the current generation was issued for. Differs
    /// from `search_term` while new search text waits out the debounce.
    listing_query: ListQuery,
    /// Generation the displayed items belong to; `None` before the first success.
    items_generation: Option<u64>,
    /// Page of the outstanding fetch of the current generation.
    in_flight: Option<u32>,
    last_error: Option<String>,
}

impl<T: CatalogItem> ListingState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
            featured: None,
            current_page: 1,
            page_size: page_size.max(1),
            total_count: 0,
            search_term: String::new(),
            category: None,
            generation: 0,
            listing_query: ListQuery::default(),
            items_generation: None,
            in_flight: None,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn featured(&self) -> Option<&T> {
        self.featured.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the first page of the current listing is still outstanding
    /// and nothing has been shown yet.
    pub fn is_initial_load(&self) -> bool {
        self.items_generation.is_none() && self.is_fetching()
    }

    /// `ceil(total_count / page_size)`.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Whether search text has been recorded that the current listing was
    /// not fetched for.
    pub fn is_search_pending(&self) -> bool {
        !self.listing_query.same_listing(&self.intent())
    }

    /// Records search input without fetching. The caller schedules the
    /// debounced [`begin_fresh`](Self::begin_fresh).
    pub fn record_search_term(&mut self, text: &str) {
        self.search_term = text.to_string();
    }

    /// Starts over at page 1 for the current search term and category.
    pub fn begin_fresh(&mut self) -> FetchTicket {
        self.generation += 1;
        self.current_page = 1;
        self.in_flight = Some(1);
        self.listing_query = self.intent();
        self.ticket(1)
    }

    /// Switches category. Returns `None` without touching anything when the
    /// category is already active.
    pub fn select_category(&mut self, category: Option<CategoryId>) -> Option<FetchTicket> {
        if self.category == category {
            return None;
        }
        self.category = category;
        Some(self.begin_fresh())
    }

    /// Advances to the next page if there is one and nothing is in flight.
    /// Refused while a search is pending: the next page would belong to a
    /// different listing than the items shown.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() || self.items_generation != Some(self.generation) {
            return None;
        }
        if self.is_search_pending() {
            return None;
        }
        if !self.has_more() {
            return None;
        }
        self.current_page += 1;
        self.in_flight = Some(self.current_page);
        Some(self.ticket(self.current_page))
    }

    /// Merges or discards a completed fetch.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListResponse<T>, String>,
    ) -> Applied {
        let page = ticket.page();
        let current = ticket.generation == self.generation;
        if current && self.in_flight == Some(page) {
            self.in_flight = None;
        }
        if !current || !ticket.query.same_listing(&self.intent()) {
            return Applied::Stale;
        }

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                if page > 1 && page == self.current_page {
                    self.current_page -= 1;
                }
                self.last_error = Some(e);
                return Applied::Failed;
            }
        };

        if page == 1 {
            let count = resp.items.len();
            self.ids = resp.items.iter().map(|i| i.id().to_string()).collect();
            self.items = resp.items;
            self.featured = resp.featured;
            self.total_count = resp.total;
            self.items_generation = Some(self.generation);
            self.last_error = None;
            Applied::Replaced { count }
        } else if page == self.current_page {
            let mut count = 0;
            let mut duplicates = 0;
            for item in resp.items {
                if self.ids.insert(item.id().to_string()) {
                    self.items.push(item);
                    count += 1;
                } else {
                    duplicates += 1;
                }
            }
            self.total_count = resp.total;
            self.last_error = None;
            Applied::Appended { count, duplicates }
        } else {
            Applied::Stale
        }
    }

    /// The listing the user currently asks for, page aside.
    fn intent(&self) -> ListQuery {
        ListQuery::default()
            .with_search(&self.search_term)
            .with_category(self.category.clone())
    }

    fn ticket(&self, page: u32) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            query: self
                .listing_query
                .clone()
                .with_page(page)
                .with_limit(self.page_size),
        }
    }
}
