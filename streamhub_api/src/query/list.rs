use url::Url;

use crate::types::CategoryId;

use super::{common::QueryCommon, Query};

/// Query for one page of a catalog listing (`/<domain>/list`).
///
/// The backend always receives `search`, even when empty; an empty search
/// term means "no text filter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub common: QueryCommon,
    pub search: String,
    pub category: Option<CategoryId>,
}

impl Query for ListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut().append_pair("search", &self.search);
        if let Some(category) = &self.category {
            url.query_pairs_mut().append_pair("category", category);
        }
        url
    }
}

impl ListQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    pub fn page(&self) -> u32 {
        self.common.page
    }

    /// Whether both queries address the same listing, ignoring the page.
    pub fn same_listing(&self, other: &ListQuery) -> bool {
        self.search == other.search && self.category == other.category
    }
}
