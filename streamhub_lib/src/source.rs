//! The data-source seam between a listing controller and the backend.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use streamhub_api::types::{Category, ListResponse, LiveStream, Movie, Series};
use streamhub_api::{Domain, ListQuery};

use crate::client::CachedClient;
use crate::error::StreamhubError;

/// A record shown as one card in a catalog grid.
pub trait CatalogItem: Clone + Send + Sync + 'static {
    /// Identity key. Unique within one accumulated listing.
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn image_url(&self) -> Option<&str>;
}

impl CatalogItem for Movie {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn image_url(&self) -> Option<&str> {
        self.stream_icon.as_deref()
    }
}

impl CatalogItem for Series {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn image_url(&self) -> Option<&str> {
        self.cover.as_deref()
    }
}

impl CatalogItem for LiveStream {
    fn id(&self) -> &str {
        &self.stream_id
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn image_url(&self) -> Option<&str> {
        self.stream_icon.as_deref()
    }
}

/// Where a listing controller gets its pages and category chips from.
pub trait CatalogSource: Send + Sync + 'static {
    type Item: CatalogItem;

    /// Fetches the page described by `query`.
    fn fetch_page(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<ListResponse<Self::Item>, StreamhubError>> + Send;

    /// Fetches the raw category list, without the synthetic "All" entry.
    fn fetch_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<Category>, StreamhubError>> + Send;
}

/// [`CatalogSource`] backed by the HTTP API for one domain.
pub struct HttpCatalog<T> {
    client: Arc<CachedClient>,
    domain: Domain,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpCatalog<T> {
    pub fn new(client: Arc<CachedClient>, domain: Domain) -> Self {
        Self {
            client,
            domain,
            _item: PhantomData,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }
}

impl HttpCatalog<Movie> {
    pub fn movies(client: Arc<CachedClient>) -> Self {
        Self::new(client, Domain::Movies)
    }
}

impl HttpCatalog<Series> {
    pub fn series(client: Arc<CachedClient>) -> Self {
        Self::new(client, Domain::Series)
    }
}

impl HttpCatalog<LiveStream> {
    pub fn live_tv(client: Arc<CachedClient>) -> Self {
        Self::new(client, Domain::LiveTv)
    }
}

impl<T> CatalogSource for HttpCatalog<T>
where
    T: CatalogItem + DeserializeOwned,
{
    type Item = T;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<T>, StreamhubError> {
        self.client.get_list(self.domain, query).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, StreamhubError> {
        self.client.get_categories(self.domain).await
    }
}
