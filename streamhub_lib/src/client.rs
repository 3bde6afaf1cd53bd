//! Caching wrapper around the API client.

use streamhub_api::types::{Category, ListResponse, SeriesDetail};
use streamhub_api::{Client, Domain, ListQuery};

use serde::de::DeserializeOwned;

use crate::cache::MemoryCache;
use crate::config::StreamhubConfig;
use crate::error::StreamhubError;
use crate::playback::PlaybackTarget;

/// API client wrapper that caches lookups which do not change during a session.
///
/// Category lists and series details are served from memory after the first
/// hit. Listing pages and playback links always go to the backend: pages
/// depend on live search input and links are usually short-lived tokens.
pub struct CachedClient {
    inner: Client,
    categories: MemoryCache<Vec<Category>>,
    details: MemoryCache<SeriesDetail>,
}

impl CachedClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &StreamhubConfig) -> Result<Self, StreamhubError> {
        Ok(Self {
            inner: Client::new(&config.base_url)?,
            categories: MemoryCache::new(config.cache_ttl),
            details: MemoryCache::new(config.cache_ttl),
        })
    }

    /// Creates a client with a custom base URL and default cache lifetime. Used for testing.
    pub fn with_base_url(base_url: &str) -> Result<Self, StreamhubError> {
        Self::new(&StreamhubConfig::default().with_base_url(base_url))
    }

    /// Fetches one listing page. Never cached.
    pub async fn get_list<T>(
        &self,
        domain: Domain,
        query: &ListQuery,
    ) -> Result<ListResponse<T>, StreamhubError>
    where
        T: DeserializeOwned,
    {
        Ok(self.inner.get_list(domain, query).await?)
    }

    /// Fetches a domain's categories, returning cached results when available.
    pub async fn get_categories(&self, domain: Domain) -> Result<Vec<Category>, StreamhubError> {
        let cache_key = format!("categories:{}", domain);
        self.categories
            .get_or_fetch(&cache_key, || async {
                self.inner
                    .get_categories(domain)
                    .await
                    .map_err(StreamhubError::from)
            })
            .await
    }

    /// Fetches a series' detail, returning cached results when available.
    pub async fn get_series_detail(&self, series_id: &str) -> Result<SeriesDetail, StreamhubError> {
        let cache_key = format!("series:{}", series_id);
        self.details
            .get_or_fetch(&cache_key, || async {
                self.inner
                    .get_series_detail(series_id)
                    .await
                    .map_err(StreamhubError::from)
            })
            .await
    }

    /// Resolves a directly playable URL. An empty link counts as unavailable.
    pub async fn resolve_link(&self, target: &PlaybackTarget) -> Result<String, StreamhubError> {
        let resp = match target {
            PlaybackTarget::Movie { id } => self.inner.get_movie_link(id).await?,
            PlaybackTarget::Episode {
                episode_id,
                container_extension,
            } => {
                self.inner
                    .get_episode_link(episode_id, container_extension)
                    .await?
            }
            PlaybackTarget::LiveStream { stream_id } => self.inner.get_live_link(stream_id).await?,
        };
        let link = resp.link.trim();
        if link.is_empty() {
            return Err(StreamhubError::Unavailable(format!(
                "backend returned no link for {}",
                target
            )));
        }
        Ok(link.to_string())
    }
}
