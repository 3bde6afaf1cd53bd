//! HTTP client for the StreamHub catalog backend.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{ListQuery, Query},
    types::{Category, LinkResponse, ListResponse, LiveStream, Movie, Series, SeriesDetail},
    Domain, Error,
};

/// Request timeout for backend calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the StreamHub catalog backend.
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, e.g. `http://localhost:5000`. May carry a path prefix.
    base_api_url: String,
}

impl Client {
    /// Creates a new client pointing at the given backend.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            http,
            base_api_url: base_url.to_string(),
        })
    }

    /// The backend this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::InvalidUrl(e.to_string())
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base", self.base_api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Malformed(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches one page of any domain's listing.
    pub async fn get_list<T>(
        &self,
        domain: Domain,
        query: &ListQuery,
    ) -> Result<ListResponse<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(&[domain.path_segment(), "list"])?;
        self.get(query.add_to_url(&url)).await
    }

    /// Fetches a page of movies.
    pub async fn get_movies(&self, query: &ListQuery) -> Result<ListResponse<Movie>, Error> {
        self.get_list(Domain::Movies, query).await
    }

    /// Fetches a page of series.
    pub async fn get_series(&self, query: &ListQuery) -> Result<ListResponse<Series>, Error> {
        self.get_list(Domain::Series, query).await
    }

    /// Fetches a page of live channels.
    pub async fn get_live_streams(
        &self,
        query: &ListQuery,
    ) -> Result<ListResponse<LiveStream>, Error> {
        self.get_list(Domain::LiveTv, query).await
    }

    /// Fetches the raw category list for a domain, without the "All" entry.
    pub async fn get_categories(&self, domain: Domain) -> Result<Vec<Category>, Error> {
        let mut url = self.endpoint(&["categories"])?;
        url.query_pairs_mut()
            .append_pair("action", domain.category_action());
        self.get(url).await
    }

    /// Fetches series metadata and its episodes.
    pub async fn get_series_detail(&self, series_id: &str) -> Result<SeriesDetail, Error> {
        let mut url = self.endpoint(&["series", "detail"])?;
        url.query_pairs_mut().append_pair("id", series_id);
        self.get(url).await
    }

    /// Resolves the playable link of a movie.
    pub async fn get_movie_link(&self, movie_id: &str) -> Result<LinkResponse, Error> {
        let url = self.endpoint(&["movies", movie_id, "link"])?;
        self.get(url).await
    }

    /// Resolves the playable link of an episode. The container extension
    /// (`mkv`, `mp4`, ...) selects the upstream file.
    pub async fn get_episode_link(
        &self,
        episode_id: &str,
        container_extension: &str,
    ) -> Result<LinkResponse, Error> {
        let mut url = self.endpoint(&["series", "episode", "link"])?;
        url.query_pairs_mut()
            .append_pair("episode_id", episode_id)
            .append_pair("container_extension", container_extension);
        self.get(url).await
    }

    /// Resolves the HLS link of a live channel.
    pub async fn get_live_link(&self, stream_id: &str) -> Result<LinkResponse, Error> {
        let mut url = self.endpoint(&["live-tv", "link"])?;
        url.query_pairs_mut().append_pair("stream_id", stream_id);
        self.get(url).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
