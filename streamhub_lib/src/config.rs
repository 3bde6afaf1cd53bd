//! Runtime configuration: backend location, paging and debounce settings.

use std::time::Duration;

use crate::error::StreamhubError;

/// Backend used when `STREAMHUB_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Items per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Quiet window before a search term is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
/// Lifetime of cached category lists and series details.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Top-level settings shared by every view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamhubConfig {
    pub base_url: String,
    pub page_size: u32,
    pub debounce: Duration,
    pub cache_ttl: Duration,
}

impl Default for StreamhubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl StreamhubConfig {
    /// Reads `STREAMHUB_API_URL`, `STREAMHUB_PAGE_SIZE`, `STREAMHUB_DEBOUNCE_MS`
    /// and `STREAMHUB_CACHE_TTL_SECS`. Missing or unparsable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_u64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let defaults = Self::default();
        Self {
            base_url: lookup("STREAMHUB_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            page_size: lookup("STREAMHUB_PAGE_SIZE")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(defaults.page_size),
            debounce: parse_u64("STREAMHUB_DEBOUNCE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            cache_ttl: parse_u64("STREAMHUB_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
        }
    }

    /// Overrides the backend, e.g. from a command-line flag.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Settings handed to each listing controller.
    pub fn listing(&self) -> Result<ListingConfig, StreamhubError> {
        ListingConfig::new(self.page_size, self.debounce)
    }
}

/// Per-controller settings. Fixed for the lifetime of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingConfig {
    page_size: u32,
    debounce: Duration,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl ListingConfig {
    pub fn new(page_size: u32, debounce: Duration) -> Result<Self, StreamhubError> {
        if page_size == 0 {
            return Err(StreamhubError::InvalidInput(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            page_size,
            debounce,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}
