//! Library layer for StreamHub: the catalog listing controller, cached API
//! client, playback link resolution and the front-end route table.
//!
//! Wraps the `streamhub_api` crate with an in-memory TTL cache for lookups
//! that do not change during a session.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod playback;
pub mod route;
pub mod source;

pub use streamhub_api;
pub use streamhub_api::types;
pub use streamhub_api::{Domain, ListQuery, Query};

pub use client::CachedClient;
pub use config::{ListingConfig, StreamhubConfig};
pub use error::StreamhubError;
pub use listing::{ListingController, ListingSnapshot, ListingStatus};
pub use playback::{LinkResolver, LinkState, PlaybackTarget};
pub use route::Route;
pub use source::{CatalogItem, CatalogSource, HttpCatalog};
