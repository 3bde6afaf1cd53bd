use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use streamhub_lib::types::CategoryId;
use streamhub_lib::{
    CachedClient, CatalogItem, CatalogSource, HttpCatalog, ListingController, StreamhubConfig,
};

use crate::output::{page_summary, print_items, print_json, OutputFormat};

#[derive(Args, Default)]
pub struct BrowseArgs {
    /// Search text (matched by the backend)
    #[arg(long)]
    pub search: Option<String>,

    /// Category ID; omit for "All"
    #[arg(long)]
    pub category: Option<String>,

    /// Number of pages to load
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

#[derive(Serialize)]
struct ListingOutput<'a, T> {
    search: &'a str,
    category: Option<&'a CategoryId>,
    current_page: u32,
    total_pages: u32,
    total_count: u64,
    featured: Option<&'a T>,
    items: &'a [T],
}

pub async fn run_movies(
    args: &BrowseArgs,
    client: &Arc<CachedClient>,
    config: &StreamhubConfig,
    format: &OutputFormat,
) -> Result<()> {
    browse(HttpCatalog::movies(Arc::clone(client)), args, config, format).await
}

pub async fn run_series(
    args: &BrowseArgs,
    client: &Arc<CachedClient>,
    config: &StreamhubConfig,
    format: &OutputFormat,
) -> Result<()> {
    browse(HttpCatalog::series(Arc::clone(client)), args, config, format).await
}

pub async fn run_live(
    args: &BrowseArgs,
    client: &Arc<CachedClient>,
    config: &StreamhubConfig,
    format: &OutputFormat,
) -> Result<()> {
    browse(HttpCatalog::live_tv(Arc::clone(client)), args, config, format).await
}

/// Mounts a listing, applies the filters, then scrolls until `--pages` pages
/// are loaded or the catalog runs out.
pub async fn browse<T>(
    catalog: HttpCatalog<T>,
    args: &BrowseArgs,
    config: &StreamhubConfig,
    format: &OutputFormat,
) -> Result<()>
where
    T: CatalogItem + DeserializeOwned + Serialize,
{
    let controller = ListingController::mount(catalog, config.listing()?);
    // Mounting always requests the unfiltered first page; with filters given
    // that response is discarded. Search goes first so a category change
    // sends both in one request instead of waiting for the debounce.
    if let Some(search) = &args.search {
        controller.set_search_term(search);
    }
    if args.category.is_some() {
        controller.set_category(args.category.clone());
    }
    controller.settled().await;
    load_pages(&controller, args.pages).await;

    let snap = controller.snapshot();
    if let Some(err) = &snap.last_error {
        if snap.items.is_empty() {
            bail!("failed to load listing: {}", err);
        }
        eprintln!("Warning: stopped early: {}", err);
    }

    match format {
        OutputFormat::Json => print_json(&ListingOutput {
            search: &snap.search_term,
            category: snap.category.as_ref(),
            current_page: snap.current_page,
            total_pages: snap.total_pages,
            total_count: snap.total_count,
            featured: snap.featured.as_ref(),
            items: &snap.items,
        }),
        OutputFormat::Table | OutputFormat::Markdown => {
            if let Some(featured) = &snap.featured {
                println!("Featured: {}", featured.title());
            }
            print_items(&snap.items, format);
            eprintln!(
                "{}",
                page_summary(
                    snap.current_page,
                    snap.total_pages,
                    snap.items.len(),
                    snap.total_count
                )
            );
        }
    }
    Ok(())
}

/// Scrolls until `pages` pages are loaded, the catalog runs out or a page
/// fails to load.
pub async fn load_pages<S: CatalogSource>(controller: &ListingController<S>, pages: u32) {
    loop {
        let before = controller.status().current_page;
        if before >= pages || !controller.notify_scroll_near_bottom() {
            break;
        }
        controller.settled().await;
        if controller.status().current_page <= before {
            break;
        }
    }
}
