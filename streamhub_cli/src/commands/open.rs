use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::json;
use streamhub_lib::{CachedClient, Domain, LinkResolver, LinkState, Route, StreamhubConfig};

use crate::commands::browse::{self, BrowseArgs};
use crate::commands::detail;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct OpenArgs {
    /// Route path, e.g. /movies, /series/42/detail, /play/abc, /live-tv/7/News
    pub path: String,
}

pub async fn run(
    args: &OpenArgs,
    client: &Arc<CachedClient>,
    config: &StreamhubConfig,
    format: &OutputFormat,
) -> Result<()> {
    let route: Route = args.path.parse()?;

    if let Some(domain) = route.listing_domain() {
        let browse_args = BrowseArgs {
            pages: 1,
            ..BrowseArgs::default()
        };
        return match domain {
            Domain::Movies => browse::run_movies(&browse_args, client, config, format).await,
            Domain::Series => browse::run_series(&browse_args, client, config, format).await,
            Domain::LiveTv => browse::run_live(&browse_args, client, config, format).await,
        };
    }

    if let Some(target) = route.playback_target() {
        let resolver = LinkResolver::new(Arc::clone(client));
        let mut rx = resolver.start(target);
        let state = rx.wait_for(|s| !s.is_loading()).await?.clone();
        return match state {
            LinkState::Ready(link) => {
                match format {
                    OutputFormat::Json => print_json(&json!({
                        "route": route.path(),
                        "link": link,
                    })),
                    OutputFormat::Table | OutputFormat::Markdown => println!("{}", link),
                }
                Ok(())
            }
            LinkState::Unavailable(reason) => bail!("playback unavailable: {}", reason),
            LinkState::Pending => bail!("link resolution was cancelled"),
        };
    }

    match route {
        Route::SeriesDetail { id } => detail::show(&id, client, format).await,
        _ => {
            for path in ["/movies", "/series", "/live-tv"] {
                println!("{}", path);
            }
            Ok(())
        }
    }
}
