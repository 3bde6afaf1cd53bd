use anyhow::Result;
use clap::Args;
use streamhub_lib::types::SeriesDetail;
use streamhub_lib::{CachedClient, Route};

use crate::output::{print_episodes, print_json, OutputFormat};

#[derive(Args)]
pub struct DetailArgs {
    /// Series ID
    pub id: String,
}

pub async fn run(args: &DetailArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    show(&args.id, client, format).await
}

pub async fn show(series_id: &str, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let detail = client.get_series_detail(series_id).await?;
    match format {
        OutputFormat::Json => print_json(&detail),
        OutputFormat::Table | OutputFormat::Markdown => {
            print_header(&detail);
            print_episodes(&detail, format);
            if let Some((_, episodes)) = detail.seasons().first() {
                if let Some(first) = episodes.first() {
                    eprintln!("Play with: streamhub open '{}'", Route::episode_player(first));
                }
            }
        }
    }
    Ok(())
}

fn print_header(detail: &SeriesDetail) {
    let info = &detail.info;
    let mut title = info.title.clone();
    if let Some(year) = &info.year {
        title.push_str(&format!(" ({})", year));
    }
    println!("{}", title);
    for (label, value) in [
        ("Genre", &info.genre),
        ("Rating", &info.rating),
        ("Director", &info.director),
        ("Cast", &info.cast),
        ("Plot", &info.plot),
    ] {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
    println!(
        "{} seasons, {} episodes",
        detail.episodes.len(),
        detail.episode_count()
    );
}
