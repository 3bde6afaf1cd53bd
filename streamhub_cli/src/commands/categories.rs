use anyhow::{anyhow, Result};
use clap::Args;
use streamhub_lib::listing::with_all_category;
use streamhub_lib::{CachedClient, Domain};

use crate::output::{print_categories, print_json, OutputFormat};

#[derive(Args)]
pub struct CategoriesArgs {
    /// Catalog: movies, series or live
    pub domain: String,
}

pub async fn run(args: &CategoriesArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let domain: Domain = args
        .domain
        .parse()
        .map_err(|_| anyhow!("unknown catalog '{}': expected movies, series or live", args.domain))?;

    let categories = with_all_category(client.get_categories(domain).await?);
    match format {
        OutputFormat::Json => print_json(&categories),
        OutputFormat::Table | OutputFormat::Markdown => print_categories(&categories, format),
    }
    Ok(())
}
