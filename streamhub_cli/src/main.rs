mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use streamhub_lib::{CachedClient, StreamhubConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "streamhub")]
#[command(about = "Browse a StreamHub catalog: movies, series and live TV")]
struct Cli {
    /// Output format: table, json or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Backend base URL (overrides STREAMHUB_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the movie catalog
    Movies(commands::browse::BrowseArgs),
    /// Browse the series catalog
    Series(commands::browse::BrowseArgs),
    /// Browse live TV channels
    Live(commands::browse::BrowseArgs),
    /// List the category chips of a catalog
    Categories(commands::categories::CategoriesArgs),
    /// Show a series with its episodes
    Detail(commands::detail::DetailArgs),
    /// Open a front-end route such as /series/42/detail or /play/abc
    Open(commands::open::OpenArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("streamhub=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let mut config = StreamhubConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = Arc::new(CachedClient::new(&config)?);

    match &cli.command {
        Commands::Movies(args) => commands::browse::run_movies(args, &client, &config, &format).await?,
        Commands::Series(args) => commands::browse::run_series(args, &client, &config, &format).await?,
        Commands::Live(args) => commands::browse::run_live(args, &client, &config, &format).await?,
        Commands::Categories(args) => commands::categories::run(args, &client, &format).await?,
        Commands::Detail(args) => commands::detail::run(args, &client, &format).await?,
        Commands::Open(args) => commands::open::run(args, &client, &config, &format).await?,
    }

    Ok(())
}
