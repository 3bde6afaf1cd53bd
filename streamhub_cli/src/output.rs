use serde::Serialize;
use streamhub_lib::types::{Category, SeriesDetail};
use streamhub_lib::CatalogItem;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct ItemRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Image")]
    #[serde(rename = "Image")]
    image: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Tabled, Serialize)]
struct EpisodeRow {
    #[tabled(rename = "Season")]
    #[serde(rename = "Season")]
    season: String,
    #[tabled(rename = "Ep")]
    #[serde(rename = "Ep")]
    episode: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Format")]
    #[serde(rename = "Format")]
    format: String,
    #[tabled(rename = "Duration")]
    #[serde(rename = "Duration")]
    duration: String,
}

// -- Row builders --

fn build_item_rows<T: CatalogItem>(items: &[T]) -> Vec<ItemRow> {
    items
        .iter()
        .map(|i| ItemRow {
            id: i.id().to_string(),
            title: i.title().to_string(),
            image: i.image_url().unwrap_or("-").to_string(),
        })
        .collect()
}

fn build_category_rows(categories: &[Category]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id.clone().unwrap_or_else(|| "-".to_string()),
            name: c.name.clone(),
        })
        .collect()
}

fn build_episode_rows(detail: &SeriesDetail) -> Vec<EpisodeRow> {
    detail
        .seasons()
        .into_iter()
        .flat_map(|(season, episodes)| {
            episodes.iter().map(move |e| EpisodeRow {
                season: season.to_string(),
                episode: e.episode_num.clone().unwrap_or_default(),
                id: e.id.clone(),
                title: e.title.clone(),
                format: e.container_extension.clone(),
                duration: e.info.duration.clone().unwrap_or_default(),
            })
        })
        .collect()
}

fn render<R: Tabled>(rows: Vec<R>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

// -- Table / markdown output --

pub fn print_items<T: CatalogItem>(items: &[T], format: &OutputFormat) {
    println!(
        "{}",
        render(build_item_rows(items), matches!(format, OutputFormat::Markdown))
    );
}

pub fn print_categories(categories: &[Category], format: &OutputFormat) {
    println!(
        "{}",
        render(
            build_category_rows(categories),
            matches!(format, OutputFormat::Markdown)
        )
    );
}

pub fn print_episodes(detail: &SeriesDetail, format: &OutputFormat) {
    println!(
        "{}",
        render(
            build_episode_rows(detail),
            matches!(format, OutputFormat::Markdown)
        )
    );
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// "Page 2 of 3 (40 of 45 items)".
pub fn page_summary(current_page: u32, total_pages: u32, shown: usize, total: u64) -> String {
    if total == 0 {
        return "No results".to_string();
    }
    format!(
        "Page {} of {} ({} of {} items)",
        current_page, total_pages, shown, total
    )
}
