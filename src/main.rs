use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use search_images::api::{ImageSearchClient, SearchPage};
use search_images::observability::init_tracing;
use search_images::{initialize, open_store, BookmarkIntent, Config, Image, ImageStore};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// How long a command waits for the bookmark store to answer.
const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search images through the Kakao image search API and manage bookmarks"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Configuration file (default: ~/.config/search-images/config.toml)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding bookmarks and logs
    #[clap(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "SEARCH_IMAGES_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search the image API
    #[clap(name = "search")]
    Search {
        /// Search terms
        query: String,

        /// Result page (1-50)
        #[clap(long, default_value = "1")]
        page: u32,

        /// Bookmark every result
        #[clap(long)]
        save: bool,
    },

    /// List bookmarked images
    #[clap(name = "bookmarks")]
    Bookmarks {
        /// Only show bookmarks matching this keyword
        #[clap(long)]
        keyword: Option<String>,
    },

    /// Delete bookmarked images by id
    #[clap(name = "delete")]
    Delete {
        /// Ids of the images to delete
        #[clap(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    let config = load_config(&app.global)?;
    init_tracing(&config, app.global.verbose);

    if app.global.verbose {
        eprintln!("Data directory: {}", config.resolved_data_dir().display());
    }

    match app.command {
        Commands::Search { query, page, save } => search(&config, &query, page, save).await,
        Commands::Bookmarks { keyword } => bookmarks(&config, keyword).await,
        Commands::Delete { ids } => delete(&config, ids).await,
    }
}

fn load_config(global: &Global) -> Result<Config> {
    let mut config = Config::load(global.config.as_deref()).wrap_err("Failed to load configuration")?;

    if let Some(dir) = &global.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if global.verbose && config.trace_level.is_none() {
        config.trace_level = Some("debug".to_string());
    }
    Ok(config)
}

async fn search(config: &Config, query: &str, page: u32, save: bool) -> Result<()> {
    let client = ImageSearchClient::from_config(config)?;
    let result: SearchPage = client
        .search_images(query, page)
        .await
        .wrap_err_with(|| format!("Failed to search images for {query:?}"))?;

    println!(
        "{} results ({} pageable), page {}{}",
        result.meta.total_count,
        result.meta.pageable_count,
        result.page,
        if result.meta.is_end { ", last page" } else { "" }
    );
    for image in &result.images {
        print_image(image);
    }

    if save && !result.images.is_empty() {
        let count = result.images.len();
        let store = open_store(config)?;
        store.save(result.images).await.wrap_err("Failed to save bookmarks")?;
        println!("Bookmarked {count} images");
    }
    Ok(())
}

async fn bookmarks(config: &Config, keyword: Option<String>) -> Result<()> {
    let view_model = initialize(config)?;
    if let Some(keyword) = keyword {
        view_model.dispatch(BookmarkIntent::Search(keyword));
    }

    let mut states = view_model.subscribe();
    let state = tokio::time::timeout(WAIT_TIMEOUT, states.wait_for(|s| !s.is_loading))
        .await
        .wrap_err("Timed out waiting for bookmarks")?
        .map_err(|_| eyre!("Bookmark view model closed"))?
        .clone();

    if let Some(message) = state.user_message {
        return Err(eyre!("{message}"));
    }
    if state.is_empty() {
        println!("No bookmarks");
    }
    for image in &state.result {
        print_image(image);
    }
    Ok(())
}

async fn delete(config: &Config, ids: Vec<String>) -> Result<()> {
    let view_model = initialize(config)?;

    let mut states = view_model.subscribe();
    let loaded = tokio::time::timeout(WAIT_TIMEOUT, states.wait_for(|s| !s.is_loading))
        .await
        .wrap_err("Timed out waiting for bookmarks")?
        .map_err(|_| eyre!("Bookmark view model closed"))?
        .clone();
    if let Some(message) = loaded.user_message {
        return Err(eyre!("{message}"));
    }

    let (present, missing) = partition_ids(ids, &loaded.result);
    for id in &missing {
        eprintln!("No bookmark with id {id}");
    }
    if present.is_empty() {
        println!("Deleted 0 bookmarks");
        return Ok(());
    }

    let count = present.len();
    view_model.dispatch(BookmarkIntent::ToggleEditMode);
    for id in present {
        view_model.dispatch(BookmarkIntent::ToggleSelection(id));
    }
    view_model.dispatch(BookmarkIntent::ConfirmDelete);

    let state = tokio::time::timeout(
        WAIT_TIMEOUT,
        states.wait_for(|s| s.is_delete_images || s.user_message.is_some()),
    )
    .await
    .wrap_err("Timed out waiting for deletion")?
    .map_err(|_| eyre!("Bookmark view model closed"))?
    .clone();

    match state.user_message {
        Some(message) if !state.is_delete_images => Err(eyre!("{message}")),
        _ => {
            println!("Deleted {count} bookmarks");
            Ok(())
        }
    }
}

/// Splits requested ids into bookmarked and unknown ones, dropping repeats.
///
/// Each id is selected at most once, since selecting twice unselects it.
fn partition_ids(requested: Vec<String>, bookmarks: &[Image]) -> (Vec<String>, Vec<String>) {
    let known: HashSet<&str> = bookmarks.iter().map(|image| image.id.as_str()).collect();
    let mut seen = HashSet::new();

    requested
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .partition(|id| known.contains(id.as_str()))
}

fn print_image(image: &Image) {
    println!(
        "{}\t{}\t{}\t{}",
        image.id,
        image.dimensions(),
        image.display_sitename,
        image.keyword
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(id: &str) -> Image {
        Image {
            id: id.to_string(),
            keyword: "cat".to_string(),
            collection: "blog".to_string(),
            thumbnail_url: String::new(),
            image_url: id.to_string(),
            width: 1,
            height: 1,
            display_sitename: String::new(),
            doc_url: String::new(),
            datetime: chrono::DateTime::parse_from_rfc3339("2024-03-01T12:00:00+09:00").unwrap(),
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn repeated_ids_are_selected_once() {
        let (present, missing) = partition_ids(ids(&["x", "x", "y", "x"]), &[bookmark("x"), bookmark("y")]);
        assert_eq!(present, ids(&["x", "y"]));
        assert!(missing.is_empty());
    }

    #[test]
    fn unknown_ids_are_reported_separately() {
        let (present, missing) = partition_ids(ids(&["x", "gone", "gone"]), &[bookmark("x")]);
        assert_eq!(present, ids(&["x"]));
        assert_eq!(missing, ids(&["gone"]));
    }
}
