//! Search-images: image search through the Kakao API with a local bookmark collection.
//!
//! The crate provides:
//! - An HTTP client for the Kakao image search API
//! - A persistent bookmark store backed by a JSON file with continuous query streams
//! - A bookmark view model with edit mode, pending deletions, and user messages
//! - A command-line front end (`search-images`)

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Intent dispatching                               │
//! │  - Query supersession                               │
//! │  - Observable UI state                              │
//! └─────────────────────────────────────────────────────┘
//!                  │                          │
//! ┌─────────────────────────┐   ┌─────────────────────────┐
//! │ Storage Layer           │   │ API Layer               │
//! │ (storage/)              │   │ (api/)                  │
//! │ - JSON I/O              │   │ - Kakao image search    │
//! │ - Fuzzy keyword search  │   │ - Response models       │
//! │ - Continuous streams    │   │                         │
//! └─────────────────────────┘   └─────────────────────────┘
//!                  │                          │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │  ← Core types
//! │  - Error types (domain/error)                       │
//! │  - Image model (domain/image)                       │
//! │  - User messages (domain/message)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber                               │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Kakao image search client
//! - [`app`]: Bookmark view model with intent dispatching
//! - [`domain`]: Core domain types (Image, errors, user messages)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: JSON file persistence with fuzzy keyword search
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! Configuration is read from `~/.config/search-images/config.toml`:
//!
//! ```toml
//! api_key = "your-kakao-rest-api-key"
//! data_dir = "~/.local/share/search-images"
//! page_size = 30
//! trace_level = "debug"
//! ```
//!
//! Environment variables (`KAKAO_API_KEY`, `SEARCH_IMAGES_DATA_DIR`,
//! `SEARCH_IMAGES_TRACE_LEVEL`) override the file, and command-line flags
//! override both.
//!
//! # Examples
//!
//! ```no_run
//! use search_images::{initialize, BookmarkIntent, Config};
//!
//! # async fn demo() -> search_images::Result<()> {
//! let config = Config::load(None)?;
//! let view_model = initialize(&config)?;
//!
//! view_model.dispatch(BookmarkIntent::Search("sunset".to_string()));
//! let state = view_model
//!     .subscribe()
//!     .wait_for(|state| !state.is_loading)
//!     .await
//!     .map(|state| state.clone())
//!     .ok();
//! # Ok(())
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Latest Query Wins
//!
//! Each `LoadAll` or `Search` starts a new generation. Emissions from an older
//! query are dropped inside the same atomic state update that would apply them,
//! so a superseded query can never overwrite a newer result.
//!
//! ## Continuous Streams
//!
//! The store re-emits query results after every write, so deleting bookmarks
//! refreshes the visible list without re-issuing the query.

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;

pub use app::{BookmarkIntent, BookmarkUiState, BookmarkViewModel};
pub use domain::{Image, Result, SearchImagesError, UserMessage};
pub use storage::{ImageStore, JsonImageStore};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable holding the Kakao REST API key.
pub const ENV_API_KEY: &str = "KAKAO_API_KEY";

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "SEARCH_IMAGES_DATA_DIR";

/// Environment variable overriding the trace level.
pub const ENV_TRACE_LEVEL: &str = "SEARCH_IMAGES_TRACE_LEVEL";

/// Default number of images requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Application configuration.
///
/// Values are layered: defaults, then the TOML file, then environment
/// variables, then command-line flags. Missing TOML keys keep their defaults.
///
/// # Example
///
/// ```toml
/// api_key = "0123456789abcdef"
/// api_base_url = "https://dapi.kakao.com"
/// data_dir = "~/pictures/bookmarks"
/// page_size = 50
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the bookmark store and the log file.
    ///
    /// A leading `~` is expanded. Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Kakao REST API key. Required only for searching the API.
    pub api_key: Option<String>,

    /// Base URL of the image search API. Default: `https://dapi.kakao.com`
    pub api_base_url: String,

    /// Number of images requested per page (1-80). Default: 30
    pub page_size: u32,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            api_key: None,
            api_base_url: api::DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the text is not valid TOML or a value has
    /// the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use search_images::Config;
    ///
    /// let config = Config::from_toml_str("page_size = 10\ntrace_level = \"debug\"")?;
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// assert!(config.api_key.is_none());
    /// # Ok::<(), search_images::SearchImagesError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SearchImagesError::Config(e.to_string()))
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read and a `Config` error if
    /// it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| {
            SearchImagesError::Config(format!("{}: {e}", path.display()))
        })
    }

    /// Loads configuration from `path`, or the default config file, then applies
    /// environment overrides.
    ///
    /// A missing default config file is not an error; a missing explicit `path` is.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match infrastructure::default_config_file() {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides looked up through `lookup`. Blank values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = get(ENV_TRACE_LEVEL) {
            self.trace_level = Some(level);
        }
    }

    /// Returns the data directory with `~` expanded, or the platform default.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.as_ref().map_or_else(infrastructure::default_data_dir, |dir| {
            infrastructure::expand_tilde(&dir.to_string_lossy())
        })
    }

    /// Returns the path of the bookmark store file.
    #[must_use]
    pub fn bookmarks_path(&self) -> PathBuf {
        infrastructure::bookmarks_file(&self.resolved_data_dir())
    }
}

/// Opens the bookmark store configured by `config`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the store file
/// is unreadable.
pub fn open_store(config: &Config) -> Result<Arc<JsonImageStore>> {
    JsonImageStore::open(config.bookmarks_path()).map(Arc::new)
}

/// Opens the configured store and creates a bookmark view model over it.
///
/// The view model immediately starts loading every bookmark.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
///
/// # Panics
///
/// Panics if called outside the context of a Tokio runtime.
pub fn initialize(config: &Config) -> Result<BookmarkViewModel> {
    tracing::debug!(data_dir = ?config.resolved_data_dir(), "initializing bookmark view model");

    let store = open_store(config)?;
    Ok(BookmarkViewModel::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://dapi.kakao.com");
        assert_eq!(config.page_size, 30);
        assert!(config.api_key.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("api_key = \"abc\"").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = Config::from_toml_str("page_size = \"many\"").unwrap_err();
        assert!(matches!(err, SearchImagesError::Config(_)));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::from_toml_str("api_key = \"from-file\"\ntrace_level = \"warn\"").unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_API_KEY, "from-env"),
            (ENV_DATA_DIR, "/srv/images"),
            (ENV_TRACE_LEVEL, " "),
        ]
        .into_iter()
        .collect();

        config.apply_env_from(|name| env.get(name).map(|v| (*v).to_string()));

        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/images")));
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }

    #[test]
    fn bookmarks_path_uses_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/images")),
            ..Config::default()
        };
        assert_eq!(config.bookmarks_path(), PathBuf::from("/srv/images/bookmarks.json"));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 12\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.page_size, 12);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[tokio::test]
    async fn initialize_opens_store_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("nested")),
            ..Config::default()
        };

        let view_model = initialize(&config).unwrap();
        let mut states = view_model.subscribe();
        let state = states.wait_for(|s| !s.is_loading).await.unwrap().clone();

        assert!(state.result.is_empty());
        assert!(dir.path().join("nested").is_dir());
    }
}
