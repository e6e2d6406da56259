//! Storage layer for bookmarked images.
//!
//! Provides the [`ImageStore`] abstraction the bookmark view model depends on,
//! plus a JSON file implementation.
//!
//! # Modules
//!
//! - `backend`: Store trait consumed by the view model
//! - `json`: JSON file-based store with change streams
//! - `search`: Keyword matching for bookmark searches
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod models;
pub mod search;

pub use backend::{ImageStore, ImageStream};
pub use json::JsonImageStore;
pub use models::ImageRecord;
pub use search::{filter_records, KeywordQuery};
