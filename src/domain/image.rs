//! Image domain model.
//!
//! An [`Image`] is one search result or bookmark. It is immutable once loaded:
//! the store owns it and everything above the store only reads it.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A searchable, bookmarkable image.
///
/// # Fields
///
/// - `id`: Unique identifier within a store (the image URL for API results)
/// - `keyword`: Search term the image was found under
/// - `collection`: Source collection reported by the API (`blog`, `news`, ...)
/// - `thumbnail_url` / `image_url`: Preview and full-size locations
/// - `width` / `height`: Pixel dimensions of the full-size image
/// - `display_sitename`: Human-readable name of the hosting site
/// - `doc_url`: Page the image was published on
/// - `datetime`: Publication timestamp as reported by the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub keyword: String,
    pub collection: String,
    pub thumbnail_url: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub display_sitename: String,
    pub doc_url: String,
    pub datetime: DateTime<FixedOffset>,
}

impl Image {
    /// Returns `true` if the image is wider than it is tall.
    #[must_use]
    pub const fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Formats the dimensions as `WIDTHxHEIGHT`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use search_images::Image;
    /// # let image = Image {
    /// #     id: "a".into(), keyword: "cat".into(), collection: "blog".into(),
    /// #     thumbnail_url: String::new(), image_url: "a".into(), width: 640, height: 480,
    /// #     display_sitename: String::new(), doc_url: String::new(),
    /// #     datetime: chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00+09:00").unwrap(),
    /// # };
    /// assert_eq!(image.dimensions(), "640x480");
    /// ```
    #[must_use]
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}
