//! Storage record models for the persistence layer.
//!
//! Records are kept separate from the domain [`Image`] so the on-disk
//! representation can carry storage-only fields such as `saved_at`.

use crate::domain::Image;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Represents a bookmarked image in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique image identifier.
    pub id: String,

    /// Search term the image was bookmarked from.
    pub keyword: String,

    pub collection: String,
    pub thumbnail_url: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub display_sitename: String,
    pub doc_url: String,
    pub datetime: DateTime<FixedOffset>,

    /// Unix timestamp when the image was first bookmarked.
    pub saved_at: i64,
}

impl ImageRecord {
    /// Creates a record for `image`, stamped with the current time.
    #[must_use]
    pub fn from_image(image: Image) -> Self {
        Self {
            id: image.id,
            keyword: image.keyword,
            collection: image.collection,
            thumbnail_url: image.thumbnail_url,
            image_url: image.image_url,
            width: image.width,
            height: image.height,
            display_sitename: image.display_sitename,
            doc_url: image.doc_url,
            datetime: image.datetime,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl From<ImageRecord> for Image {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id,
            keyword: record.keyword,
            collection: record.collection,
            thumbnail_url: record.thumbnail_url,
            image_url: record.image_url,
            width: record.width,
            height: record.height,
            display_sitename: record.display_sitename,
            doc_url: record.doc_url,
            datetime: record.datetime,
        }
    }
}
