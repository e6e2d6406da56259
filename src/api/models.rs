//! Wire types of the Kakao image search API.

use crate::domain::Image;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Paging information returned with every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    /// Number of documents matching the query.
    pub total_count: u32,

    /// Number of documents reachable through paging.
    pub pageable_count: u32,

    /// `true` when the current page is the last one.
    pub is_end: bool,
}

/// One image document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDocument {
    #[serde(default)]
    pub collection: String,
    pub thumbnail_url: String,
    pub image_url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub display_sitename: String,
    #[serde(default)]
    pub doc_url: String,
    pub datetime: DateTime<FixedOffset>,
}

impl ImageDocument {
    /// Converts the document into a domain image found under `keyword`.
    ///
    /// The image URL doubles as the image id.
    #[must_use]
    pub fn into_image(self, keyword: &str) -> Image {
        Image {
            id: self.image_url.clone(),
            keyword: keyword.to_string(),
            collection: self.collection,
            thumbnail_url: self.thumbnail_url,
            image_url: self.image_url,
            width: self.width,
            height: self.height,
            display_sitename: self.display_sitename,
            doc_url: self.doc_url,
            datetime: self.datetime,
        }
    }
}

/// Raw search response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub meta: MetaData,
    #[serde(default)]
    pub documents: Vec<ImageDocument>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "errorType", default)]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

/// One page of search results converted to domain images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub query: String,
    pub page: u32,
    pub meta: MetaData,
    pub images: Vec<Image>,
}

impl SearchPage {
    /// Builds a page from a raw response.
    #[must_use]
    pub fn from_response(query: &str, page: u32, response: SearchResponse) -> Self {
        let images = response
            .documents
            .into_iter()
            .map(|doc| doc.into_image(query))
            .collect();
        Self {
            query: query.to_string(),
            page,
            meta: response.meta,
            images,
        }
    }

    /// Returns the next page number, or `None` on the last page.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.meta.is_end {
            None
        } else {
            Some(self.page + 1)
        }
    }
}
