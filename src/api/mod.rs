//! Kakao image search API client.
//!
//! Fetches pages of images for a query and converts them into domain
//! [`Image`](crate::domain::Image)s that can be bookmarked into an image store.
//! No retry or backoff is applied; failures surface as
//! [`SearchImagesError`](crate::SearchImagesError) values.
//!
//! # Modules
//!
//! - `client`: Authenticated HTTP client and request validation
//! - `models`: Response wire types and the converted [`SearchPage`]

pub mod client;
pub mod models;

pub use client::{ImageSearchClient, DEFAULT_BASE_URL, MAX_PAGE, MAX_PAGE_SIZE};
pub use models::{ImageDocument, MetaData, SearchPage, SearchResponse};
