//! Image store abstraction.
//!
//! This module defines the [`ImageStore`] trait consumed by the bookmark view model.
//! The view model never touches persistence directly; any backend that can
//! produce continuous collection streams and perform batch deletions fits.
//!
//! # Design Philosophy
//!
//! The trait is minimal and shaped after the view model's needs, not a generic
//! repository. Streams are boxed so the trait stays object-safe and stores can be
//! shared as `Arc<dyn ImageStore>` across many screen sessions.

use crate::domain::error::Result;
use crate::domain::Image;
use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use std::collections::HashSet;

/// Stream of full collection snapshots, in store order.
pub type ImageStream = BoxStream<'static, Result<Vec<Image>>>;

/// Abstraction over bookmarked-image persistence.
///
/// Implementations must be safe for concurrent use from many view models.
///
/// # Implementations
///
/// - [`JsonImageStore`](crate::storage::JsonImageStore): JSON file with atomic writes
pub trait ImageStore: Send + Sync {
    /// Streams the complete bookmark collection.
    ///
    /// Emits the current collection immediately, then re-emits after every
    /// change. Does not terminate while the store is alive.
    fn stream_all(&self) -> ImageStream;

    /// Streams the bookmarks matching `keyword`.
    ///
    /// Same shape as [`stream_all`](Self::stream_all), filtered. Empty keyword
    /// behavior is backend-defined.
    fn stream_search(&self, keyword: &str) -> ImageStream;

    /// Deletes every image whose id is in `ids`.
    ///
    /// Resolves once with success or failure. Atomicity of the deletion is the
    /// implementation's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion could not be persisted.
    fn delete_batch(&self, ids: HashSet<String>) -> BoxFuture<'static, Result<()>>;

    /// Bookmarks `images`, updating entries whose id already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the images could not be persisted.
    fn save(&self, images: Vec<Image>) -> BoxFuture<'static, Result<()>>;
}
