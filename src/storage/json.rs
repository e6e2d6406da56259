//! JSON file-based image store.
//!
//! This module provides a simple, human-readable store using JSON serialization.
//! It uses atomic file writes (write-to-temp + rename) to prevent corruption on
//! crashes. The in-memory collection lives in a `tokio::sync::watch` channel so
//! every open stream re-emits after a change.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Write**: O(n) - serializes and writes entire dataset
//! - **Best for**: a few thousand bookmarks, infrequent writes

use crate::domain::error::{Result, SearchImagesError};
use crate::domain::Image;
use crate::storage::backend::{ImageStore, ImageStream};
use crate::storage::models::ImageRecord;
use crate::storage::search::filter_records;
use futures_util::future::BoxFuture;
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// JSON storage container format.
///
/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Bookmarked images in bookmark order.
    #[serde(default)]
    images: Vec<ImageRecord>,
}

/// JSON file image store.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "images": [
///     {
///       "id": "https://example.com/cat.jpg",
///       "keyword": "cat",
///       "collection": "blog",
///       "thumbnail_url": "https://search.example.com/thumb/cat",
///       "image_url": "https://example.com/cat.jpg",
///       "width": 640,
///       "height": 480,
///       "display_sitename": "Daum blog",
///       "doc_url": "https://blog.example.com/123",
///       "datetime": "2024-03-01T12:00:00+09:00",
///       "saved_at": 1709262000
///     }
///   ]
/// }
/// ```
///
/// Writes run on Tokio's blocking pool; the returned futures do no work until
/// polled, so dropping one before it runs leaves the file untouched.
pub struct JsonImageStore {
    inner: Arc<StoreFile>,
}

/// File-backed state shared with blocking write jobs.
struct StoreFile {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory collection, broadcast to open streams.
    records: watch::Sender<Vec<ImageRecord>>,

    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonImageStore {
    /// Creates or opens a JSON image store.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the file
    /// is created on the first write. Parent directories are created immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON image store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StorageData {
                version: STORAGE_VERSION,
                images: Vec::new(),
            }
        };

        tracing::debug!(image_count = data.images.len(), "image store opened");

        let (records, _) = watch::channel(data.images);
        Ok(Self {
            inner: Arc::new(StoreFile {
                file_path,
                records,
                write_lock: Mutex::new(()),
            }),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.file_path
    }

    /// Returns the number of bookmarked images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.records.borrow().len()
    }

    /// Returns `true` if nothing is bookmarked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `job` against the store file on the blocking pool.
    fn run_blocking<F>(&self, job: F) -> BoxFuture<'static, Result<()>>
    where
        F: FnOnce(&StoreFile) -> Result<()> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            tokio::task::spawn_blocking(move || job(&inner))
                .await
                .map_err(|e| SearchImagesError::Storage(format!("store write task failed: {e}")))?
        })
    }

    fn stream_filtered(&self, keyword: String) -> ImageStream {
        let rx = self.inner.records.subscribe();

        stream::unfold((rx, keyword, true), |(mut rx, keyword, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }

            let images: Vec<Image> = {
                let records = rx.borrow_and_update();
                filter_records(&records, &keyword)
                    .into_iter()
                    .map(Image::from)
                    .collect()
            };

            tracing::trace!(keyword = %keyword, count = images.len(), "emitting images");
            Some((Ok(images), (rx, keyword, false)))
        })
        .boxed()
    }
}

fn load_from_file(path: &Path) -> Result<StorageData> {
    let contents = std::fs::read_to_string(path)?;
    let data: StorageData = serde_json::from_str(&contents)
        .map_err(|e| SearchImagesError::Storage(format!("failed to parse JSON: {e}")))?;

    if data.version > STORAGE_VERSION {
        return Err(SearchImagesError::Storage(format!(
            "unsupported storage version {}",
            data.version
        )));
    }

    tracing::debug!(
        version = data.version,
        images = data.images.len(),
        "loaded storage data"
    );

    Ok(data)
}

impl StoreFile {
    /// Saves `images` to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path.
    fn save_to_file(&self, images: &[ImageRecord]) -> Result<()> {
        tracing::debug!(path = ?self.file_path, count = images.len(), "saving storage data");

        let data = StorageData {
            version: STORAGE_VERSION,
            images: images.to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| SearchImagesError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("storage saved successfully");
        Ok(())
    }

    /// Applies `mutate` to a copy of the collection, persists it, then publishes it.
    ///
    /// The in-memory collection only changes once the write succeeded. Streams are
    /// not woken when `mutate` reports no change.
    fn modify<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<ImageRecord>) -> bool,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = self.records.borrow().clone();
        if !mutate(&mut next) {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        self.save_to_file(&next)?;
        self.records.send_replace(next);
        Ok(())
    }

    fn delete_now(&self, ids: &HashSet<String>) -> Result<()> {
        let _span = tracing::debug_span!("json_delete_batch", count = ids.len()).entered();

        if ids.is_empty() {
            return Ok(());
        }

        self.modify(|images| {
            let before = images.len();
            images.retain(|record| !ids.contains(&record.id));
            tracing::debug!(removed = before - images.len(), "images deleted");
            images.len() != before
        })
    }

    fn save_now(&self, new_images: Vec<Image>) -> Result<()> {
        let _span = tracing::debug_span!("json_save", count = new_images.len()).entered();

        if new_images.is_empty() {
            return Ok(());
        }

        self.modify(|images| {
            for image in new_images {
                if let Some(existing) = images.iter_mut().find(|r| r.id == image.id) {
                    let saved_at = existing.saved_at;
                    *existing = ImageRecord::from_image(image);
                    existing.saved_at = saved_at;
                } else {
                    images.push(ImageRecord::from_image(image));
                }
            }
            true
        })
    }
}

impl ImageStore for JsonImageStore {
    fn stream_all(&self) -> ImageStream {
        self.stream_filtered(String::new())
    }

    fn stream_search(&self, keyword: &str) -> ImageStream {
        self.stream_filtered(keyword.to_string())
    }

    fn delete_batch(&self, ids: HashSet<String>) -> BoxFuture<'static, Result<()>> {
        self.run_blocking(move |file| file.delete_now(&ids))
    }

    fn save(&self, images: Vec<Image>) -> BoxFuture<'static, Result<()>> {
        self.run_blocking(move |file| file.save_now(images))
    }
}

impl std::fmt::Debug for JsonImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonImageStore")
            .field("file_path", &self.inner.file_path)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
