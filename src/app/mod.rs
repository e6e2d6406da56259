//! Application layer for the bookmark screen.
//!
//! Sits between the presentation layer and the storage layer. The presentation
//! layer renders [`BookmarkUiState`] snapshots and forwards user intents; the
//! view model turns intents into state transitions and store calls.
//!
//! # Architecture
//!
//! The layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Intent → BookmarkViewModel → StateHolder → UiState snapshots → Screen
//!                     │      ↑
//!                     ▼      │
//!                  ImageStore streams / delete results
//! ```
//!
//! # Modules
//!
//! - [`bookmark`]: The bookmark view model
//! - [`holder`]: Observable single-writer state container
//! - [`intent`]: User intents accepted by the view model
//! - [`selection`]: Pending deletion selection set
//! - [`state`]: Bookmark screen state snapshot
//!
//! # Example
//!
//! ```no_run
//! use search_images::app::{BookmarkIntent, BookmarkViewModel};
//! use search_images::storage::JsonImageStore;
//! use std::sync::Arc;
//!
//! # async fn demo() -> search_images::Result<()> {
//! let store = Arc::new(JsonImageStore::open("/tmp/bookmarks.json".into())?);
//! let view_model = BookmarkViewModel::new(store);
//!
//! view_model.dispatch(BookmarkIntent::Search("cat".to_string()));
//! let mut states = view_model.subscribe();
//! states.wait_for(|state| !state.is_loading).await.ok();
//! # Ok(())
//! # }
//! ```

pub mod bookmark;
pub mod holder;
pub mod intent;
pub mod selection;
pub mod state;

pub use bookmark::BookmarkViewModel;
pub use holder::StateHolder;
pub use intent::BookmarkIntent;
pub use selection::PendingSelection;
pub use state::BookmarkUiState;
