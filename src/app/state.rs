//! Bookmark screen state snapshot.
//!
//! [`BookmarkUiState`] is the single value rendered by the bookmark screen. It is
//! owned by [`BookmarkViewModel`](crate::app::BookmarkViewModel) and only ever
//! replaced as a whole through its [`StateHolder`](crate::app::StateHolder).

use crate::domain::{Image, UserMessage};

/// Everything the bookmark screen needs to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkUiState {
    /// `true` while the current list or search query has not delivered its first value.
    pub is_loading: bool,

    /// Images of the current view ("all bookmarks" or "search results"), in store order.
    pub result: Vec<Image>,

    /// Whether selection checkboxes are shown.
    pub is_edit_mode: bool,

    /// Whether the last deletion attempt succeeded.
    ///
    /// Reset to `false` whenever edit mode is toggled or exited.
    pub is_delete_images: bool,

    /// Message to show to the user, if any.
    ///
    /// Set on failures only; nothing clears it afterwards.
    pub user_message: Option<UserMessage>,
}

impl BookmarkUiState {
    /// Returns `true` if a query finished and produced no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.result.is_empty()
    }
}
