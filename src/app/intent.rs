//! User intents accepted by the bookmark screen.
//!
//! Intents are the only way the presentation layer changes bookmark state. They
//! can be invoked as methods on [`BookmarkViewModel`](crate::app::BookmarkViewModel)
//! or passed as values to its `dispatch` method.

/// A user action on the bookmark screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkIntent {
    /// Shows every bookmark, replacing any active search.
    LoadAll,
    /// Shows the bookmarks matching the keyword, replacing any active query.
    Search(String),
    /// Flips edit mode and clears the selection.
    ToggleEditMode,
    /// Leaves edit mode and clears the selection.
    ExitEditMode,
    /// Selects or unselects an image for deletion.
    ToggleSelection(String),
    /// Deletes the selected images.
    ConfirmDelete,
}
