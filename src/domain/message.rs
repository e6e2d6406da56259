//! User-facing message codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed, non-parameterized message shown to the user.
///
/// The presentation layer maps each code to localized text; [`fmt::Display`]
/// provides the default English wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserMessage {
    /// A batch deletion reported failure.
    GenericError,

    /// The bookmark list or a bookmark search could not be loaded.
    LoadFailed,
}

impl UserMessage {
    /// Stable identifier of the message, suitable for resource lookup.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GenericError => "error_message",
            Self::LoadFailed => "load_failed_message",
        }
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenericError => f.write_str("Something went wrong. Please try again."),
            Self::LoadFailed => f.write_str("Could not load bookmarks."),
        }
    }
}
