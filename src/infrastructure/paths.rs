//! Path utilities for storage, logs, and configuration.
//!
//! Platform directories are resolved with `dirs-next`; every location can be
//! overridden through [`Config`](crate::Config).

use std::path::{Path, PathBuf};

/// Directory name used under the platform data and config directories.
pub const APP_DIR_NAME: &str = "search-images";

/// File name of the bookmark store inside the data directory.
pub const BOOKMARKS_FILE: &str = "bookmarks.json";

/// File name of the log inside the data directory.
pub const LOG_FILE: &str = "search-images.log";

/// Returns the default data directory.
///
/// Resolves to the platform data directory (for example
/// `~/.local/share/search-images` on Linux), or a directory under the system
/// temp directory when no home directory is known.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs_next::data_dir().map_or_else(
        || std::env::temp_dir().join(APP_DIR_NAME),
        |dir| dir.join(APP_DIR_NAME),
    )
}

/// Returns the default configuration file path, if a config directory exists.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// Returns the bookmark store path inside `data_dir`.
#[must_use]
pub fn bookmarks_file(data_dir: &Path) -> PathBuf {
    data_dir.join(BOOKMARKS_FILE)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or with no known home directory, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use search_images::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs_next::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmarks_file_lives_in_data_dir() {
        let dir = PathBuf::from("/data");
        assert_eq!(bookmarks_file(&dir), PathBuf::from("/data/bookmarks.json"));
    }

    #[test]
    fn expands_home_prefix() {
        if let Some(home) = dirs_next::home_dir() {
            assert_eq!(expand_tilde("~/pictures"), home.join("pictures"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("relative/~"), PathBuf::from("relative/~"));
    }

    #[test]
    fn default_data_dir_ends_with_app_name() {
        assert!(default_data_dir().ends_with(APP_DIR_NAME));
    }
}
