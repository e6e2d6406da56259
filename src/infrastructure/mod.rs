//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where bookmarks, logs, and configuration live on the host.

pub mod paths;

pub use paths::{bookmarks_file, default_config_file, default_data_dir, expand_tilde};
