//! Logging setup built on `tracing`.
//!
//! Every module emits structured `tracing` events and spans. This module installs
//! the subscriber that filters them and writes them to a rotating log file in
//! the data directory.
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```no_run
//! use search_images::observability::init_tracing;
//! use search_images::Config;
//!
//! init_tracing(&Config::default(), false);
//! tracing::debug!("logging initialized");
//! ```
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
