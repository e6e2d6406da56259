//! Domain layer for image search and bookmarks.
//!
//! Core types shared by every other layer, independent of HTTP, storage, or
//! runtime concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Image domain model
//! - [`message`]: User-facing message codes

pub mod error;
pub mod image;
pub mod message;

pub use error::{Result, SearchImagesError};
pub use image::Image;
pub use message::UserMessage;
