//! Core document model: front matter record, page splitting and path rewriting

pub mod document;
pub mod front_matter;
pub mod paths;

pub use document::GalleryDocument;
pub use front_matter::{FrontMatter, ImageEntry};
pub use paths::{album_name_from_dir, PathRewriter};
