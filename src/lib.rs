//! gallery-admin: tools for managing a static photo-gallery site
//!
//! A site keeps its images under `images/albums/{gallery}/` and describes each
//! gallery with a page at `images/{gallery}/index.html` whose YAML front
//! matter lists the images. This library stores images into albums and keeps
//! those front matter blocks in sync, touching nothing else in the page.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gallery_admin::{GalleryManager, Result, SiteConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let gallery = GalleryManager::new(SiteConfig::with_root("site"));
//!
//!     // Copy the image into images/albums/beach/ and list it in the index
//!     gallery.process_image(Path::new("cat.jpg"), "beach", "cat.jpg", "A cat", "Jane")?;
//!
//!     // Drop it again
//!     gallery.remove_image("beach", "cat.jpg")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Editing a page directly
//!
//! ```rust
//! use gallery_admin::{GalleryDocument, ImageEntry, RemoveMatch};
//!
//! let mut doc = GalleryDocument::parse("---\ntitle: Beach\nimages: []\n---\n<body>\n").unwrap();
//! doc.append_image(ImageEntry::for_upload("beach", "cat.jpg", "A cat", "Jane", "© Your Name")).unwrap();
//! assert_eq!(doc.images().len(), 1);
//! doc.remove_image("cat.jpg", RemoveMatch::Exact).unwrap();
//! assert!(doc.images().is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`core`](crate::core): page splitting, the typed front matter record, path rewriting
//! - [`io`]: reading pages and staged/atomic writes
//! - [`imaging`]: validating and storing images
//! - [`gallery`]: operations combining the above (process, remove, migrations)
//! - [`config`]: site layout and the fixed tables the operations use

pub use config::{MaterializeMode, RemoveMatch, SiteConfig};
pub use crate::core::{FrontMatter, GalleryDocument, ImageEntry, PathRewriter};
pub use error::{GalleryError, Result};
pub use gallery::{BatchReport, FolderOutcome, GalleryImage, GalleryManager, RemoveOutcome};
pub use imaging::{ImageMaterializer, SourceImage};
pub use io::{DocumentReader, DocumentWriter, ReaderConfig, WriteResult};

pub mod config;
pub mod core;
pub mod error;
pub mod gallery;
pub mod imaging;
pub mod io;
pub mod logging;
