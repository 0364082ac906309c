//! Site configuration and the fixed tables the tools operate on
//!
//! All paths handled by the library are relative to a site root. The tables
//! below are the process-wide constants of the gallery layout: they are
//! exported so callers (and tests) can inspect them instead of relying on
//! literals buried in the operations.

use std::path::{Path, PathBuf};

/// Front matter keys that are written first, in this order, on every save.
/// Keys not listed here follow in the order they were read.
pub const PREFERRED_KEY_ORDER: &[&str] = &[
    "layout",
    "title",
    "description",
    "active",
    "header-img",
    "album-title",
    "images",
];

/// Album folder names left behind by the old plural/singular layout.
/// `fix-paths` rewrites `/albums/{name}/` for each of these.
pub const LEGACY_ALBUM_SEGMENTS: &[&str] = &["landscape", "landscapes", "portrait", "portraits"];

/// Index files visited by the `fix-paths` batch, relative to the site root.
pub const FIX_PATHS_TARGETS: &[&str] = &["images/landscape/index.html", "images/portrait/index.html"];

/// Album folders renamed (or merged) by `rename-folders`, as `(old, new)`.
pub const FOLDER_RENAMES: &[(&str, &str)] = &[("landscapes", "landscape"), ("portraits", "portrait")];

/// Image extensions recognized when listing an album folder.
pub const GALLERY_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Copyright line used when the caller leaves it blank.
pub const DEFAULT_COPYRIGHT: &str = "© Your Name";

/// JPEG quality used by [`MaterializeMode::Normalize`].
pub const NORMALIZE_JPEG_QUALITY: u8 = 85;

/// Folder under each album holding the thumbnails.
pub const THUMBS_DIR: &str = "thumbs";

/// Thumbnails fit inside a square of this many pixels.
pub const THUMBNAIL_MAX_SIZE: u32 = 400;

/// How a source image becomes the stored gallery image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterializeMode {
    /// Byte-for-byte copy of the validated source
    #[default]
    Copy,
    /// Flatten transparency onto white and re-encode as JPEG
    Normalize,
}

/// How `remove` decides an `images` entry refers to a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoveMatch {
    /// Last path segment equals the filename
    #[default]
    Exact,
    /// Path ends with the filename; `cat.jpg` also matches `bigcat.jpg`
    Suffix,
}

impl RemoveMatch {
    /// Check whether `image_path` refers to `filename` under this policy
    pub fn matches(self, image_path: &str, filename: &str) -> bool {
        match self {
            Self::Exact => image_path.rsplit('/').next() == Some(filename),
            Self::Suffix => image_path.ends_with(filename),
        }
    }
}

/// Configuration shared by every gallery operation
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory containing `images/`
    pub root: PathBuf,
    /// Copy or normalize on `process`
    pub materialize: MaterializeMode,
    /// Placeholder copyright for entries added without one
    pub default_copyright: String,
    /// Entry matching policy for `remove`
    pub remove_match: RemoveMatch,
    /// Write a thumbnail next to each processed image
    pub thumbnails: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            materialize: MaterializeMode::default(),
            default_copyright: DEFAULT_COPYRIGHT.to_string(),
            remove_match: RemoveMatch::default(),
            thumbnails: true,
        }
    }
}

impl SiteConfig {
    /// Create a configuration rooted at `root` with default settings
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// `images/albums` under the site root
    pub fn albums_dir(&self) -> PathBuf {
        self.root.join("images").join("albums")
    }

    /// Folder holding the stored images of `gallery`
    pub fn album_dir(&self, gallery: &str) -> PathBuf {
        self.albums_dir().join(gallery)
    }

    /// On-disk location of a stored image
    pub fn image_file(&self, gallery: &str, filename: &str) -> PathBuf {
        self.album_dir(gallery).join(filename)
    }

    /// Thumbnail of a stored image
    pub fn thumbnail_file(&self, gallery: &str, filename: &str) -> PathBuf {
        self.album_dir(gallery).join(THUMBS_DIR).join(filename)
    }

    /// Folder holding the index page of `gallery`
    pub fn gallery_dir(&self, gallery: &str) -> PathBuf {
        self.root.join("images").join(gallery)
    }

    /// The front matter document of `gallery`
    pub fn index_file(&self, gallery: &str) -> PathBuf {
        self.gallery_dir(gallery).join("index.html")
    }

    /// Resolve a root-relative path
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// Absolute site URL path recorded in an `images` entry
pub fn site_image_path(gallery: &str, filename: &str) -> String {
    format!("/images/albums/{}/{}", gallery, filename)
}
