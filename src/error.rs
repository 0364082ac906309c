//! Error types for the gallery-admin library
//!
//! Every operation in the library reports failure through [`GalleryError`].
//! The command-line front ends catch these at the command boundary, log them,
//! and turn them into a non-zero exit status.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum GalleryError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Source image does not exist
    #[error("Source image not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Source exists but does not decode as a raster image
    #[error("Invalid image file {path}: {reason}")]
    InvalidImage { path: PathBuf, reason: String },

    /// Gallery index file does not exist
    #[error("Gallery index not found: {path}")]
    IndexNotFound { path: PathBuf },

    /// Document does not contain two `---` delimiters
    #[error("Invalid index format in {path}: missing front matter delimiters")]
    MalformedDocument { path: PathBuf },

    /// Front matter block could not be decoded or has the wrong shape
    #[error("Invalid front matter in {path}: {reason}")]
    InvalidFrontMatter { path: PathBuf, reason: String },

    /// Writing a file (image or index) failed
    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Album scaffolding would overwrite an existing index
    #[error("Album already exists: {name}")]
    AlbumExists { name: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Multiple errors (for batch operations)
    #[error("{} errors occurred", errors.len())]
    Multiple { errors: Vec<GalleryError> },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GalleryError>;

impl GalleryError {
    /// Create a new source-not-found error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a new invalid image error
    pub fn invalid_image(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new index-not-found error
    pub fn index_not_found(path: impl Into<PathBuf>) -> Self {
        Self::IndexNotFound { path: path.into() }
    }

    /// Create a new malformed document error
    pub fn malformed_document(path: impl Into<PathBuf>) -> Self {
        Self::MalformedDocument { path: path.into() }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new write failure error
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a new album-exists error
    pub fn album_exists(name: impl Into<String>) -> Self {
        Self::AlbumExists { name: name.into() }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a multiple errors wrapper
    pub fn multiple(errors: Vec<GalleryError>) -> Self {
        Self::Multiple { errors }
    }

    /// Attach a file path to an error raised while decoding a front matter block.
    ///
    /// YAML errors from `serde_yaml` know nothing about the file they came
    /// from, so the document layer rewraps them here.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Yaml(e) => Self::invalid_front_matter(path, e.to_string()),
            Self::InvalidFrontMatter { reason, .. } => Self::invalid_front_matter(path, reason),
            Self::MalformedDocument { .. } => Self::malformed_document(path),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = GalleryError::input_not_found("cat.jpg");
        assert!(matches!(err, GalleryError::InputNotFound { .. }));
        assert_eq!(err.to_string(), "Source image not found: cat.jpg");
    }

    #[test]
    fn test_with_path_rewraps_yaml_errors() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err = GalleryError::from(yaml_err).with_path("images/beach/index.html");
        match err {
            GalleryError::InvalidFrontMatter { path, .. } => {
                assert_eq!(path, PathBuf::from("images/beach/index.html"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_with_path_leaves_other_errors_alone() {
        let err = GalleryError::validation("nope").with_path("x");
        assert!(matches!(err, GalleryError::Validation { .. }));
    }

    #[test]
    fn test_multiple_errors_message() {
        let errors = vec![
            GalleryError::validation("test"),
            GalleryError::index_not_found("images/a/index.html"),
        ];
        assert_eq!(GalleryError::multiple(errors).to_string(), "2 errors occurred");
    }
}
