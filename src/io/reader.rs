//! Reading gallery index pages from disk

use crate::core::GalleryDocument;
use crate::error::{GalleryError, Result};
use std::fs;
use std::path::Path;

/// Configuration for the document reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to keep the raw file content so it can be restored later
    pub preserve_original: bool,
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<u64>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            preserve_original: false,
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
        }
    }
}

/// Gallery index reader
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read and decode the index page at `path`
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<GalleryDocument> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(GalleryError::index_not_found(path));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;
            if metadata.len() > max_size {
                return Err(GalleryError::validation(format!(
                    "File too large: {} ({} bytes, limit {} bytes)",
                    path.display(),
                    metadata.len(),
                    max_size
                )));
            }
        }

        let content = fs::read_to_string(path)?;
        log::debug!("read {} ({} bytes)", path.display(), content.len());

        self.parse_content(&content, path)
    }

    /// Decode page content that came from `path`
    pub fn parse_content(&self, content: &str, path: &Path) -> Result<GalleryDocument> {
        let document = GalleryDocument::parse(content).map_err(|e| e.with_path(path))?;

        if self.config.preserve_original {
            Ok(document.with_original_content(content.to_string()))
        } else {
            Ok(document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_index_not_found() {
        let err = DocumentReader::new()
            .read_file("/nonexistent/images/x/index.html")
            .unwrap_err();
        assert!(matches!(err, GalleryError::IndexNotFound { .. }));
    }

    #[test]
    fn test_errors_carry_the_file_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "no front matter here").unwrap();

        match DocumentReader::new().read_file(&path).unwrap_err() {
            GalleryError::MalformedDocument { path: p } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_yaml_errors_become_invalid_front_matter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "---\nimages: [\n---\n").unwrap();

        let err = DocumentReader::new().read_file(&path).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_preserve_original() {
        let reader = DocumentReader::with_config(ReaderConfig {
            preserve_original: true,
            ..Default::default()
        });
        let doc = reader
            .parse_content("---\ntitle: x\n---\n", &PathBuf::from("index.html"))
            .unwrap();
        assert_eq!(doc.original_content(), Some("---\ntitle: x\n---\n"));
    }

    #[test]
    fn test_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "---\ntitle: x\n---\n").unwrap();

        let reader = DocumentReader::with_config(ReaderConfig {
            max_file_size: Some(4),
            ..Default::default()
        });
        assert!(matches!(
            reader.read_file(&path).unwrap_err(),
            GalleryError::Validation { .. }
        ));
    }
}
