//! Writing gallery index pages back to disk

use crate::core::GalleryDocument;
use crate::error::Result;
use crate::io::fs::write_atomic;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a write operation
#[derive(Debug)]
pub struct WriteResult {
    /// Whether the file content actually changed
    pub modified: bool,
    /// Path the content was written to
    pub output_path: PathBuf,
}

/// Gallery index writer
#[derive(Debug, Clone, Default)]
pub struct DocumentWriter;

impl DocumentWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self
    }

    /// Render `document` and replace the file at `path` with it.
    ///
    /// Unchanged content is not rewritten.
    pub fn write_file<P: AsRef<Path>>(
        &self,
        document: &GalleryDocument,
        path: P,
    ) -> Result<WriteResult> {
        let path = path.as_ref();
        let new_content = document.render()?;

        let modified = match fs::read_to_string(path) {
            Ok(original) => original != new_content,
            Err(_) => true,
        };

        if modified {
            write_atomic(path, new_content.as_bytes())?;
            log::debug!("wrote {}", path.display());
        } else {
            log::debug!("{} unchanged", path.display());
        }

        Ok(WriteResult {
            modified,
            output_path: path.to_path_buf(),
        })
    }

    /// Put back content captured before an edit
    pub fn restore(&self, path: &Path, original: &str) -> Result<()> {
        log::warn!("restoring {}", path.display());
        write_atomic(path, original.as_bytes())
    }
}
