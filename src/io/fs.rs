//! Staged and atomic file writes
//!
//! Everything the tools write goes through a temporary file created next to
//! the destination and renamed into place, so readers never observe a
//! half-written index or image.

use crate::error::{GalleryError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A file written to a temporary location, not yet visible at its target
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Create the parent directories of `target` and an empty staging file next to it
    pub fn new(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(parent).map_err(|e| GalleryError::write_failure(parent, e))?;
        let temp =
            NamedTempFile::new_in(parent).map_err(|e| GalleryError::write_failure(&target, e))?;

        Ok(Self { temp, target })
    }

    /// Append bytes to the staged content
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.temp
            .write_all(bytes)
            .map_err(|e| GalleryError::write_failure(&self.target, e))
    }

    /// Where [`commit`](Self::commit) will place the file
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Path of the staging file itself
    pub fn staged_path(&self) -> &Path {
        self.temp.path()
    }

    /// Move the staged content over the target, replacing any existing file.
    ///
    /// The target keeps the permissions of the file it replaces; new files
    /// are made world-readable.
    pub fn commit(mut self) -> Result<()> {
        let target = self.target;
        self.temp
            .flush()
            .map_err(|e| GalleryError::write_failure(&target, e))?;

        let previous = fs::metadata(&target).ok().map(|m| m.permissions());

        self.temp
            .persist(&target)
            .map_err(|e| GalleryError::write_failure(&target, e.error))?;

        match previous {
            Some(permissions) => fs::set_permissions(&target, permissions)
                .map_err(|e| GalleryError::write_failure(&target, e))?,
            None => set_default_permissions(&target)?,
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
        .map_err(|e| GalleryError::write_failure(path, e))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Replace `path` with `content` atomically
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let mut staged = StagedFile::new(path)?;
    staged.write_all(content)?;
    staged.commit()
}

/// Delete a file; a missing file is not an error.
///
/// Returns whether a file was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GalleryError::write_failure(path, e)),
    }
}
