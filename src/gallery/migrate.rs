//! One-off layout migrations: legacy album paths and plural folder names

use super::GalleryManager;
use crate::config::{FIX_PATHS_TARGETS, FOLDER_RENAMES};
use crate::core::PathRewriter;
use crate::error::{GalleryError, Result};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Per-file results of a batch run; one failure does not stop the batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, GalleryError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fold the failures into a single error, if any
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(GalleryError::multiple(
                self.failed.into_iter().map(|(_, e)| e).collect(),
            ))
        }
    }
}

/// What happened to one legacy album folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOutcome {
    /// Source folder did not exist
    Missing { from: PathBuf },
    /// Source folder renamed to the target
    Renamed { from: PathBuf, to: PathBuf },
    /// Source entries moved into an existing target and the source removed
    Merged {
        from: PathBuf,
        to: PathBuf,
        moved: usize,
    },
}

impl GalleryManager {
    /// Rewrite legacy album paths in every index listed in [`FIX_PATHS_TARGETS`]
    pub fn fix_paths(&self) -> BatchReport {
        let files: Vec<PathBuf> = FIX_PATHS_TARGETS
            .iter()
            .map(|rel| self.config.resolve(rel))
            .collect();
        self.fix_paths_in_files(&files)
    }

    /// Rewrite legacy album paths in each of `files`; missing files are skipped
    pub fn fix_paths_in_files(&self, files: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        for file in files {
            if !file.exists() {
                warn!("Warning: {} not found", file.display());
                report.missing.push(file.clone());
                continue;
            }
            info!("Processing {}...", file.display());
            match self.fix_paths_in_file(file) {
                Ok(true) => {
                    info!("Updated {}", file.display());
                    report.updated.push(file.clone());
                }
                Ok(false) => {
                    info!("{} already up to date", file.display());
                    report.unchanged.push(file.clone());
                }
                Err(e) => {
                    error!("{}", e);
                    report.failed.push((file.clone(), e));
                }
            }
        }
        report
    }

    /// Rewrite legacy album paths in one index.
    ///
    /// The target album is the name of the folder holding the file with one
    /// trailing `s` removed. Returns whether the file changed.
    pub fn fix_paths_in_file(&self, index_path: &Path) -> Result<bool> {
        let rewriter = PathRewriter::for_index_file(index_path)?;
        let mut document = self.reader.read_file(index_path)?;
        let changed = document.rewrite_paths(&rewriter);
        log::debug!(
            "{}: {} paths rewritten to album {}",
            index_path.display(),
            changed,
            rewriter.target()
        );
        Ok(self.writer.write_file(&document, index_path)?.modified)
    }

    /// Rename or merge the album folders listed in [`FOLDER_RENAMES`]
    pub fn rename_folders(&self) -> Result<Vec<FolderOutcome>> {
        let base = self.config.albums_dir();
        let mut outcomes = Vec::new();
        let mut errors = Vec::new();

        for (old_name, new_name) in FOLDER_RENAMES {
            match rename_or_merge(&base.join(old_name), &base.join(new_name)) {
                Ok(outcome) => {
                    if !matches!(outcome, FolderOutcome::Missing { .. }) {
                        info!("Successfully processed {} -> {}", old_name, new_name);
                    }
                    outcomes.push(outcome);
                }
                Err(e) => {
                    error!("Error processing {}: {}", old_name, e);
                    errors.push(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(outcomes)
        } else {
            Err(GalleryError::multiple(errors))
        }
    }
}

/// Move `from` to `to`, merging into `to` when it already exists
pub fn rename_or_merge(from: &Path, to: &Path) -> Result<FolderOutcome> {
    if !from.exists() {
        info!("Folder {} not found - skipping", from.display());
        return Ok(FolderOutcome::Missing {
            from: from.to_path_buf(),
        });
    }

    if !to.exists() {
        info!("Renaming {} to {}", from.display(), to.display());
        fs::rename(from, to)?;
        return Ok(FolderOutcome::Renamed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }

    info!("Merging {} into {}", from.display(), to.display());
    let moved = merge_into(from, to)?;
    // Only directories that were merged entry by entry remain, and they are empty.
    fs::remove_dir_all(from)?;

    Ok(FolderOutcome::Merged {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        moved,
    })
}

/// Move the contents of `from` into the existing directory `to`.
///
/// Subdirectories present on both sides are merged recursively; anything else
/// is moved whole, replacing a file of the same name. Returns the number of
/// files and directories moved.
fn merge_into(from: &Path, to: &Path) -> Result<usize> {
    let mut moved = 0;
    let mut walker = WalkDir::new(from).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| GalleryError::Io(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| GalleryError::validation(e.to_string()))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            if target.is_dir() {
                continue;
            }
            walker.skip_current_dir();
        }

        fs::rename(entry.path(), &target)?;
        debug!("moved {} -> {}", entry.path().display(), target.display());
        moved += 1;
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rename_when_target_missing() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("landscapes");
        let to = dir.path().join("landscape");
        fs::create_dir(&from).unwrap();
        fs::write(from.join("a.jpg"), "a").unwrap();

        let outcome = rename_or_merge(&from, &to).unwrap();
        assert!(matches!(outcome, FolderOutcome::Renamed { .. }));
        assert!(!from.exists());
        assert!(to.join("a.jpg").exists());
    }

    #[test]
    fn test_merge_overwrites_and_removes_source() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("portraits");
        let to = dir.path().join("portrait");
        fs::create_dir(&from).unwrap();
        fs::create_dir(&to).unwrap();
        fs::write(from.join("a.jpg"), "new").unwrap();
        fs::write(from.join("b.jpg"), "b").unwrap();
        fs::write(to.join("a.jpg"), "old").unwrap();

        let outcome = rename_or_merge(&from, &to).unwrap();
        assert_eq!(
            outcome,
            FolderOutcome::Merged {
                from: from.clone(),
                to: to.clone(),
                moved: 2
            }
        );
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(to.join("a.jpg")).unwrap(), "new");
        assert!(to.join("b.jpg").exists());
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let dir = TempDir::new().unwrap();
        let outcome = rename_or_merge(&dir.path().join("x"), &dir.path().join("y")).unwrap();
        assert!(matches!(outcome, FolderOutcome::Missing { .. }));
    }

    #[test]
    fn test_merge_descends_into_shared_subfolders() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("landscapes");
        let to = dir.path().join("landscape");
        fs::create_dir_all(from.join("thumbs")).unwrap();
        fs::create_dir_all(to.join("thumbs")).unwrap();
        fs::create_dir_all(from.join("raw/2020")).unwrap();
        fs::write(from.join("thumbs/a.jpg"), "a").unwrap();
        fs::write(to.join("thumbs/b.jpg"), "b").unwrap();
        fs::write(from.join("raw/2020/c.jpg"), "c").unwrap();
        fs::write(from.join("z.jpg"), "z").unwrap();

        let outcome = rename_or_merge(&from, &to).unwrap();

        // raw/ moves whole, thumbs/a.jpg and z.jpg move one by one
        assert!(matches!(outcome, FolderOutcome::Merged { moved: 3, .. }));
        assert!(!from.exists());
        assert!(to.join("thumbs/a.jpg").exists());
        assert!(to.join("thumbs/b.jpg").exists());
        assert!(to.join("raw/2020/c.jpg").exists());
        assert!(to.join("z.jpg").exists());
    }
}
