//! Rewriting legacy album segments in site image paths

use crate::config::LEGACY_ALBUM_SEGMENTS;
use crate::error::{GalleryError, Result};
use regex::{NoExpand, Regex};
use std::path::Path;

/// Replaces every `/albums/{legacy}/` segment with `/albums/{target}/`
#[derive(Debug, Clone)]
pub struct PathRewriter {
    pattern: Regex,
    replacement: String,
    target: String,
}

impl PathRewriter {
    /// Rewriter for the legacy names in [`LEGACY_ALBUM_SEGMENTS`]
    pub fn new(target: &str) -> Result<Self> {
        Self::with_segments(target, LEGACY_ALBUM_SEGMENTS)
    }

    /// Rewriter for an arbitrary set of legacy names
    pub fn with_segments(target: &str, legacy: &[&str]) -> Result<Self> {
        if target.is_empty() || target.contains('/') {
            return Err(GalleryError::validation(format!(
                "invalid album name for path rewrite: {:?}",
                target
            )));
        }
        if legacy.is_empty() {
            return Err(GalleryError::validation("no legacy album names to rewrite"));
        }

        let alternation = legacy
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("/albums/(?:{})/", alternation))?;

        Ok(Self {
            pattern,
            replacement: format!("/albums/{}/", target),
            target: target.to_string(),
        })
    }

    /// Rewriter whose target is derived from the folder holding `index_file`
    pub fn for_index_file(index_file: &Path) -> Result<Self> {
        let dir_name = index_file
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                GalleryError::validation(format!(
                    "cannot derive album name from {}",
                    index_file.display()
                ))
            })?;
        Self::new(&album_name_from_dir(dir_name))
    }

    /// Album name every legacy segment is rewritten to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Rewrite one path; returns `None` when nothing matched
    pub fn rewrite(&self, path: &str) -> Option<String> {
        if !self.pattern.is_match(path) {
            return None;
        }
        Some(
            self.pattern
                .replace_all(path, NoExpand(&self.replacement))
                .into_owned(),
        )
    }
}

/// Singular album name for a gallery folder: one trailing `s` is dropped
pub fn album_name_from_dir(dir_name: &str) -> String {
    dir_name.strip_suffix('s').unwrap_or(dir_name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_album_name_from_dir() {
        assert_eq!(album_name_from_dir("landscapes"), "landscape");
        assert_eq!(album_name_from_dir("portrait"), "portrait");
        assert_eq!(album_name_from_dir("glass"), "glas");
    }

    #[test]
    fn test_rewrites_every_legacy_variant() {
        let rw = PathRewriter::new("landscape").unwrap();
        for legacy in LEGACY_ALBUM_SEGMENTS {
            let path = format!("/images/albums/{}/sunset.jpg", legacy);
            assert_eq!(
                rw.rewrite(&path).as_deref(),
                Some("/images/albums/landscape/sunset.jpg"),
                "legacy segment {legacy}"
            );
        }
    }

    #[test]
    fn test_unrelated_path_untouched() {
        let rw = PathRewriter::new("portrait").unwrap();
        assert_eq!(rw.rewrite("/images/albums/beach/x.jpg"), None);
        assert_eq!(rw.rewrite("/images/albums/landscapesque/x.jpg"), None);
    }

    #[test]
    fn test_target_from_index_file() {
        let rw = PathRewriter::for_index_file(&PathBuf::from("images/portraits/index.html")).unwrap();
        assert_eq!(rw.target(), "portrait");
    }

    #[test]
    fn test_invalid_target_rejected() {
        assert!(PathRewriter::new("").is_err());
        assert!(PathRewriter::new("a/b").is_err());
    }
}
