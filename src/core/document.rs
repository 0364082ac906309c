//! Gallery index document model
//!
//! A gallery page is split on the literal `---` at most twice into a
//! preamble, the raw front matter block and the body. Only the front matter
//! is ever changed; preamble and body are written back as they were read.

use crate::config::RemoveMatch;
use crate::core::front_matter::{FrontMatter, ImageEntry};
use crate::core::paths::PathRewriter;
use crate::error::{GalleryError, Result};
use serde_yaml::Value;
use std::path::PathBuf;

/// Front matter delimiter
pub const DELIMITER: &str = "---";

/// A gallery index page with its decoded front matter
#[derive(Debug, Clone)]
pub struct GalleryDocument {
    preamble: String,
    front_matter: FrontMatter,
    body: String,
    original_content: Option<String>,
}

impl GalleryDocument {
    /// Create a document from its parts
    pub fn new(front_matter: FrontMatter, body: impl Into<String>) -> Self {
        Self {
            preamble: String::new(),
            front_matter,
            body: body.into(),
            original_content: None,
        }
    }

    /// Split and decode page content.
    ///
    /// Errors carry an empty path; readers attach the file path with
    /// [`GalleryError::with_path`].
    pub fn parse(content: &str) -> Result<Self> {
        let mut parts = content.splitn(3, DELIMITER);
        let (preamble, raw, body) = match (parts.next(), parts.next(), parts.next()) {
            (Some(preamble), Some(raw), Some(body)) => (preamble, raw, body),
            _ => return Err(GalleryError::malformed_document(PathBuf::new())),
        };

        let front_matter = FrontMatter::from_yaml_str(raw)?;

        Ok(Self {
            preamble: preamble.to_string(),
            front_matter,
            body: body.to_string(),
            original_content: None,
        })
    }

    /// Set the original content for restore after a failed follow-up step
    pub fn with_original_content(mut self, content: String) -> Self {
        self.original_content = Some(content);
        self
    }

    /// Content the document was parsed from, when the reader kept it
    pub fn original_content(&self) -> Option<&str> {
        self.original_content.as_deref()
    }

    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    pub fn front_matter_mut(&mut self) -> &mut FrontMatter {
        &mut self.front_matter
    }

    /// Text after the closing delimiter
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Text before the opening delimiter
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Image entries, empty when the page has none
    pub fn images(&self) -> &[ImageEntry] {
        self.front_matter.images.as_deref().unwrap_or(&[])
    }

    /// Append an entry to `images`, creating the list if needed
    pub fn append_image(&mut self, entry: ImageEntry) -> Result<()> {
        self.front_matter.images_mut()?.push(entry);
        Ok(())
    }

    /// Drop every entry whose `image_path` refers to `filename`.
    ///
    /// Returns how many entries were removed.
    pub fn remove_image(&mut self, filename: &str, policy: RemoveMatch) -> Result<usize> {
        if self.front_matter.has_untyped_images() {
            // Surface the shape problem through the same error as append.
            self.front_matter.images_mut()?;
        }
        let Some(images) = self.front_matter.images.as_mut() else {
            return Ok(0);
        };
        let before = images.len();
        images.retain(|entry| !policy.matches(&entry.image_path, filename));
        Ok(before - images.len())
    }

    /// Rewrite legacy album segments in every `image_path` and in `header-img`.
    ///
    /// Entries that do not decode as [`ImageEntry`] are still rewritten as long
    /// as they carry a string `image_path`.
    ///
    /// Returns how many fields changed.
    pub fn rewrite_paths(&mut self, rewriter: &PathRewriter) -> usize {
        let mut changed = 0;
        if let Some(images) = self.front_matter.images.as_mut() {
            for entry in images.iter_mut() {
                if let Some(new_path) = rewriter.rewrite(&entry.image_path) {
                    entry.image_path = new_path;
                    changed += 1;
                }
            }
        } else if let Some(items) = self.front_matter.untyped_images_mut() {
            for item in items.iter_mut() {
                if let Some(Value::String(path)) = item.get_mut("image_path") {
                    if let Some(new_path) = rewriter.rewrite(path) {
                        *path = new_path;
                        changed += 1;
                    }
                }
            }
        }
        if let Some(header) = self.front_matter.header_img.as_mut() {
            if let Some(new_header) = rewriter.rewrite(header) {
                *header = new_header;
                changed += 1;
            }
        }
        changed
    }

    /// Point `header-img` at a new site path
    pub fn set_header_image(&mut self, path: impl Into<String>) {
        self.front_matter.header_img = Some(path.into());
    }

    /// Reassemble the page
    pub fn render(&self) -> Result<String> {
        let yaml = self.front_matter.to_yaml_string()?;

        let mut out = String::with_capacity(
            self.preamble.len() + yaml.len() + self.body.len() + 2 * DELIMITER.len() + 2,
        );
        out.push_str(&self.preamble);
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&yaml);
        if !yaml.is_empty() && !yaml.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(DELIMITER);
        if !starts_with_line_break(&self.body) {
            out.push('\n');
        }
        out.push_str(&self.body);
        Ok(out)
    }
}

fn starts_with_line_break(s: &str) -> bool {
    s.starts_with('\n') || s.starts_with("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = "---\nlayout: page\ntitle: Beach\nimages: []\n---\n<div class=\"gallery\"></div>\n";

    #[test]
    fn test_parse_splits_parts() {
        let doc = GalleryDocument::parse(PAGE).unwrap();
        assert_eq!(doc.preamble(), "");
        assert_eq!(doc.body(), "\n<div class=\"gallery\"></div>\n");
        assert_eq!(doc.front_matter().title.as_deref(), Some("Beach"));
        assert!(doc.images().is_empty());
    }

    #[test]
    fn test_render_without_changes_is_identical() {
        let doc = GalleryDocument::parse(PAGE).unwrap();
        assert_eq!(doc.render().unwrap(), PAGE);
    }

    #[test]
    fn test_missing_delimiters_is_malformed() {
        let err = GalleryDocument::parse("title: x\n---\nbody").unwrap_err();
        assert!(matches!(err, GalleryError::MalformedDocument { .. }));
        let err = GalleryDocument::parse("<html></html>").unwrap_err();
        assert!(matches!(err, GalleryError::MalformedDocument { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let err = GalleryDocument::parse("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, GalleryError::Yaml(_)));
    }

    #[test]
    fn test_append_then_remove_restores_length() {
        let mut doc = GalleryDocument::parse(PAGE).unwrap();
        doc.append_image(ImageEntry::for_upload("beach", "cat.jpg", "A cat", "Jane", "©"))
            .unwrap();
        assert_eq!(doc.images().len(), 1);
        assert_eq!(doc.remove_image("cat.jpg", RemoveMatch::Exact).unwrap(), 1);
        assert!(doc.images().is_empty());
    }

    #[test]
    fn test_remove_exact_spares_longer_names() {
        let mut doc = GalleryDocument::parse(PAGE).unwrap();
        doc.append_image(ImageEntry::for_upload("beach", "bigcat.jpg", "", "", "©"))
            .unwrap();
        doc.append_image(ImageEntry::for_upload("beach", "cat.jpg", "", "", "©"))
            .unwrap();
        assert_eq!(doc.remove_image("cat.jpg", RemoveMatch::Exact).unwrap(), 1);
        assert_eq!(doc.images()[0].file_name(), "bigcat.jpg");
    }

    #[test]
    fn test_remove_suffix_overmatches() {
        let mut doc = GalleryDocument::parse(PAGE).unwrap();
        doc.append_image(ImageEntry::for_upload("beach", "bigcat.jpg", "", "", "©"))
            .unwrap();
        doc.append_image(ImageEntry::for_upload("beach", "cat.jpg", "", "", "©"))
            .unwrap();
        assert_eq!(doc.remove_image("cat.jpg", RemoveMatch::Suffix).unwrap(), 2);
    }

    #[test]
    fn test_remove_without_images_is_noop() {
        let mut doc = GalleryDocument::parse("---\ntitle: x\n---\n").unwrap();
        assert_eq!(doc.remove_image("cat.jpg", RemoveMatch::Exact).unwrap(), 0);
        assert_eq!(doc.front_matter().keys(), vec!["title"]);
    }

    #[test]
    fn test_rewrite_paths_touches_entries_and_header() {
        let mut doc = GalleryDocument::parse(
            "---\nheader-img: /images/albums/landscapes/sunset.jpg\nimages:\n- image_path: /images/albums/portraits/a.jpg\n  caption: a\n  copyright: me\n---\n",
        )
        .unwrap();
        let rw = PathRewriter::new("landscape").unwrap();
        assert_eq!(doc.rewrite_paths(&rw), 2);
        assert_eq!(
            doc.front_matter().header_img.as_deref(),
            Some("/images/albums/landscape/sunset.jpg")
        );
        assert_eq!(doc.images()[0].image_path, "/images/albums/landscape/a.jpg");
    }

    #[test]
    fn test_preamble_and_glued_body_survive() {
        let doc = GalleryDocument::parse("<!-- x -->\n---\ntitle: x\n---body").unwrap();
        assert_eq!(doc.render().unwrap(), "<!-- x -->\n---\ntitle: x\n---\nbody");
    }

    #[test]
    fn test_set_header_image() {
        let mut doc = GalleryDocument::parse(PAGE).unwrap();
        doc.set_header_image("/images/albums/beach/header.jpg");
        let out = doc.render().unwrap();
        assert!(out.contains("title: Beach\nheader-img: /images/albums/beach/header.jpg\nimages: []\n"));
    }

    #[test]
    fn test_rewrite_paths_reaches_unreadable_entries() {
        let mut doc = GalleryDocument::parse(
            "---\nimages:\n- image_path: /images/albums/landscapes/a.jpg\n- caption: no path\n---\n",
        )
        .unwrap();
        assert!(doc.front_matter().has_untyped_images());

        let rw = PathRewriter::new("landscape").unwrap();
        assert_eq!(doc.rewrite_paths(&rw), 1);
        assert_eq!(
            doc.render().unwrap(),
            "---\nimages:\n- image_path: /images/albums/landscape/a.jpg\n- caption: no path\n---\n"
        );
    }
}
