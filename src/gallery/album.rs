//! Album scaffolding and listing

use super::{validate_name, GalleryManager};
use crate::config::{site_image_path, GALLERY_IMAGE_EXTENSIONS};
use crate::core::{FrontMatter, GalleryDocument, ImageEntry};
use crate::error::{GalleryError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Icon shown next to the title of new albums
pub const DEFAULT_ALBUM_TITLE: &str = "🎞️";

/// A stored image joined with its index entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    pub name: String,
    pub path: String,
    pub caption: String,
    pub copyright: String,
    /// Whether the index has an entry for this file
    pub indexed: bool,
}

impl GalleryManager {
    /// Create the folders and index page of a new album.
    ///
    /// The name is lowercased. `body` is placed after the front matter.
    pub fn create_album(&self, name: &str, description: &str, body: &str) -> Result<PathBuf> {
        let name = name.trim().to_lowercase();
        validate_name("album name", &name)?;

        let index_path = self.config.index_file(&name);
        if index_path.exists() {
            return Err(GalleryError::album_exists(name));
        }

        for dir in [self.config.album_dir(&name), self.config.gallery_dir(&name)] {
            fs::create_dir_all(&dir).map_err(|e| GalleryError::write_failure(&dir, e))?;
        }

        let mut front_matter = FrontMatter::default();
        front_matter.layout = Some("page".to_string());
        front_matter.title = Some(capitalize(&name));
        front_matter.description = Some(description.to_string());
        front_matter.active = Some("gallery".to_string());
        front_matter.header_img = Some(site_image_path(&name, "header.jpg"));
        front_matter.album_title = Some(DEFAULT_ALBUM_TITLE.to_string());
        front_matter.images = Some(Vec::new());

        let document = GalleryDocument::new(front_matter, body);
        self.writer.write_file(&document, &index_path)?;

        log::info!("Created album {} at {}", name, index_path.display());
        Ok(index_path)
    }

    /// Image files stored for `gallery`, with captions from its index.
    ///
    /// An unreadable index is logged and treated as having no entries.
    pub fn list_images(&self, gallery: &str) -> Result<Vec<GalleryImage>> {
        validate_name("gallery", gallery)?;

        let album_dir = self.config.album_dir(gallery);
        if !album_dir.is_dir() {
            return Err(GalleryError::validation(format!(
                "gallery not found: {}",
                album_dir.display()
            )));
        }

        let index_path = self.config.index_file(gallery);
        let entries: Vec<ImageEntry> = match self.reader.read_file(&index_path) {
            Ok(document) => document.images().to_vec(),
            Err(e) => {
                log::error!("Error reading gallery metadata: {}", e);
                Vec::new()
            }
        };

        let mut images = Vec::new();
        for entry in WalkDir::new(&album_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| GalleryError::Io(e.into()))?;
            if !entry.file_type().is_file() || !is_gallery_image(entry.path()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let meta = entries
                .iter()
                .find(|m| self.config.remove_match.matches(&m.image_path, &name));

            images.push(GalleryImage {
                path: site_image_path(gallery, &name),
                caption: meta
                    .and_then(|m| m.caption())
                    .unwrap_or_else(|| name.clone()),
                copyright: meta
                    .and_then(|m| m.copyright())
                    .unwrap_or_else(|| self.config.default_copyright.clone()),
                indexed: meta.is_some(),
                name,
            });
        }
        Ok(images)
    }
}

/// Whether `path` has one of [`GALLERY_IMAGE_EXTENSIONS`], ignoring case
pub fn is_gallery_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            GALLERY_IMAGE_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
