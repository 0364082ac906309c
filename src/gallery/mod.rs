//! Gallery operations that combine image files and index pages
//!
//! `process` and `remove` touch the stored image, its thumbnail and the
//! gallery's `index.html`. File changes are staged or ordered after the index
//! update, and the index is restored when they fail.

pub mod album;
pub mod migrate;

use crate::config::{SiteConfig, THUMBNAIL_MAX_SIZE};
use crate::core::ImageEntry;
use crate::error::{GalleryError, Result};
use crate::imaging::ImageMaterializer;
use crate::io::{remove_file_if_exists, DocumentReader, DocumentWriter, ReaderConfig, StagedFile};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

pub use album::GalleryImage;
pub use migrate::{BatchReport, FolderOutcome};

/// Outcome of a successful `remove`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Entries dropped from `images`
    pub entries_removed: usize,
    /// Whether an image file was deleted
    pub file_deleted: bool,
    /// Whether a thumbnail was deleted
    pub thumbnail_deleted: bool,
}

/// Operations on the galleries of one site
#[derive(Debug, Clone)]
pub struct GalleryManager {
    config: SiteConfig,
    reader: DocumentReader,
    writer: DocumentWriter,
    materializer: ImageMaterializer,
}

impl GalleryManager {
    pub fn new(config: SiteConfig) -> Self {
        let reader = DocumentReader::with_config(ReaderConfig {
            preserve_original: true,
            ..Default::default()
        });
        let materializer = ImageMaterializer::new(config.materialize);
        Self {
            config,
            reader,
            writer: DocumentWriter::new(),
            materializer,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Store `source` as `filename` in `gallery` and register it in the index.
    ///
    /// The image and its thumbnail are staged first and only replace their
    /// destinations once the index has been updated. If that final step fails
    /// the index is restored.
    pub fn process_image(
        &self,
        source: &Path,
        gallery: &str,
        filename: &str,
        caption: &str,
        copyright: &str,
    ) -> Result<ImageEntry> {
        validate_name("gallery", gallery)?;
        validate_name("filename", filename)?;

        let index_path = self.config.index_file(gallery);
        let image_path = self.config.image_file(gallery, filename);
        debug!(
            "processing {} into {}",
            source.display(),
            image_path.display()
        );

        let source_image = self.materializer.validate(source)?;
        let staged = self.materializer.stage(&source_image, &image_path)?;
        let staged_thumbnail = if self.config.thumbnails {
            let thumbnail_path = self.config.thumbnail_file(gallery, filename);
            Some(self.materializer.stage_thumbnail(
                &source_image,
                &thumbnail_path,
                THUMBNAIL_MAX_SIZE,
            )?)
        } else {
            None
        };

        let mut document = self.reader.read_file(&index_path)?;
        let entry = ImageEntry::for_upload(
            gallery,
            filename,
            caption,
            copyright,
            &self.config.default_copyright,
        );
        document
            .append_image(entry.clone())
            .map_err(|e| e.with_path(&index_path))?;
        self.writer.write_file(&document, &index_path)?;

        if let Err(e) = commit_image(staged, staged_thumbnail) {
            error!("failed to store {}: {}", image_path.display(), e);
            if let Some(original) = document.original_content() {
                self.writer.restore(&index_path, original)?;
            }
            return Err(e);
        }

        info!("Added {} to gallery {}", filename, gallery);
        Ok(entry)
    }

    /// Unregister `filename` from `gallery` and delete the stored image and
    /// its thumbnail.
    ///
    /// The index is updated first; if a file cannot be deleted the index is
    /// restored. Missing files are not an error.
    pub fn remove_image(&self, gallery: &str, filename: &str) -> Result<RemoveOutcome> {
        validate_name("gallery", gallery)?;
        validate_name("filename", filename)?;

        let index_path = self.config.index_file(gallery);
        let image_path = self.config.image_file(gallery, filename);

        let mut document = self.reader.read_file(&index_path)?;
        let entries_removed = document
            .remove_image(filename, self.config.remove_match)
            .map_err(|e| e.with_path(&index_path))?;
        if entries_removed == 0 {
            warn!("{} has no entry for {}", index_path.display(), filename);
        }
        self.writer.write_file(&document, &index_path)?;

        let thumbnail_path = self.config.thumbnail_file(gallery, filename);
        let deleted = remove_file_if_exists(&thumbnail_path)
            .and_then(|thumb| Ok((thumb, remove_file_if_exists(&image_path)?)));
        let (thumbnail_deleted, file_deleted) = match deleted {
            Ok(deleted) => deleted,
            Err(e) => {
                error!("failed to delete files of {}: {}", filename, e);
                if let Some(original) = document.original_content() {
                    self.writer.restore(&index_path, original)?;
                }
                return Err(e);
            }
        };
        if !file_deleted {
            debug!("{} was already gone", image_path.display());
        }

        info!(
            "Removed {} from gallery {} ({} index entries)",
            filename, gallery, entries_removed
        );
        Ok(RemoveOutcome {
            entries_removed,
            file_deleted,
            thumbnail_deleted,
        })
    }

    /// Point the gallery's `header-img` at `header_path`
    pub fn set_header_image(&self, gallery: &str, header_path: &str) -> Result<PathBuf> {
        validate_name("gallery", gallery)?;
        if header_path.trim().is_empty() {
            return Err(GalleryError::validation("header image path is empty"));
        }

        let index_path = self.config.index_file(gallery);
        let mut document = self.reader.read_file(&index_path)?;
        document.set_header_image(header_path.trim());
        self.writer.write_file(&document, &index_path)?;

        info!("Set header image of {} to {}", gallery, header_path.trim());
        Ok(index_path)
    }
}

/// Commit the thumbnail, then the image; a thumbnail whose image could not be
/// stored is removed again.
fn commit_image(image: StagedFile, thumbnail: Option<StagedFile>) -> Result<()> {
    let thumbnail_path = thumbnail.as_ref().map(|t| t.target().to_path_buf());
    if let Some(thumbnail) = thumbnail {
        thumbnail.commit()?;
    }
    if let Err(e) = image.commit() {
        if let Some(path) = thumbnail_path {
            if let Err(cleanup) = remove_file_if_exists(&path) {
                warn!("could not remove {}: {}", path.display(), cleanup);
            }
        }
        return Err(e);
    }
    Ok(())
}

/// Reject names that would escape the album folders
fn validate_name(what: &str, name: &str) -> Result<()> {
    let bad = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if bad {
        return Err(GalleryError::validation(format!(
            "invalid {}: {:?}",
            what, name
        )));
    }
    Ok(())
}
