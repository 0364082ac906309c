//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use gallery_admin::{GalleryError, GalleryImage, GalleryManager, Result};
use log::{debug, info};
use std::fs;

/// Execute the process command
pub fn process_command(gallery: &GalleryManager, args: ProcessArgs) -> Result<()> {
    debug!("Executing process command with args: {:?}", args);

    let entry = gallery.process_image(
        &args.src_path,
        &args.gallery,
        &args.filename,
        args.caption.as_deref().unwrap_or(""),
        args.copyright.as_deref().unwrap_or(""),
    )?;
    debug!("recorded {:?}", entry);
    Ok(())
}

/// Execute the remove command
pub fn remove_command(gallery: &GalleryManager, args: RemoveArgs) -> Result<()> {
    debug!("Executing remove command with args: {:?}", args);

    gallery.remove_image(&args.gallery, &args.filename)?;
    Ok(())
}

/// Execute the fix-paths command
pub fn fix_paths_command(gallery: &GalleryManager) -> Result<()> {
    debug!("Executing fix-paths command");

    let report = gallery.fix_paths().into_result()?;
    info!(
        "{} updated, {} unchanged, {} not found",
        report.updated.len(),
        report.unchanged.len(),
        report.missing.len()
    );
    Ok(())
}

/// Execute the rename-folders command
pub fn rename_folders_command(gallery: &GalleryManager) -> Result<()> {
    debug!("Executing rename-folders command");

    let outcomes = gallery.rename_folders()?;
    debug!("{:?}", outcomes);
    Ok(())
}

/// Execute the set-header command
pub fn set_header_command(gallery: &GalleryManager, args: SetHeaderArgs) -> Result<()> {
    debug!("Executing set-header command with args: {:?}", args);

    gallery.set_header_image(&args.gallery, &args.path)?;
    Ok(())
}

/// Execute the create-album command
pub fn create_album_command(gallery: &GalleryManager, args: CreateAlbumArgs) -> Result<()> {
    debug!("Executing create-album command with args: {:?}", args);

    let body = match &args.body_template {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            GalleryError::validation(format!("cannot read {}: {}", path.display(), e))
        })?,
        None => String::from("\n"),
    };
    let index = gallery.create_album(&args.name, &args.description, &body)?;
    println!("{}", index.display());
    Ok(())
}

/// Execute the list command
pub fn list_command(gallery: &GalleryManager, args: ListArgs) -> Result<()> {
    debug!("Executing list command with args: {:?}", args);

    let images = gallery.list_images(&args.gallery)?;
    output_images(&images, args.format)
}

fn output_images(images: &[GalleryImage], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(images)?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(images)?);
        }
    }
    Ok(())
}
