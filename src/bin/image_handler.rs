//! `image-handler process|remove src_path gallery filename [caption] [copyright]`
//!
//! Exit status is 0 on success and 1 on any failure, including usage errors.

use clap::{Parser, ValueEnum};
use gallery_admin::{logging, GalleryManager, MaterializeMode, SiteConfig};
use log::{error, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "image-handler",
    version,
    about = "Add an image to a gallery or remove it, updating the gallery index",
    override_usage = "image-handler process|remove src_path gallery filename [caption] [copyright]"
)]
struct Cli {
    /// Action to perform
    #[arg(value_enum)]
    action: Action,
    /// Source image (ignored by remove)
    src_path: PathBuf,
    /// Gallery name
    gallery: String,
    /// Filename in the gallery
    filename: String,
    /// Caption (defaults to the filename)
    #[arg(default_value = "")]
    caption: String,
    /// Copyright (defaults to a placeholder)
    #[arg(default_value = "")]
    copyright: String,

    /// Site root containing the images/ directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Flatten transparency and re-encode as JPEG instead of copying
    #[arg(long)]
    normalize: bool,

    /// Do not write a thumbnail
    #[arg(long)]
    no_thumbnails: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Action {
    Process,
    Remove,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init(LevelFilter::Info);

    let mut config = SiteConfig::with_root(cli.root);
    if cli.normalize {
        config.materialize = MaterializeMode::Normalize;
    }
    config.thumbnails = !cli.no_thumbnails;
    let gallery = GalleryManager::new(config);

    let result = match cli.action {
        Action::Process => gallery
            .process_image(
                &cli.src_path,
                &cli.gallery,
                &cli.filename,
                &cli.caption,
                &cli.copyright,
            )
            .map(|_| ()),
        Action::Remove => gallery.remove_image(&cli.gallery, &cli.filename).map(|_| ()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
