//! Command-line argument definitions for `gallery-admin`

use clap::{Args, Parser, Subcommand, ValueEnum};
use gallery_admin::config::DEFAULT_COPYRIGHT;
use gallery_admin::{MaterializeMode, RemoveMatch, SiteConfig};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "gallery-admin",
    version,
    about = "Manage the images and index pages of a static photo-gallery site",
    long_about = "gallery-admin stores images into album folders and keeps the YAML front \
                  matter of each gallery's index.html in sync. Paths are relative to the \
                  site root (the directory containing images/)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub site: SiteOptions,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Store an image in a gallery and add it to the gallery index
    Process(ProcessArgs),
    /// Delete an image from a gallery and drop it from the gallery index
    Remove(RemoveArgs),
    /// Rewrite legacy album paths in the landscape/portrait indexes
    FixPaths,
    /// Rename or merge plural album folders into their singular names
    RenameFolders,
    /// Set the header image of a gallery
    SetHeader(SetHeaderArgs),
    /// Create the folders and index page of a new album
    CreateAlbum(CreateAlbumArgs),
    /// List the images stored in a gallery
    List(ListArgs),
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct SiteOptions {
    /// Site root containing the images/ directory
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Copyright used when an image is added without one
    #[arg(long, global = true, value_name = "TEXT", default_value = DEFAULT_COPYRIGHT)]
    pub default_copyright: String,

    /// Match index entries by path suffix instead of exact filename
    #[arg(long, global = true)]
    pub suffix_match: bool,

    /// Do not write thumbnails when processing images
    #[arg(long, global = true)]
    pub no_thumbnails: bool,
}

impl SiteOptions {
    pub fn to_config(&self, materialize: MaterializeMode) -> SiteConfig {
        SiteConfig {
            root: self.root.clone(),
            materialize,
            default_copyright: self.default_copyright.clone(),
            remove_match: if self.suffix_match {
                RemoveMatch::Suffix
            } else {
                RemoveMatch::Exact
            },
            thumbnails: !self.no_thumbnails,
        }
    }
}

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Source image
    pub src_path: PathBuf,
    /// Gallery name
    pub gallery: String,
    /// Filename to store the image under
    pub filename: String,
    /// Caption (defaults to the filename)
    pub caption: Option<String>,
    /// Copyright (defaults to --default-copyright)
    pub copyright: Option<String>,

    /// Flatten transparency and re-encode as JPEG instead of copying
    #[arg(long)]
    pub normalize: bool,
}

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Gallery name
    pub gallery: String,
    /// Filename of the stored image
    pub filename: String,
}

/// Arguments for the set-header command
#[derive(Args, Debug)]
pub struct SetHeaderArgs {
    /// Gallery name
    pub gallery: String,
    /// Site path of the new header image, e.g. /images/albums/beach/header.jpg
    pub path: String,
}

/// Arguments for the create-album command
#[derive(Args, Debug)]
pub struct CreateAlbumArgs {
    /// Album name (lowercased)
    pub name: String,
    /// Album description
    #[arg(long, default_value = "")]
    pub description: String,
    /// File whose content becomes the page body
    #[arg(long, value_name = "FILE")]
    pub body_template: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Gallery name
    pub gallery: String,
    /// Output format
    #[arg(long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Output formats for listings
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Yaml,
    Json,
}
