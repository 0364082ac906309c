//! Rewrite legacy album paths in the landscape and portrait gallery indexes.
//!
//! Takes no arguments and runs against the current directory. Missing index
//! files are skipped with a warning; any other failure exits with status 1.

use gallery_admin::{logging, GalleryManager, SiteConfig};
use log::LevelFilter;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init(LevelFilter::Info);

    let gallery = GalleryManager::new(SiteConfig::default());
    if gallery.fix_paths().is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
