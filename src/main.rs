use anyhow::Result;
use clap::Parser;

use gallery_admin::{logging, GalleryManager, MaterializeMode};

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_from_flags(cli.verbose, cli.quiet));

    let materialize = match &cli.command {
        Commands::Process(args) if args.normalize => MaterializeMode::Normalize,
        _ => MaterializeMode::Copy,
    };
    let gallery = GalleryManager::new(cli.site.to_config(materialize));

    let result = match cli.command {
        Commands::Process(args) => process_command(&gallery, args),
        Commands::Remove(args) => remove_command(&gallery, args),
        Commands::FixPaths => fix_paths_command(&gallery),
        Commands::RenameFolders => rename_folders_command(&gallery),
        Commands::SetHeader(args) => set_header_command(&gallery, args),
        Commands::CreateAlbum(args) => create_album_command(&gallery, args),
        Commands::List(args) => list_command(&gallery, args),
    };

    result?;
    Ok(())
}
