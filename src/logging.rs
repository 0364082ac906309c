//! Logger setup shared by the command-line binaries

use log::LevelFilter;

/// Initialize `env_logger` at `level`; `RUST_LOG` still overrides it.
///
/// Output is bare messages on stderr, which is what the scripts calling these
/// tools expect to capture.
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Map the `--verbose` / `--quiet` flags to a level filter
pub fn level_from_flags(verbose: bool, quiet: bool) -> LevelFilter {
    match (verbose, quiet) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Error,
        (false, false) => LevelFilter::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(level_from_flags(false, false), LevelFilter::Info);
        assert_eq!(level_from_flags(true, false), LevelFilter::Debug);
        assert_eq!(level_from_flags(false, true), LevelFilter::Error);
    }
}
