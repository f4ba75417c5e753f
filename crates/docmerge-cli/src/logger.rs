use log::LevelFilter;

/// Initializes logging. `RUST_LOG` still overrides the default level.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
