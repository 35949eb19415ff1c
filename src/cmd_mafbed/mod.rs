//! Subcommand modules for the `mafbed` binary.

pub mod species;
pub mod to_bed;

pub fn verbose_arg() -> clap::Arg {
    clap::Arg::new("verbose")
        .long("verbose")
        .short('v')
        .action(clap::ArgAction::Count)
        .help("Log progress to stderr; repeat for more detail")
}

/// 0 = warnings only, 1 = info, 2+ = debug.
pub fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
