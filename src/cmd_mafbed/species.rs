use anyhow::Context;
use clap::*;
use std::io::Write;

use mafbed::libs::config::derived_order;
use mafbed::libs::maf::scan_species;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("species")
        .about("List the species of a MAF file")
        .after_help(
            r###"
Prints every species named by an `s` line, one per line, sorted alphabetically.
With --ref, the reference is printed first; this is the order used by `to-bed`.

The output can be edited and fed back with `to-bed --species-file`.

Examples:
1. Species in output order:
   mafbed species chr1.maf.gz --ref hg38

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input MAF file to process"),
        )
        .arg(
            Arg::new("ref")
                .long("ref")
                .short('r')
                .num_args(1)
                .help("Reference species, listed first"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
        .arg(super::verbose_arg())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    super::init_logger(args.get_count("verbose"));

    let infile = args.get_one::<String>("infile").unwrap();
    let mut writer = mafbed::writer(args.get_one::<String>("outfile").unwrap())?;

    let discovered = scan_species(mafbed::reader(infile)?)
        .with_context(|| format!("failed to scan {}", infile))?;
    log::info!("{} species in {}", discovered.len(), infile);

    let species: Vec<String> = match args.get_one::<String>("ref") {
        Some(reference) => {
            if !discovered.contains(reference) {
                log::warn!("Reference {} not found in {}", reference, infile);
            }
            derived_order(reference, discovered)
        }
        None => discovered.into_iter().collect(),
    };

    for name in &species {
        writer.write_all(format!("{}\n", name).as_ref())?;
    }
    writer.flush()?;

    Ok(())
}
