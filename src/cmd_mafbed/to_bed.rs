use anyhow::Context;
use clap::*;

use mafbed::libs::bed::BedWriter;
use mafbed::libs::config::{derived_order, explicit_order, RunConfig};
use mafbed::libs::error::MafBedError;
use mafbed::libs::maf::scan_species;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("to-bed")
        .about("Convert a MAF file to per-site multi-species BED records")
        .after_help(
            r###"
This subcommand walks the alignment blocks of one reference chromosome and writes
one tab-separated record per reference site.

Output columns:
    ref_chrom ref_start ref_end ref_strand species chroms positions bases strands score

* The per-species columns are comma-joined, reference first
* Blocks with the reference on the '-' strand are reverse-complemented first
* Columns with a gap in any species are merged with the next gap-free column
* `NA` marks a position on a gap, `?` marks a species absent from the block

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Without --species or --species-file, species are collected from the input,
  which then has to be a regular file
* Blocks of other chromosomes, or without the reference, are skipped

Examples:
1. All species, reference hg38, chromosome chr1:
   mafbed to-bed chr1.maf.gz --ref hg38 --chr chr1

2. A fixed set of species:
   mafbed to-bed chr1.maf.gz --ref hg38 --chr chr1 --species panTro4,rheMac8

3. Species listed in a file, one per line:
   mafbed to-bed chr1.maf.gz --ref hg38 --chr chr1 --species-file species.txt

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
                .required(true)
                .num_args(1)
                .help("Reference species"),
        )
        .arg(
            Arg::new("chr")
                .long("chr")
                .short('c')
                .required(true)
                .num_args(1)
                .help("Reference chromosome to extract"),
        )
        .arg(
            Arg::new("species")
                .long("species")
                .short('s')
                .num_args(1)
                .value_delimiter(',')
                .action(ArgAction::Append)
                .help("Species to report, in order; comma separated"),
        )
        .arg(
            Arg::new("species_file")
                .long("species-file")
                .num_args(1)
                .conflicts_with("species")
                .help("File with one species per line"),
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

    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let reference = args.get_one::<String>("ref").unwrap();
    let chrom = args.get_one::<String>("chr").unwrap();

    let species = if let Some(names) = args.get_many::<String>("species") {
        explicit_order(reference, names.cloned().collect())
    } else if let Some(file) = args.get_one::<String>("species_file") {
        explicit_order(reference, mafbed::read_names(file)?)
    } else {
        if infile == "stdin" {
            return Err(MafBedError::ConfigurationError(
                "species can't be collected from stdin; use --species or --species-file"
                    .to_string(),
            )
            .into());
        }
        let discovered = scan_species(mafbed::reader(infile)?)
            .with_context(|| format!("failed to scan {}", infile))?;
        derived_order(reference, discovered)
    };

    let config = RunConfig::new(reference, chrom, species)?;
    log::info!("Reference {} on {}", config.reference, config.chrom);
    log::info!("Species: {}", config.species.join(","));

    //----------------------------
    // Ops
    //----------------------------
    let reader = mafbed::reader(infile)?;
    let mut writer = BedWriter::new(
        mafbed::writer(args.get_one::<String>("outfile").unwrap())?,
        &config.species,
    );

    let summary = mafbed::convert(reader, &mut writer, &config)
        .with_context(|| format!("failed to convert {}", infile))?;

    log::info!(
        "{} blocks read, {} kept ({} reverse-complemented)",
        summary.blocks,
        summary.kept,
        summary.flipped
    );
    log::info!(
        "{} blocks skipped without {}, {} on other chromosomes",
        summary.missing_reference,
        config.reference,
        summary.other_chromosome
    );
    log::info!(
        "{} records written, {} dropped at block edges",
        summary.records,
        summary.suppressed
    );
    if summary.kept == 0 {
        log::warn!("No block of {} on {}", config.reference, config.chrom);
    }

    Ok(())
}
