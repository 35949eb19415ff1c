extern crate clap;
use clap::*;

mod cmd_mafbed;

fn main() -> anyhow::Result<()> {
    let app = Command::new("mafbed")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`mafbed` - MAF alignments to per-site multi-species BED")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_mafbed::to_bed::make_subcommand())
        .subcommand(cmd_mafbed::species::make_subcommand())
        .after_help(
            r###"Subcommands:

* to-bed  - One record per reference site, all species side by side
* species - List the species of a MAF file in output order

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("to-bed", sub_matches)) => cmd_mafbed::to_bed::execute(sub_matches),
        Some(("species", sub_matches)) => cmd_mafbed::species::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
