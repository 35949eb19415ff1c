//! Converts MAF whole-genome alignments into per-site, multi-species tables
//! anchored on one reference sequence.
//!
//! ```
//! use mafbed::libs::bed::BedWriter;
//! use mafbed::libs::config::RunConfig;
//!
//! let maf = "\
//! a score=12.0
//! s hg38.chr1 10 4 + 1000 ACGT
//! s mm10.chr3 50 4 + 5000 ACGT
//!
//! ";
//! let species = vec!["hg38".to_string(), "mm10".to_string()];
//! let config = RunConfig::new("hg38", "chr1", species).unwrap();
//! let mut writer = BedWriter::new(Vec::new(), &config.species);
//!
//! let summary = mafbed::convert(maf.as_bytes(), &mut writer, &config).unwrap();
//! assert_eq!(summary.records, 4);
//! let out = String::from_utf8(writer.into_inner()).unwrap();
//! assert!(out.starts_with("chr1\t10\t11\t+\thg38,mm10\tchr1,chr3\t10,50\tA,A\t+,+\t12.0\n"));
//! ```

pub mod libs;

pub use crate::libs::io::*;

use std::io::{BufRead, Write};

use crate::libs::bed::{BedWriter, RecordEmitter};
use crate::libs::config::RunConfig;
use crate::libs::maf::MafBlockReader;
use crate::libs::strand::normalize_block;

/// Counters of one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub blocks: usize,
    pub kept: usize,
    pub missing_reference: usize,
    pub other_chromosome: usize,
    pub flipped: usize,
    pub records: usize,
    pub suppressed: usize,
}

/// Reader -> strand normalizer -> record emitter -> writer, one block at a time.
///
/// The first parse or character error aborts the run.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    writer: &mut BedWriter<W>,
    config: &RunConfig,
) -> anyhow::Result<ConvertSummary> {
    let mut summary = ConvertSummary::default();
    let mut blocks = MafBlockReader::new(reader, config.filter());

    for block in blocks.by_ref() {
        let mut block = block?;

        if normalize_block(&mut block, &config.reference)? {
            summary.flipped += 1;
        }

        let mut emitter = RecordEmitter::new(&block, &config.species)?;
        for record in emitter.by_ref() {
            writer.write_record(&record)?;
            summary.records += 1;
        }
        summary.suppressed += emitter.suppressed();
    }
    writer.flush()?;

    let stats = blocks.stats();
    summary.blocks = stats.blocks;
    summary.kept = stats.kept;
    summary.missing_reference = stats.missing_reference;
    summary.other_chromosome = stats.other_chromosome;

    Ok(summary)
}
