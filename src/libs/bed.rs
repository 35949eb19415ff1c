//! Per-site records anchored on the reference, and their tab-separated form.
//!
//! A normalized block is walked column by column. A column where any row of
//! the block has a gap opens an indel group, listed in the output or not; the group runs over the following
//! gapped columns and is closed by the first gap-free column, which it absorbs.
//! Every other column is a group of its own. Each group becomes one record.

use itertools::Itertools;
use std::fmt;
use std::io::{self, Write};

use crate::libs::error::MafBedError;
use crate::libs::maf::{AlignmentBlock, SequenceEntry};

/// Genomic position of a species at the anchor column of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    At(usize),
    /// The anchor column is a gap in this row
    Gap,
    /// The species has no row in the block
    Absent,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::At(pos) => write!(f, "{}", pos),
            Position::Gap => write!(f, "NA"),
            Position::Absent => write!(f, "?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    pub ref_chrom: String,
    pub ref_start: usize,
    pub ref_end: usize, // half-open
    pub ref_strand: char,
    pub chroms: Vec<String>,
    pub positions: Vec<Position>,
    pub bases: Vec<String>,
    pub strands: Vec<char>,
    pub score: String,
}

impl BedRecord {
    /// Tab-separated line without the trailing newline.
    pub fn to_line(&self, species_csv: &str) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.ref_chrom,
            self.ref_start,
            self.ref_end,
            self.ref_strand,
            species_csv,
            self.chroms.iter().join(","),
            self.positions.iter().join(","),
            self.bases.iter().join(","),
            self.strands.iter().join(","),
            self.score,
        )
    }
}

/// Walks the columns of one normalized block and yields its records.
///
/// `species` is the run ordering; its first name is the reference.
pub struct RecordEmitter<'a> {
    rows: Vec<Option<&'a SequenceEntry>>,
    block_rows: Vec<&'a SequenceEntry>,
    score: &'a str,
    ref_chrom: &'a str,
    ref_strand: char,
    width: usize,
    col: usize,
    pos: usize,
    gap_counts: Vec<usize>,
    first: bool,
    suppressed: usize,
}

impl<'a> RecordEmitter<'a> {
    pub fn new(block: &'a AlignmentBlock, species: &[String]) -> Result<Self, MafBedError> {
        let reference = species.first().ok_or_else(|| {
            MafBedError::ConfigurationError("empty species ordering".to_string())
        })?;
        let ref_row = block.get(reference).ok_or_else(|| {
            MafBedError::ConfigurationError(format!(
                "reference species {} has no row in the block",
                reference
            ))
        })?;

        Ok(Self {
            rows: species.iter().map(|sp| block.get(sp)).collect(),
            block_rows: block.entries.values().collect(),
            score: &block.score,
            ref_chrom: &ref_row.chrom,
            ref_strand: ref_row.strand,
            width: ref_row.sequence.len(),
            col: 0,
            pos: ref_row.start,
            gap_counts: vec![0; species.len()],
            first: true,
            suppressed: 0,
        })
    }

    /// Gaps seen so far per species, in run order.
    #[cfg(test)]
    pub fn gap_counts(&self) -> &[usize] {
        &self.gap_counts
    }

    /// Records dropped because the block opened on a reference gap.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    fn base(row: &SequenceEntry, col: usize) -> u8 {
        row.sequence.as_bytes()[col]
    }

    fn is_indel(&self, col: usize) -> bool {
        self.block_rows
            .iter()
            .any(|row| Self::base(row, col) == b'-')
    }

    /// Appends one column to the group and counts its gaps.
    fn take_column(&mut self, col: usize, bases: &mut [String]) {
        for (i, row) in self.rows.iter().enumerate() {
            match row {
                Some(row) => {
                    let b = Self::base(row, col);
                    if b == b'-' {
                        self.gap_counts[i] += 1;
                    }
                    bases[i].push(char::from(b));
                }
                None => bases[i].push('?'),
            }
        }
    }

    fn anchor_fields(&self, col: usize) -> (Vec<String>, Vec<Position>, Vec<char>) {
        let mut chroms = Vec::with_capacity(self.rows.len());
        let mut positions = Vec::with_capacity(self.rows.len());
        let mut strands = Vec::with_capacity(self.rows.len());

        for (i, row) in self.rows.iter().enumerate() {
            match row {
                Some(row) => {
                    chroms.push(row.chrom.clone());
                    strands.push(row.strand);
                    if Self::base(row, col) == b'-' {
                        positions.push(Position::Gap);
                    } else {
                        positions.push(Position::At(row.start + col - self.gap_counts[i]));
                    }
                }
                None => {
                    chroms.push("?".to_string());
                    strands.push('?');
                    positions.push(Position::Absent);
                }
            }
        }

        (chroms, positions, strands)
    }
}

impl<'a> Iterator for RecordEmitter<'a> {
    type Item = BedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.col < self.width {
            let anchor = self.col;
            let (chroms, positions, strands) = self.anchor_fields(anchor);

            let mut bases = vec![String::new(); self.rows.len()];
            loop {
                let indel = self.is_indel(self.col);
                self.take_column(self.col, &mut bases);
                self.col += 1;
                if !indel || self.col >= self.width {
                    break;
                }
            }

            // reference row is always the first
            let opens_on_ref_gap = positions[0] == Position::Gap;
            if self.first && opens_on_ref_gap {
                self.first = false;
                self.suppressed += 1;
                log::debug!(
                    "{}:{} skipped a record opening on a reference gap",
                    self.ref_chrom,
                    self.pos
                );
                continue;
            }
            self.first = false;

            let record = BedRecord {
                ref_chrom: self.ref_chrom.to_string(),
                ref_start: self.pos,
                ref_end: self.pos + 1,
                ref_strand: self.ref_strand,
                chroms,
                positions,
                bases,
                strands,
                score: self.score.to_string(),
            };
            self.pos += 1;

            return Some(record);
        }

        None
    }
}

pub struct BedWriter<W: Write> {
    writer: W,
    species_csv: String,
}

impl<W: Write> BedWriter<W> {
    pub fn new(writer: W, species: &[String]) -> Self {
        Self {
            writer,
            species_csv: species.join(","),
        }
    }

    pub fn write_record(&mut self, record: &BedRecord) -> io::Result<()> {
        writeln!(self.writer, "{}", record.to_line(&self.species_csv))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
