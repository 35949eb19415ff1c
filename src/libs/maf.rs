use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::io::BufRead;

use crate::libs::error::{FilterMiss, MafBedError};

/// One species' row within a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceEntry {
    pub chrom: String,
    pub start: usize,          // 0-based, on the strand of the row
    pub aligned_length: usize, // ungapped residues in `sequence`
    pub strand: char,
    pub source_length: usize,
    pub sequence: String,
    pub line: usize, // input line of the `s` row, 0 when not read from a file
}

/// Rows of one alignment block keyed by species, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentBlock {
    pub score: String,
    pub entries: IndexMap<String, SequenceEntry>,
}

impl AlignmentBlock {
    pub fn new(score: &str) -> Self {
        Self {
            score: score.to_string(),
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, species: &str) -> Option<&SequenceEntry> {
        self.entries.get(species)
    }

    /// Number of alignment columns. Zero for an empty block.
    pub fn width(&self) -> usize {
        self.entries
            .values()
            .next()
            .map(|e| e.sequence.len())
            .unwrap_or(0)
    }
}

/// Splits `hg38.chr1` into `("hg38", "chr1")` on the first dot.
pub fn split_src(src: &str) -> Option<(&str, &str)> {
    src.split_once('.')
}

/// Score value of an `a` line, captured verbatim.
///
/// ```
/// use mafbed::libs::maf::parse_header;
/// assert_eq!(parse_header("a score=23262.0 pass=2").unwrap(), "23262.0");
/// assert!(parse_header("a pass=2").is_err());
/// ```
pub fn parse_header(line: &str) -> Result<String, String> {
    line.split_whitespace()
        .skip(1)
        .find_map(|field| field.strip_prefix("score="))
        .filter(|score| !score.is_empty())
        .map(|score| score.to_string())
        .ok_or_else(|| "block header lacks a score field".to_string())
}

/// Parses an `s` line into the species name and its row.
///
/// Format: `s src start size strand srcSize text`
pub fn parse_sequence_line(line: &str) -> Result<(String, SequenceEntry), String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 7 {
        return Err(format!(
            "sequence line has {} fields, expected 7",
            parts.len()
        ));
    }
    if parts.len() > 7 {
        return Err(format!(
            "sequence line has {} fields, extra fields after the alignment text",
            parts.len()
        ));
    }

    let (species, chrom) = split_src(parts[1])
        .ok_or_else(|| format!("source name without species prefix: {}", parts[1]))?;

    let start: usize = parts[2]
        .parse()
        .map_err(|_| format!("Invalid start: {}", parts[2]))?;
    let aligned_length: usize = parts[3]
        .parse()
        .map_err(|_| format!("Invalid size: {}", parts[3]))?;
    let strand = match parts[4] {
        "+" => '+',
        "-" => '-',
        s => return Err(format!("Invalid strand: {}", s)),
    };
    let source_length: usize = parts[5]
        .parse()
        .map_err(|_| format!("Invalid srcSize: {}", parts[5]))?;

    let entry = SequenceEntry {
        chrom: chrom.to_string(),
        start,
        aligned_length,
        strand,
        source_length,
        sequence: parts[6].to_string(),
        line: 0,
    };

    Ok((species.to_string(), entry))
}

/// Reference species and chromosome a block must match to be kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFilter {
    pub reference: String,
    pub chrom: String,
}

impl BlockFilter {
    pub fn new(reference: &str, chrom: &str) -> Self {
        Self {
            reference: reference.to_string(),
            chrom: chrom.to_string(),
        }
    }

    pub fn check(&self, block: &AlignmentBlock) -> Result<(), FilterMiss> {
        match block.get(&self.reference) {
            None => Err(FilterMiss::MissingReference),
            Some(entry) if entry.chrom != self.chrom => {
                Err(FilterMiss::OtherChromosome(entry.chrom.clone()))
            }
            Some(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub blocks: usize,
    pub kept: usize,
    pub missing_reference: usize,
    pub other_chromosome: usize,
}

enum ReaderState {
    Idle,
    InBlock(AlignmentBlock),
}

/// Pulls filtered alignment blocks out of a MAF line stream.
///
/// The iterator stops after the first error.
pub struct MafBlockReader<R> {
    reader: R,
    line_buf: String,
    line_no: usize,
    state: ReaderState,
    filter: BlockFilter,
    stats: ReaderStats,
    done: bool,
}

impl<R: BufRead> MafBlockReader<R> {
    pub fn new(reader: R, filter: BlockFilter) -> Self {
        Self {
            reader,
            line_buf: String::new(),
            line_no: 0,
            state: ReaderState::Idle,
            filter,
            stats: ReaderStats::default(),
            done: false,
        }
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    fn read_line(&mut self) -> std::io::Result<usize> {
        self.line_buf.clear();
        let n = self.reader.read_line(&mut self.line_buf)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n)
    }

    fn parse_error(&self, message: impl Into<String>) -> MafBedError {
        MafBedError::parse(message, self.line_no, self.line_buf.trim_end())
    }

    /// Closes the current block, if any, and applies the filter.
    fn terminate(&mut self) -> Option<AlignmentBlock> {
        let block = match std::mem::replace(&mut self.state, ReaderState::Idle) {
            ReaderState::Idle => return None,
            ReaderState::InBlock(block) => block,
        };
        self.stats.blocks += 1;

        match self.filter.check(&block) {
            Ok(()) => {
                self.stats.kept += 1;
                Some(block)
            }
            Err(miss) => {
                log::debug!("Block ending at line {} skipped: {}", self.line_no, miss);
                match miss {
                    FilterMiss::MissingReference => self.stats.missing_reference += 1,
                    FilterMiss::OtherChromosome(_) => self.stats.other_chromosome += 1,
                }
                None
            }
        }
    }

    fn add_sequence(&mut self) -> Result<(), MafBedError> {
        let (species, mut entry) =
            parse_sequence_line(&self.line_buf).map_err(|e| self.parse_error(e))?;

        let line_no = self.line_no;
        entry.line = line_no;
        let snippet = self.line_buf.trim_end();
        let block = match &mut self.state {
            ReaderState::InBlock(block) => block,
            ReaderState::Idle => {
                return Err(MafBedError::parse(
                    "sequence line outside of an alignment block",
                    line_no,
                    snippet,
                ))
            }
        };

        let width = block.width();
        if !block.entries.is_empty() && entry.sequence.len() != width {
            let message = format!(
                "alignment text of {} has {} columns, block has {}",
                species,
                entry.sequence.len(),
                width
            );
            return Err(MafBedError::parse(message, line_no, snippet));
        }

        if let Some(old) = block.entries.insert(species.clone(), entry) {
            log::debug!(
                "Line {}: second row for {} replaces {}:{}",
                line_no,
                species,
                old.chrom,
                old.start
            );
        }

        Ok(())
    }
}

impl<R: BufRead> Iterator for MafBlockReader<R> {
    type Item = Result<AlignmentBlock, MafBedError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.read_line() {
                Ok(0) => {
                    // EOF closes an unterminated block
                    self.done = true;
                    return self.terminate().map(Ok);
                }
                Ok(_) => {}
                Err(e) => {
                    // the failed line was never counted
                    self.done = true;
                    return Some(Err(MafBedError::parse(
                        format!("read failure: {}", e),
                        self.line_no + 1,
                        "",
                    )));
                }
            }

            let line = self.line_buf.trim();
            if line.is_empty() {
                if let Some(block) = self.terminate() {
                    return Some(Ok(block));
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            let tag = match line.split_whitespace().next() {
                Some("a") => 'a',
                Some("s") => 's',
                _ => '?',
            };

            match tag {
                'a' => {
                    let score = match parse_header(self.line_buf.trim()) {
                        Ok(score) => score,
                        Err(e) => {
                            self.done = true;
                            return Some(Err(self.parse_error(e)));
                        }
                    };
                    // a header without a preceding blank line still ends the old block
                    let finished = self.terminate();
                    self.state = ReaderState::InBlock(AlignmentBlock::new(&score));
                    if let Some(block) = finished {
                        return Some(Ok(block));
                    }
                }
                's' => {
                    if let Err(e) = self.add_sequence() {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
                // i, e, q and unknown lines carry nothing we use
                _ => {}
            }
        }
    }
}

/// Collects every distinct species named by an `s` line, over all chromosomes.
pub fn scan_species<R: BufRead>(reader: R) -> Result<BTreeSet<String>, MafBedError> {
    let mut species = BTreeSet::new();

    for (i, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| MafBedError::parse(format!("read failure: {}", e), i + 1, ""))?;
        let mut fields = line.split_whitespace();
        if fields.next() != Some("s") {
            continue;
        }
        let src = fields
            .next()
            .ok_or_else(|| MafBedError::parse("sequence line has no source", i + 1, &line))?;
        let (name, _) = split_src(src).ok_or_else(|| {
            MafBedError::parse(
                format!("source name without species prefix: {}", src),
                i + 1,
                &line,
            )
        })?;
        species.insert(name.to_string());
    }

    Ok(species)
}
