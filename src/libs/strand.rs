use crate::libs::error::MafBedError;
use crate::libs::maf::{AlignmentBlock, SequenceEntry};
use crate::libs::nt::revcomp;

/// Mirrors a 0-based start against the full source length.
///
/// `None` when the row would run past the end of its source.
///
/// ```
/// use mafbed::libs::strand::mirror_start;
/// assert_eq!(mirror_start(100, 20, 1000), Some(880));
/// assert_eq!(mirror_start(880, 20, 1000), Some(100));
/// assert_eq!(mirror_start(990, 20, 1000), None);
/// ```
pub fn mirror_start(start: usize, aligned_length: usize, source_length: usize) -> Option<usize> {
    source_length
        .checked_sub(start)?
        .checked_sub(aligned_length)
}

fn flip(strand: char) -> char {
    if strand == '-' {
        '+'
    } else {
        '-'
    }
}

fn flip_entry(species: &str, entry: &mut SequenceEntry) -> Result<(), MafBedError> {
    let start = mirror_start(entry.start, entry.aligned_length, entry.source_length)
        .ok_or_else(|| {
            let message = format!(
                "{}.{}: start {} + size {} exceeds srcSize {}",
                species, entry.chrom, entry.start, entry.aligned_length, entry.source_length
            );
            MafBedError::parse(message, entry.line, "")
        })?;
    let sequence = revcomp(&entry.sequence).map_err(|ch| MafBedError::UnknownCharacter {
        ch,
        species: species.to_string(),
    })?;

    entry.start = start;
    entry.sequence = sequence;
    entry.strand = flip(entry.strand);

    Ok(())
}

/// Rewrites a block in place so that the row of `reference` is on the `+` strand.
///
/// Returns `true` when the block was flipped. A block without the reference
/// row is left untouched.
pub fn normalize_block(block: &mut AlignmentBlock, reference: &str) -> Result<bool, MafBedError> {
    match block.get(reference) {
        Some(entry) if entry.strand == '-' => {}
        _ => return Ok(false),
    }

    for (species, entry) in block.entries.iter_mut() {
        flip_entry(species, entry)?;
    }

    Ok(true)
}
