//! Residue complements for aligned DNA rows.

/// Complement of one aligned residue, case preserved.
///
/// Only `A C G T N -` (either case) are accepted; anything else yields `None`.
///
/// ```
/// use mafbed::libs::nt::complement;
/// assert_eq!(complement(b'A'), Some(b'T'));
/// assert_eq!(complement(b'g'), Some(b'c'));
/// assert_eq!(complement(b'-'), Some(b'-'));
/// assert_eq!(complement(b'R'), None);
/// ```
pub fn complement(base: u8) -> Option<u8> {
    let comp = match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'N' => b'N',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'n' => b'n',
        b'-' => b'-',
        _ => return None,
    };
    Some(comp)
}

/// Reverse-complement of an aligned row.
///
/// On failure the offending character is returned.
///
/// ```
/// use mafbed::libs::nt::revcomp;
/// assert_eq!(revcomp("AC-gtN").unwrap(), "Nac-GT");
/// assert_eq!(revcomp("ACXT").unwrap_err(), 'X');
/// ```
pub fn revcomp(seq: &str) -> Result<String, char> {
    let mut rc = Vec::with_capacity(seq.len());
    for &base in seq.as_bytes().iter().rev() {
        match complement(base) {
            Some(c) => rc.push(c),
            None => return Err(char::from(base)),
        }
    }

    // every accepted byte is ASCII
    Ok(rc.into_iter().map(char::from).collect())
}
