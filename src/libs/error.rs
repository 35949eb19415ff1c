use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MafBedError {
    /// Malformed header or sequence line
    ParseError {
        /// A human-readable message explaining the error
        message: String,
        /// The line number (1-based)
        line: usize,
        /// The offending input line
        snippet: String,
    },
    /// A residue outside {A,C,G,T,N,-} met while complementing
    UnknownCharacter {
        ch: char,
        /// Species row the residue came from
        species: String,
    },
    /// Invalid or missing run parameters
    ConfigurationError(String),
}

impl MafBedError {
    pub fn parse(message: impl Into<String>, line: usize, snippet: &str) -> Self {
        MafBedError::ParseError {
            message: message.into(),
            line,
            snippet: snippet.to_string(),
        }
    }
}

impl fmt::Display for MafBedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MafBedError::ParseError { message, line, .. } if *line == 0 => {
                write!(f, "Parse error: {}", message)
            }
            MafBedError::ParseError {
                message,
                line,
                snippet,
            } if snippet.is_empty() => write!(f, "Parse error at line {}: {}", line, message),
            MafBedError::ParseError {
                message,
                line,
                snippet,
            } => {
                write!(
                    f,
                    "Parse error at line {}: {}\nSnippet: \"{}\"",
                    line, message, snippet
                )
            }
            MafBedError::UnknownCharacter { ch, species } => {
                write!(
                    f,
                    "Unrecognised alignment character '{}' in the row of {}",
                    ch, species
                )
            }
            MafBedError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MafBedError {}

/// Why a completed block was dropped by the reader. Not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMiss {
    /// The reference species has no row in the block
    MissingReference,
    /// The reference row sits on another chromosome
    OtherChromosome(String),
}

impl fmt::Display for FilterMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMiss::MissingReference => write!(f, "reference species absent"),
            FilterMiss::OtherChromosome(chrom) => write!(f, "reference on {}", chrom),
        }
    }
}
