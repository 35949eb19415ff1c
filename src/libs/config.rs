use std::collections::{BTreeSet, HashSet};

use crate::libs::error::MafBedError;
use crate::libs::maf::BlockFilter;

/// Validated parameters of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub reference: String,
    pub chrom: String,
    /// Output species, reference first
    pub species: Vec<String>,
}

impl RunConfig {
    /// `species` must already be ordered, see [`explicit_order`] and [`derived_order`].
    pub fn new(reference: &str, chrom: &str, species: Vec<String>) -> Result<Self, MafBedError> {
        if reference.trim().is_empty() {
            return Err(MafBedError::ConfigurationError(
                "no reference species specified".to_string(),
            ));
        }
        if chrom.trim().is_empty() {
            return Err(MafBedError::ConfigurationError(
                "no chromosome specified".to_string(),
            ));
        }
        if species.first().map(String::as_str) != Some(reference) {
            return Err(MafBedError::ConfigurationError(format!(
                "species ordering must start with the reference {}",
                reference
            )));
        }

        let mut seen = HashSet::new();
        for name in &species {
            if name.is_empty() || name.contains(',') || name.contains(char::is_whitespace) {
                return Err(MafBedError::ConfigurationError(format!(
                    "invalid species name: {:?}",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(MafBedError::ConfigurationError(format!(
                    "species listed twice: {}",
                    name
                )));
            }
        }

        Ok(Self {
            reference: reference.to_string(),
            chrom: chrom.to_string(),
            species,
        })
    }

    pub fn filter(&self) -> BlockFilter {
        BlockFilter::new(&self.reference, &self.chrom)
    }
}

/// Keeps a user-supplied ordering, with the reference moved to the front.
///
/// ```
/// use mafbed::libs::config::explicit_order;
/// let names = vec!["mm10".to_string(), "hg38".to_string(), "canFam3".to_string()];
/// assert_eq!(explicit_order("hg38", names), vec!["hg38", "mm10", "canFam3"]);
/// ```
pub fn explicit_order(reference: &str, names: Vec<String>) -> Vec<String> {
    let mut species = vec![reference.to_string()];
    species.extend(names.into_iter().filter(|name| name != reference));
    species
}

/// Reference first, then every other discovered species alphabetically.
pub fn derived_order(reference: &str, discovered: BTreeSet<String>) -> Vec<String> {
    explicit_order(reference, discovered.into_iter().collect())
}
