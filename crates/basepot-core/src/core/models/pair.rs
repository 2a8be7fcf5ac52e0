use super::residue::Nucleotide;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An ordered two-letter base-pair code such as "AU".
///
/// The order is the encounter order of the two residues in the structure
/// file, so `AU` and `UA` are distinct pair types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairType {
    pub first: Nucleotide,
    pub second: Nucleotide,
}

/// The ten pair codes considered by default.
pub const DEFAULT_PAIR_WHITELIST: [&str; 10] =
    ["AA", "AU", "AC", "AG", "UU", "UC", "UG", "CC", "CG", "GG"];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid base pair code '{0}': expected two letters from A, U, C, G")]
pub struct InvalidPairCode(pub String);

impl PairType {
    pub fn new(first: Nucleotide, second: Nucleotide) -> Self {
        Self { first, second }
    }

    pub fn default_whitelist() -> Vec<PairType> {
        DEFAULT_PAIR_WHITELIST
            .iter()
            .filter_map(|code| code.parse().ok())
            .collect()
    }
}

impl fmt::Display for PairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first.code(), self.second.code())
    }
}

impl FromStr for PairType {
    type Err = InvalidPairCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => {
                match (Nucleotide::from_code(a), Nucleotide::from_code(b)) {
                    (Some(first), Some(second)) => Ok(PairType::new(first, second)),
                    _ => Err(InvalidPairCode(s.to_string())),
                }
            }
            _ => Err(InvalidPairCode(s.to_string())),
        }
    }
}

/// A whitelisted residue pair found within the distance cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePairObservation {
    pub pair_type: PairType,
    /// Residue sequence numbers of the two residues, in encounter order.
    pub residue_pair: (i32, i32),
    pub distance: f64,
}

/// A residue pair produced by the unfiltered distance helper.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDistance {
    pub residue_pair: (i32, i32),
    pub distance: f64,
}
