use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed nucleotide alphabet recognised by the pipeline.
///
/// Residues whose names do not resolve to one of these variants are not
/// nucleotides as far as the potential is concerned, and their atoms are
/// dropped during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nucleotide {
    Adenine,  // A
    Uracil,   // U
    Cytosine, // C
    Guanine,  // G
}

#[rustfmt::skip]
static RESIDUE_NAME_ALIASES: Map<&'static str, Nucleotide> = phf_map! {
    // --- One-letter names (current PDB convention) ---
    "A" => Nucleotide::Adenine, "U" => Nucleotide::Uracil,
    "C" => Nucleotide::Cytosine, "G" => Nucleotide::Guanine,

    // --- Long names ---
    "ADE" => Nucleotide::Adenine, "URA" => Nucleotide::Uracil,
    "CYT" => Nucleotide::Cytosine, "GUA" => Nucleotide::Guanine,

    // --- Amber RNA names ---
    "RA" => Nucleotide::Adenine, "RU" => Nucleotide::Uracil,
    "RC" => Nucleotide::Cytosine, "RG" => Nucleotide::Guanine,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("'{0}' is not a recognised nucleotide residue name")]
pub struct UnknownNucleotide(pub String);

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [
        Nucleotide::Adenine,
        Nucleotide::Uracil,
        Nucleotide::Cytosine,
        Nucleotide::Guanine,
    ];

    /// Resolves a residue name as found in columns 18-20 of a structure file.
    pub fn from_residue_name(name: &str) -> Option<Self> {
        RESIDUE_NAME_ALIASES.get(name.trim()).copied()
    }

    /// The one-letter code used to build pair-type codes.
    pub fn code(self) -> char {
        match self {
            Nucleotide::Adenine => 'A',
            Nucleotide::Uracil => 'U',
            Nucleotide::Cytosine => 'C',
            Nucleotide::Guanine => 'G',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Nucleotide::Adenine),
            'U' => Some(Nucleotide::Uracil),
            'C' => Some(Nucleotide::Cytosine),
            'G' => Some(Nucleotide::Guanine),
            _ => None,
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Nucleotide {
    type Err = UnknownNucleotide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_residue_name(s).ok_or_else(|| UnknownNucleotide(s.to_string()))
    }
}
