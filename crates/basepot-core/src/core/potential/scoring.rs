use super::binning::DistanceBin;
use super::energy::{EnergyLookup, PotentialTable};
use crate::core::models::pair::{BasePairObservation, PairType};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("No potential entry for pair type {pair_type} in bin {label}")]
    UnseenCombination { pair_type: PairType, label: String },
    #[error("Pseudo energy for pair type {pair_type} in bin {label} is undefined")]
    UndefinedEnergy { pair_type: PairType, label: String },
}

/// What to do when an observation has no usable energy in the table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MissingEnergyPolicy {
    /// Abort scoring of the structure.
    #[default]
    Fail,
    /// Substitute a fixed energy and flag the row.
    Penalty(f64),
}

/// One observation with the energy it contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub pair_type: PairType,
    pub residue_pair: (i32, i32),
    pub bin: DistanceBin,
    pub energy: f64,
    /// Set when `energy` is the policy penalty rather than a table value.
    pub substituted: bool,
}

/// Per-structure score: the scored rows and their sum.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureScore {
    pub pairs: Vec<ScoredPair>,
    pub total: f64,
    /// Observations that fell outside the table's binned range.
    pub unbinned: usize,
}

impl StructureScore {
    /// True when no observation contributed, as opposed to a sum that happens to be zero.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn substituted_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.substituted).count()
    }
}

pub struct Scorer<'a> {
    potential: &'a PotentialTable,
    policy: MissingEnergyPolicy,
}

impl<'a> Scorer<'a> {
    pub fn new(potential: &'a PotentialTable, policy: MissingEnergyPolicy) -> Self {
        Self { potential, policy }
    }

    pub fn score(&self, observations: &[BasePairObservation]) -> Result<StructureScore, ScoringError> {
        let scheme = self.potential.scheme();
        let mut score = StructureScore::default();

        for observation in observations {
            let Some(bin) = scheme.bin_for(observation.distance) else {
                score.unbinned += 1;
                continue;
            };

            let (energy, substituted) = match self.potential.lookup(observation.pair_type, bin) {
                EnergyLookup::Defined(energy) => (energy, false),
                missing => {
                    let energy = self.resolve_missing(observation.pair_type, bin, missing)?;
                    (energy, true)
                }
            };

            score.total += energy;
            score.pairs.push(ScoredPair {
                pair_type: observation.pair_type,
                residue_pair: observation.residue_pair,
                bin,
                energy,
                substituted,
            });
        }

        Ok(score)
    }

    fn resolve_missing(
        &self,
        pair_type: PairType,
        bin: DistanceBin,
        lookup: EnergyLookup,
    ) -> Result<f64, ScoringError> {
        let label = self.potential.scheme().label(bin).to_string();
        match self.policy {
            MissingEnergyPolicy::Penalty(penalty) => {
                debug!(
                    "Substituting penalty {} for {} in bin {} ({:?})",
                    penalty, pair_type, label, lookup
                );
                Ok(penalty)
            }
            MissingEnergyPolicy::Fail => match lookup {
                EnergyLookup::Undefined => Err(ScoringError::UndefinedEnergy { pair_type, label }),
                _ => Err(ScoringError::UnseenCombination { pair_type, label }),
            },
        }
    }
}
