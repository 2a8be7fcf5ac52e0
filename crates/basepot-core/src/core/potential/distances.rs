use crate::core::models::atom::AtomRecord;
use crate::core::models::pair::{BasePairObservation, GenericDistance, PairType};
use crate::core::utils::geometry::euclidean_distance;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Minimum residue separation for whitelisted base-pair statistics.
pub const DEFAULT_PAIR_MIN_SEPARATION: u32 = 3;
/// Minimum residue separation for the unfiltered distance helper.
pub const DEFAULT_GENERIC_MIN_SEPARATION: u32 = 4;
/// Pairs farther apart than this are not observed.
pub const DEFAULT_DISTANCE_CUTOFF: f64 = 20.0;

/// Selection rules for base-pair observations.
#[derive(Debug, Clone, PartialEq)]
pub struct PairFilter {
    pub min_separation: u32,
    pub whitelist: BTreeSet<PairType>,
    pub cutoff: f64,
}

impl Default for PairFilter {
    fn default() -> Self {
        Self {
            min_separation: DEFAULT_PAIR_MIN_SEPARATION,
            whitelist: PairType::default_whitelist().into_iter().collect(),
            cutoff: DEFAULT_DISTANCE_CUTOFF,
        }
    }
}

impl PairFilter {
    #[inline]
    pub fn is_whitelisted(&self, pair_type: &PairType) -> bool {
        self.whitelist.contains(pair_type)
    }
}

/// Enumerates the whitelisted residue pairs of one structure.
///
/// Pairs are visited as `(i, j)` with `i < j` in record order, and the pair
/// type is built in that same order. A pair is kept when its residue
/// separation reaches `filter.min_separation`, its type is whitelisted and
/// its distance does not exceed `filter.cutoff`.
pub fn base_pair_observations(
    atoms: &[AtomRecord],
    filter: &PairFilter,
) -> Vec<BasePairObservation> {
    atoms
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| {
            if a.separation(b) < filter.min_separation {
                return None;
            }
            let pair_type = PairType::new(a.residue_type, b.residue_type);
            if !filter.is_whitelisted(&pair_type) {
                return None;
            }
            let distance = euclidean_distance(&a.position, &b.position);
            (distance <= filter.cutoff).then_some(BasePairObservation {
                pair_type,
                residue_pair: (a.residue_index, b.residue_index),
                distance,
            })
        })
        .collect()
}

/// Distances between every residue pair at least `min_separation` apart,
/// regardless of type and without a cutoff.
pub fn generic_distances(atoms: &[AtomRecord], min_separation: u32) -> Vec<GenericDistance> {
    atoms
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.separation(b) >= min_separation)
        .map(|(a, b)| GenericDistance {
            residue_pair: (a.residue_index, b.residue_index),
            distance: euclidean_distance(&a.position, &b.position),
        })
        .collect()
}
