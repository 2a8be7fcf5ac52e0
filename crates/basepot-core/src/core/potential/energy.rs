use super::binning::{BinScheme, DistanceBin};
use super::frequency::FrequencyTable;
use crate::core::models::pair::PairType;
use std::collections::BTreeMap;

/// Inverse-Boltzmann pseudo energy, `-log10(observed / reference)`.
///
/// Returns `None` when either frequency is not strictly positive, so that a
/// missing bin never turns into a number that could leak into a sum.
#[inline]
pub fn pseudo_energy(observed_probability: f64, reference_frequency: f64) -> Option<f64> {
    if observed_probability > 0.0 && reference_frequency > 0.0 {
        Some((reference_frequency / observed_probability).log10())
    } else {
        None
    }
}

/// Outcome of looking up a (pair type, bin) cell in a [`PotentialTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnergyLookup {
    Defined(f64),
    /// The cell exists but the pair type was never observed in that bin.
    Undefined,
    /// The cell is not part of the table.
    Unseen,
}

/// Trained pseudo-energy lookup table.
///
/// Cells map to `Option<f64>`: `None` marks an undefined energy. A cell that
/// is absent altogether is reported as [`EnergyLookup::Unseen`].
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialTable {
    scheme: BinScheme,
    energies: BTreeMap<(PairType, DistanceBin), Option<f64>>,
}

impl PotentialTable {
    pub fn new(scheme: BinScheme) -> Self {
        Self {
            scheme,
            energies: BTreeMap::new(),
        }
    }

    /// Applies [`pseudo_energy`] to every cell of a frequency table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let energies = frequencies
            .iter()
            .map(|(pair_type, bin, entry)| {
                let energy = entry
                    .observed_probability
                    .zip(entry.reference_frequency)
                    .and_then(|(observed, reference)| pseudo_energy(observed, reference));
                ((pair_type, bin), energy)
            })
            .collect();
        Self {
            scheme: *frequencies.scheme(),
            energies,
        }
    }

    pub fn scheme(&self) -> &BinScheme {
        &self.scheme
    }

    pub fn insert(&mut self, pair_type: PairType, bin: DistanceBin, energy: Option<f64>) {
        self.energies.insert((pair_type, bin), energy);
    }

    pub fn contains(&self, pair_type: PairType, bin: DistanceBin) -> bool {
        self.energies.contains_key(&(pair_type, bin))
    }

    pub fn lookup(&self, pair_type: PairType, bin: DistanceBin) -> EnergyLookup {
        match self.energies.get(&(pair_type, bin)) {
            Some(Some(energy)) => EnergyLookup::Defined(*energy),
            Some(None) => EnergyLookup::Undefined,
            None => EnergyLookup::Unseen,
        }
    }

    pub fn pair_types(&self) -> Vec<PairType> {
        let mut pair_types: Vec<PairType> = self.energies.keys().map(|(p, _)| *p).collect();
        pair_types.dedup();
        pair_types
    }

    /// Cells of one pair type, bins ascending.
    pub fn row(&self, pair_type: PairType) -> impl Iterator<Item = (DistanceBin, Option<f64>)> + '_ {
        self.energies
            .range((pair_type, DistanceBin(0))..=(pair_type, DistanceBin(usize::MAX)))
            .map(|(&(_, bin), &energy)| (bin, energy))
    }

    /// All cells, pair types in code order and bins ascending.
    pub fn iter(&self) -> impl Iterator<Item = (PairType, DistanceBin, Option<f64>)> + '_ {
        self.energies
            .iter()
            .map(|(&(pair_type, bin), &energy)| (pair_type, bin, energy))
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn defined_count(&self) -> usize {
        self.energies.values().filter(|e| e.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::pair::BasePairObservation;
    use crate::core::potential::frequency::FrequencyAccumulator;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn pair(code: &str) -> PairType {
        code.parse().unwrap()
    }

    #[test]
    fn pseudo_energy_is_zero_when_observed_matches_reference() {
        assert_eq!(pseudo_energy(0.25, 0.25), Some(0.0));
    }

    #[test]
    fn pseudo_energy_is_negative_for_enrichment_and_positive_for_depletion() {
        assert!(f64_approx_equal(pseudo_energy(0.5, 0.05).unwrap(), -1.0));
        assert!(f64_approx_equal(pseudo_energy(0.01, 0.1).unwrap(), 1.0));
    }

    #[test]
    fn pseudo_energy_decreases_strictly_with_observed_probability() {
        let reference = 0.1;
        let energies: Vec<f64> = (1..=100)
            .map(|i| pseudo_energy(i as f64 / 100.0, reference).unwrap())
            .collect();
        assert!(energies.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn pseudo_energy_is_undefined_for_zero_inputs() {
        assert_eq!(pseudo_energy(0.0, 0.3), None);
        assert_eq!(pseudo_energy(0.3, 0.0), None);
        assert_eq!(pseudo_energy(0.0, 0.0), None);
    }

    #[test]
    fn from_frequencies_marks_empty_cells_as_undefined() {
        let mut acc = FrequencyAccumulator::new(BinScheme::default(), PairType::default_whitelist());
        for (code, distance) in [("AU", 5.5), ("AU", 5.6), ("CG", 5.7), ("CG", 8.0)] {
            acc.add(&BasePairObservation {
                pair_type: pair(code),
                residue_pair: (1, 9),
                distance,
            });
        }
        let table = PotentialTable::from_frequencies(&acc.finalize());

        assert_eq!(table.len(), 10 * 20);
        // AU: p = 1.0 in bin 5, reference = 3/4.
        match table.lookup(pair("AU"), DistanceBin(5)) {
            EnergyLookup::Defined(e) => assert!(f64_approx_equal(e, -(1.0f64 / 0.75).log10())),
            other => panic!("unexpected lookup {:?}", other),
        }
        // CG: p = 0.5 in bin 8, reference = 1/4.
        match table.lookup(pair("CG"), DistanceBin(8)) {
            EnergyLookup::Defined(e) => assert!(f64_approx_equal(e, -(2.0f64).log10())),
            other => panic!("unexpected lookup {:?}", other),
        }
        assert_eq!(table.lookup(pair("AU"), DistanceBin(8)), EnergyLookup::Undefined);
        assert_eq!(table.lookup(pair("GG"), DistanceBin(5)), EnergyLookup::Undefined);
        assert_eq!(table.lookup(pair("UA"), DistanceBin(5)), EnergyLookup::Unseen);
        assert_eq!(table.defined_count(), 3);
    }

    #[test]
    fn row_returns_bins_of_one_pair_type_in_order() {
        let mut table = PotentialTable::new(BinScheme::default());
        table.insert(pair("GG"), DistanceBin(2), Some(0.5));
        table.insert(pair("AU"), DistanceBin(1), None);
        table.insert(pair("AU"), DistanceBin(0), Some(-0.25));

        let row: Vec<_> = table.row(pair("AU")).collect();
        assert_eq!(row, vec![(DistanceBin(0), Some(-0.25)), (DistanceBin(1), None)]);
        assert_eq!(table.pair_types(), vec![pair("AU"), pair("GG")]);
    }
}
