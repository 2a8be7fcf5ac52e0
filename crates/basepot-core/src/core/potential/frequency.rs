use super::binning::{BinScheme, DistanceBin};
use crate::core::models::pair::{BasePairObservation, PairType};
use std::collections::BTreeMap;

/// Mutable counting phase of the frequency statistics.
///
/// Accumulators are cheap to create per structure and can be merged, so
/// structures may be processed independently and reduced afterwards.
/// Reference frequencies depend on corpus-wide totals and only exist after
/// [`FrequencyAccumulator::finalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAccumulator {
    scheme: BinScheme,
    counts: BTreeMap<PairType, Vec<u64>>,
    unbinned: u64,
}

impl FrequencyAccumulator {
    /// Creates an empty accumulator with a zeroed row for each of `pair_types`.
    pub fn new(scheme: BinScheme, pair_types: impl IntoIterator<Item = PairType>) -> Self {
        let counts = pair_types
            .into_iter()
            .map(|pair_type| (pair_type, vec![0; scheme.count()]))
            .collect();
        Self {
            scheme,
            counts,
            unbinned: 0,
        }
    }

    pub fn scheme(&self) -> &BinScheme {
        &self.scheme
    }

    pub fn add(&mut self, observation: &BasePairObservation) {
        let Some(bin) = self.scheme.bin_for(observation.distance) else {
            self.unbinned += 1;
            return;
        };
        let bin_count = self.scheme.count();
        self.counts
            .entry(observation.pair_type)
            .or_insert_with(|| vec![0; bin_count])[bin.index()] += 1;
    }

    pub fn extend<'a>(&mut self, observations: impl IntoIterator<Item = &'a BasePairObservation>) {
        for observation in observations {
            self.add(observation);
        }
    }

    /// Combines the counts of two accumulators built with the same scheme.
    pub fn merge(mut self, other: FrequencyAccumulator) -> FrequencyAccumulator {
        debug_assert_eq!(self.scheme, other.scheme);
        let bin_count = self.scheme.count();
        for (pair_type, other_counts) in other.counts {
            let counts = self
                .counts
                .entry(pair_type)
                .or_insert_with(|| vec![0; bin_count]);
            for (count, other_count) in counts.iter_mut().zip(other_counts) {
                *count += other_count;
            }
        }
        self.unbinned += other.unbinned;
        self
    }

    /// Number of binned observations added so far.
    pub fn observation_count(&self) -> u64 {
        self.counts.values().flatten().sum()
    }

    /// Closes the counting phase and derives probabilities and reference frequencies.
    pub fn finalize(self) -> FrequencyTable {
        let bin_count = self.scheme.count();

        let mut bin_totals = vec![0u64; bin_count];
        for counts in self.counts.values() {
            for (total, count) in bin_totals.iter_mut().zip(counts) {
                *total += count;
            }
        }
        let grand_total: u64 = bin_totals.iter().sum();

        let reference: Vec<Option<f64>> = bin_totals
            .iter()
            .map(|&total| ratio(total, grand_total))
            .collect();

        let rows = self
            .counts
            .into_iter()
            .map(|(pair_type, counts)| {
                let pair_total: u64 = counts.iter().sum();
                let row = counts
                    .iter()
                    .zip(&reference)
                    .map(|(&observed_count, &reference_frequency)| FrequencyEntry {
                        observed_count,
                        observed_probability: ratio(observed_count, pair_total),
                        reference_frequency,
                    })
                    .collect();
                (pair_type, row)
            })
            .collect();

        FrequencyTable {
            scheme: self.scheme,
            rows,
            bin_totals,
            grand_total,
            unbinned: self.unbinned,
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// Statistics for one (pair type, bin) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyEntry {
    pub observed_count: u64,
    /// Count divided by the pair type's total; `None` when the total is zero.
    pub observed_probability: Option<f64>,
    /// Pooled share of the bin over all pair types; `None` for an empty corpus.
    pub reference_frequency: Option<f64>,
}

/// Immutable result of the counting phase.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    scheme: BinScheme,
    rows: BTreeMap<PairType, Vec<FrequencyEntry>>,
    bin_totals: Vec<u64>,
    grand_total: u64,
    unbinned: u64,
}

impl FrequencyTable {
    pub fn scheme(&self) -> &BinScheme {
        &self.scheme
    }

    pub fn pair_types(&self) -> impl Iterator<Item = PairType> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, pair_type: &PairType) -> Option<&[FrequencyEntry]> {
        self.rows.get(pair_type).map(Vec::as_slice)
    }

    pub fn entry(&self, pair_type: &PairType, bin: DistanceBin) -> Option<&FrequencyEntry> {
        self.rows.get(pair_type).and_then(|row| row.get(bin.index()))
    }

    /// Iterates all cells, pair types in code order and bins ascending.
    pub fn iter(&self) -> impl Iterator<Item = (PairType, DistanceBin, &FrequencyEntry)> + '_ {
        self.rows.iter().flat_map(|(&pair_type, row)| {
            row.iter()
                .enumerate()
                .map(move |(i, entry)| (pair_type, DistanceBin(i), entry))
        })
    }

    pub fn pair_total(&self, pair_type: &PairType) -> u64 {
        self.rows
            .get(pair_type)
            .map_or(0, |row| row.iter().map(|e| e.observed_count).sum())
    }

    pub fn bin_total(&self, bin: DistanceBin) -> u64 {
        self.bin_totals.get(bin.index()).copied().unwrap_or(0)
    }

    pub fn reference_frequency(&self, bin: DistanceBin) -> Option<f64> {
        if self.grand_total == 0 {
            return None;
        }
        self.bin_totals
            .get(bin.index())
            .map(|&total| total as f64 / self.grand_total as f64)
    }

    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }

    /// Observations that fell outside the binned range.
    pub fn unbinned(&self) -> u64 {
        self.unbinned
    }
}
