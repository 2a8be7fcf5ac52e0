use crate::core::models::pair::PairType;
use crate::core::potential::binning::{BinScheme, DEFAULT_BIN_COUNT, DEFAULT_BIN_WIDTH};
use crate::core::potential::distances::{
    DEFAULT_DISTANCE_CUTOFF, DEFAULT_GENERIC_MIN_SEPARATION, DEFAULT_PAIR_MIN_SEPARATION,
    PairFilter,
};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Distance cutoff {cutoff} lies beyond the binned range of {max_distance}")]
    CutoffBeyondBins { cutoff: f64, max_distance: f64 },
    #[error("The pair-type whitelist is empty")]
    EmptyWhitelist,
    #[error("Pair type {0} appears more than once in the whitelist")]
    DuplicatePairType(PairType),
}

/// Parameters shared by training, scoring and the distance listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialConfig {
    pub pair_filter: PairFilter,
    pub generic_min_separation: u32,
    pub binning: BinScheme,
}

impl Default for PotentialConfig {
    fn default() -> Self {
        Self {
            pair_filter: PairFilter::default(),
            generic_min_separation: DEFAULT_GENERIC_MIN_SEPARATION,
            binning: BinScheme::default(),
        }
    }
}

/// Builds a [`PotentialConfig`], falling back to the defaults for unset fields.
#[derive(Default)]
pub struct PotentialConfigBuilder {
    min_separation: Option<u32>,
    generic_min_separation: Option<u32>,
    cutoff: Option<f64>,
    bin_width: Option<f64>,
    bin_count: Option<usize>,
    whitelist: Option<Vec<PairType>>,
}

impl PotentialConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_separation(mut self, separation: u32) -> Self {
        self.min_separation = Some(separation);
        self
    }
    pub fn generic_min_separation(mut self, separation: u32) -> Self {
        self.generic_min_separation = Some(separation);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn bin_width(mut self, width: f64) -> Self {
        self.bin_width = Some(width);
        self
    }
    pub fn bin_count(mut self, count: usize) -> Self {
        self.bin_count = Some(count);
        self
    }
    pub fn whitelist(mut self, pair_types: Vec<PairType>) -> Self {
        self.whitelist = Some(pair_types);
        self
    }

    pub fn build(self) -> Result<PotentialConfig, ConfigError> {
        let min_separation = self.min_separation.unwrap_or(DEFAULT_PAIR_MIN_SEPARATION);
        if min_separation == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "min_separation",
                reason: "must be at least 1".to_string(),
            });
        }
        let generic_min_separation = self
            .generic_min_separation
            .unwrap_or(DEFAULT_GENERIC_MIN_SEPARATION);
        if generic_min_separation == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "generic_min_separation",
                reason: "must be at least 1".to_string(),
            });
        }

        let width = self.bin_width.unwrap_or(DEFAULT_BIN_WIDTH);
        let count = self.bin_count.unwrap_or(DEFAULT_BIN_COUNT);
        let binning = BinScheme::new(width, count).ok_or_else(|| ConfigError::InvalidParameter {
            name: "binning",
            reason: format!("width {} and count {} must both be positive", width, count),
        })?;

        let cutoff = self.cutoff.unwrap_or(DEFAULT_DISTANCE_CUTOFF);
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "cutoff",
                reason: format!("{} is not a positive distance", cutoff),
            });
        }
        if cutoff > binning.max_distance() {
            return Err(ConfigError::CutoffBeyondBins {
                cutoff,
                max_distance: binning.max_distance(),
            });
        }

        let whitelist = match self.whitelist {
            Some(pair_types) => {
                if pair_types.is_empty() {
                    return Err(ConfigError::EmptyWhitelist);
                }
                let mut set = BTreeSet::new();
                for pair_type in pair_types {
                    if !set.insert(pair_type) {
                        return Err(ConfigError::DuplicatePairType(pair_type));
                    }
                }
                set
            }
            None => PairType::default_whitelist().into_iter().collect(),
        };

        Ok(PotentialConfig {
            pair_filter: PairFilter {
                min_separation,
                whitelist,
                cutoff,
            },
            generic_min_separation,
            binning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(code: &str) -> PairType {
        code.parse().unwrap()
    }

    #[test]
    fn empty_builder_yields_default_config() {
        let config = PotentialConfigBuilder::new().build().unwrap();
        assert_eq!(config, PotentialConfig::default());
        assert_eq!(config.pair_filter.min_separation, 3);
        assert_eq!(config.generic_min_separation, 4);
        assert_eq!(config.pair_filter.cutoff, 20.0);
        assert_eq!(config.pair_filter.whitelist.len(), 10);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = PotentialConfigBuilder::new()
            .min_separation(5)
            .cutoff(15.0)
            .bin_width(0.5)
            .bin_count(40)
            .whitelist(vec![pair("AU"), pair("CG")])
            .build()
            .unwrap();
        assert_eq!(config.pair_filter.min_separation, 5);
        assert_eq!(config.binning.count(), 40);
        assert_eq!(config.binning.max_distance(), 20.0);
        assert!(config.pair_filter.is_whitelisted(&pair("CG")));
        assert!(!config.pair_filter.is_whitelisted(&pair("GG")));
    }

    #[test]
    fn build_rejects_cutoff_beyond_binned_range() {
        let result = PotentialConfigBuilder::new().cutoff(25.0).build();
        assert_eq!(
            result,
            Err(ConfigError::CutoffBeyondBins {
                cutoff: 25.0,
                max_distance: 20.0
            })
        );
    }

    #[test]
    fn build_rejects_degenerate_parameters() {
        assert!(matches!(
            PotentialConfigBuilder::new().bin_width(0.0).build(),
            Err(ConfigError::InvalidParameter { name: "binning", .. })
        ));
        assert!(matches!(
            PotentialConfigBuilder::new().min_separation(0).build(),
            Err(ConfigError::InvalidParameter { name: "min_separation", .. })
        ));
        assert!(matches!(
            PotentialConfigBuilder::new().cutoff(-1.0).build(),
            Err(ConfigError::InvalidParameter { name: "cutoff", .. })
        ));
    }

    #[test]
    fn build_rejects_empty_or_duplicated_whitelists() {
        assert_eq!(
            PotentialConfigBuilder::new().whitelist(vec![]).build(),
            Err(ConfigError::EmptyWhitelist)
        );
        assert_eq!(
            PotentialConfigBuilder::new()
                .whitelist(vec![pair("AU"), pair("AU")])
                .build(),
            Err(ConfigError::DuplicatePairType(pair("AU")))
        );
    }
}
