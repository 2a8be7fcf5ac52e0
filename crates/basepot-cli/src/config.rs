use crate::cli::PotentialArgs;
use crate::error::{CliError, Result};
use basepot::core::models::pair::PairType;
use basepot::engine::config::{PotentialConfig, PotentialConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_TAG: &str = "corpus";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPairsConfig {
    min_separation: Option<u32>,
    cutoff: Option<f64>,
    whitelist: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDistancesConfig {
    min_separation: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialBinningConfig {
    width: Option<f64>,
    count: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialTrainingConfig {
    tag: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialScoringConfig {
    penalty: Option<f64>,
}

/// Settings read from a TOML file. Every field is optional; command-line
/// flags take precedence over the file, and the file over built-in defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialConfig {
    pairs: Option<PartialPairsConfig>,
    distances: Option<PartialDistancesConfig>,
    binning: Option<PartialBinningConfig>,
    training: Option<PartialTrainingConfig>,
    scoring: Option<PartialScoringConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` if given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn potential_config(&self, overrides: &PotentialArgs) -> Result<PotentialConfig> {
        self.builder(overrides, None)?
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Like [`Self::potential_config`] but with the generic separation overridden.
    pub fn distance_config(&self, min_separation: Option<u32>) -> Result<PotentialConfig> {
        self.builder(&PotentialArgs::default(), min_separation)?
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn builder(
        &self,
        overrides: &PotentialArgs,
        generic_min_separation: Option<u32>,
    ) -> Result<PotentialConfigBuilder> {
        let pairs = self.pairs.as_ref();
        let binning = self.binning.as_ref();
        let mut builder = PotentialConfigBuilder::new();

        if let Some(v) = overrides
            .min_separation
            .or(pairs.and_then(|p| p.min_separation))
        {
            builder = builder.min_separation(v);
        }
        if let Some(v) = overrides.cutoff.or(pairs.and_then(|p| p.cutoff)) {
            builder = builder.cutoff(v);
        }
        if let Some(v) = overrides.bin_width.or(binning.and_then(|b| b.width)) {
            builder = builder.bin_width(v);
        }
        if let Some(v) = overrides.bin_count.or(binning.and_then(|b| b.count)) {
            builder = builder.bin_count(v);
        }
        if let Some(v) = generic_min_separation.or(self
            .distances
            .as_ref()
            .and_then(|d| d.min_separation))
        {
            builder = builder.generic_min_separation(v);
        }
        if let Some(codes) = pairs.and_then(|p| p.whitelist.as_ref()) {
            let whitelist = codes
                .iter()
                .map(|code| code.parse::<PairType>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| CliError::Config(e.to_string()))?;
            builder = builder.whitelist(whitelist);
        }
        Ok(builder)
    }

    pub fn tag(&self, cli_tag: Option<&str>) -> String {
        self.tag_or(cli_tag, DEFAULT_TAG)
    }

    /// Tag from the command line or the file, otherwise `fallback`.
    pub fn tag_or(&self, cli_tag: Option<&str>, fallback: &str) -> String {
        cli_tag
            .map(str::to_string)
            .or_else(|| self.training.as_ref().and_then(|t| t.tag.clone()))
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn penalty(&self, cli_penalty: Option<f64>) -> Option<f64> {
        cli_penalty.or(self.scoring.as_ref().and_then(|s| s.penalty))
    }
}
