//! Tab-separated tables exchanged with downstream consumers.
//!
//! Undefined energies and probabilities are written as `NaN` so that every
//! bin keeps its row; readers accept `nan` in any letter case.

use crate::core::models::pair::{GenericDistance, InvalidPairCode, PairType};
use crate::core::potential::binning::BinScheme;
use crate::core::potential::energy::PotentialTable;
use crate::core::potential::frequency::FrequencyTable;
use crate::core::potential::scoring::StructureScore;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const PAIR_TABLE_HEADER: [&str; 2] = ["Distance Bin", "Pseudo Energy"];
pub const POTENTIAL_TABLE_HEADER: [&str; 3] = ["Base Pair", "Distance Bin", "Pseudo Energy"];
pub const FREQUENCY_TABLE_HEADER: [&str; 5] = [
    "Base Pair",
    "Distance Bin",
    "Observed Count",
    "Observed Probability",
    "Reference Frequency",
];
pub const SCORE_TABLE_HEADER: [&str; 3] = ["Base Pair", "Distance Bin", "Pseudoenergy Prediction"];
pub const GENERIC_DISTANCE_HEADER: [&str; 2] = ["Residue Pair", "Distance"];

pub const PAIR_TABLE_SUFFIX: &str = "_pseudo_energy.txt";
const MISSING_VALUE: &str = "NaN";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Table format error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown distance bin label '{0}'")]
    UnknownBin(String),
    #[error("Invalid pseudo energy '{value}' in bin {label}")]
    InvalidEnergy { label: String, value: String },
    #[error(transparent)]
    PairCode(#[from] InvalidPairCode),
    #[error("Duplicate entry for pair type {pair_type} in bin {label}")]
    DuplicateEntry { pair_type: PairType, label: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct PairEnergyRow {
    #[serde(rename = "Distance Bin")]
    distance_bin: String,
    #[serde(rename = "Pseudo Energy")]
    pseudo_energy: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PotentialRow {
    #[serde(rename = "Base Pair")]
    base_pair: String,
    #[serde(rename = "Distance Bin")]
    distance_bin: String,
    #[serde(rename = "Pseudo Energy")]
    pseudo_energy: String,
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer)
}

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
}

fn parse_optional(label: &str, value: &str) -> Result<Option<f64>, TableError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| TableError::InvalidEnergy {
            label: label.to_string(),
            value: value.to_string(),
        })
}

/// Writes the per-pair training table: one row per bin of the scheme.
pub fn write_pair_table<W: Write>(
    writer: W,
    potential: &PotentialTable,
    pair_type: PairType,
) -> Result<(), TableError> {
    let scheme = potential.scheme();
    let row: Vec<_> = potential.row(pair_type).collect();
    let mut wtr = tsv_writer(writer);
    wtr.write_record(PAIR_TABLE_HEADER)?;
    for bin in scheme.bins() {
        let energy = row
            .iter()
            .find(|(b, _)| *b == bin)
            .and_then(|(_, energy)| *energy);
        wtr.serialize(PairEnergyRow {
            distance_bin: scheme.label(bin).to_string(),
            pseudo_energy: format_optional(energy),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a per-pair table into `potential`, which supplies the bin scheme.
pub fn read_pair_table<R: Read>(
    reader: R,
    pair_type: PairType,
    potential: &mut PotentialTable,
) -> Result<(), TableError> {
    let scheme = *potential.scheme();
    for result in tsv_reader(reader).deserialize::<PairEnergyRow>() {
        let row = result?;
        insert_cell(potential, &scheme, pair_type, &row.distance_bin, &row.pseudo_energy)?;
    }
    Ok(())
}

fn insert_cell(
    potential: &mut PotentialTable,
    scheme: &BinScheme,
    pair_type: PairType,
    label: &str,
    energy: &str,
) -> Result<(), TableError> {
    let bin = scheme
        .parse_label(label)
        .ok_or_else(|| TableError::UnknownBin(label.to_string()))?;
    let energy = parse_optional(label, energy)?;
    if potential.contains(pair_type, bin) {
        return Err(TableError::DuplicateEntry {
            pair_type,
            label: label.to_string(),
        });
    }
    potential.insert(pair_type, bin, energy);
    Ok(())
}

/// Writes all cells as `Base Pair`, `Distance Bin`, `Pseudo Energy` triples.
pub fn write_potential<W: Write>(writer: W, potential: &PotentialTable) -> Result<(), TableError> {
    let scheme = potential.scheme();
    let mut wtr = tsv_writer(writer);
    wtr.write_record(POTENTIAL_TABLE_HEADER)?;
    for (pair_type, bin, energy) in potential.iter() {
        wtr.serialize(PotentialRow {
            base_pair: pair_type.to_string(),
            distance_bin: scheme.label(bin).to_string(),
            pseudo_energy: format_optional(energy),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_potential<R: Read>(reader: R, scheme: BinScheme) -> Result<PotentialTable, TableError> {
    let mut potential = PotentialTable::new(scheme);
    for result in tsv_reader(reader).deserialize::<PotentialRow>() {
        let row = result?;
        let pair_type: PairType = row.base_pair.parse()?;
        insert_cell(&mut potential, &scheme, pair_type, &row.distance_bin, &row.pseudo_energy)?;
    }
    Ok(potential)
}

pub fn write_frequencies<W: Write>(writer: W, frequencies: &FrequencyTable) -> Result<(), TableError> {
    let scheme = frequencies.scheme();
    let mut wtr = tsv_writer(writer);
    wtr.write_record(FREQUENCY_TABLE_HEADER)?;
    for (pair_type, bin, entry) in frequencies.iter() {
        wtr.write_record([
            pair_type.to_string(),
            scheme.label(bin).to_string(),
            entry.observed_count.to_string(),
            format_optional(entry.observed_probability),
            format_optional(entry.reference_frequency),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the scored rows of a structure followed by the summed energy.
pub fn write_score<W: Write>(
    writer: W,
    score: &StructureScore,
    scheme: &BinScheme,
) -> Result<(), TableError> {
    let mut wtr = tsv_writer(writer);
    wtr.write_record(SCORE_TABLE_HEADER)?;
    for pair in &score.pairs {
        wtr.write_record([
            pair.pair_type.to_string(),
            scheme.label(pair.bin).to_string(),
            pair.energy.to_string(),
        ])?;
    }
    let mut inner = wtr.into_inner().map_err(|e| TableError::Io(e.into_error()))?;
    writeln!(inner)?;
    writeln!(inner, "Resulting Gibbs free energy: {}", score.total)?;
    inner.flush()?;
    Ok(())
}

pub fn write_generic_distances<W: Write>(
    writer: W,
    distances: &[GenericDistance],
) -> Result<(), TableError> {
    let mut wtr = tsv_writer(writer);
    wtr.write_record(GENERIC_DISTANCE_HEADER)?;
    for d in distances {
        wtr.write_record([
            format!("{}-{}", d.residue_pair.0, d.residue_pair.1),
            d.distance.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn pair_table_file_name(pair_type: PairType, tag: &str) -> String {
    format!("{}_{}{}", pair_type, tag, PAIR_TABLE_SUFFIX)
}

/// Writes one per-pair table for every pair type of `potential` into `dir`.
pub fn save_pair_tables(
    dir: &Path,
    tag: &str,
    potential: &PotentialTable,
) -> Result<Vec<PathBuf>, TableError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for pair_type in potential.pair_types() {
        let path = dir.join(pair_table_file_name(pair_type, tag));
        let file = BufWriter::new(File::create(&path)?);
        write_pair_table(file, potential, pair_type)?;
        debug!("Wrote pair table {:?}", &path);
        written.push(path);
    }
    Ok(written)
}

/// Loads every `*_pseudo_energy.txt` table in `dir`, taking the pair type
/// from the file-name prefix before the first underscore.
pub fn load_pair_tables(dir: &Path, scheme: BinScheme) -> Result<PotentialTable, TableError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(PAIR_TABLE_SUFFIX))
        })
        .collect();
    paths.sort();

    let mut potential = PotentialTable::new(scheme);
    for path in paths {
        // Score files share the suffix; anything without a pair-code prefix is not a table.
        let Some(pair_type) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('_').next())
            .and_then(|code| code.parse::<PairType>().ok())
        else {
            debug!("Skipping {:?}: file name does not start with a pair code", &path);
            continue;
        };
        debug!("Loading pair table {:?} as {}", &path, pair_type);
        read_pair_table(File::open(&path)?, pair_type, &mut potential)?;
    }
    Ok(potential)
}
