use crate::core::io::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::residue::Nucleotide;
use crate::core::utils::identifiers::is_representative_atom;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is missing")]
    MissingField { columns: &'static str },
    #[error("Coordinate record is not valid UTF-8")]
    InvalidEncoding,
}

/// The fields of one `ATOM`/`HETATM` line, borrowed from the line text.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomLine<'a> {
    pub atom_name: &'a str,
    pub residue_name: &'a str,
    pub residue_index: i32,
    pub position: Point3<f64>,
}

// Zero-based, end-exclusive column ranges paired with their 1-based labels.
const RECORD_COLUMNS: (usize, usize) = (0, 6);
const ATOM_NAME_COLUMNS: (usize, usize) = (12, 16);
const RESIDUE_NAME_COLUMNS: (usize, usize) = (17, 20);
const RESIDUE_SEQ_COLUMNS: (usize, usize, &str) = (22, 26, "23-26");
const X_COLUMNS: (usize, usize, &str) = (30, 38, "31-38");
const Y_COLUMNS: (usize, usize, &str) = (38, 46, "39-46");
const Z_COLUMNS: (usize, usize, &str) = (46, 54, "47-54");

fn is_coordinate_record(line: &[u8]) -> bool {
    let record = line.get(RECORD_COLUMNS.0..RECORD_COLUMNS.1).unwrap_or(line);
    matches!(record.trim_ascii(), b"ATOM" | b"HETATM")
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn required_field<'a>(
    line: &'a str,
    (start, end, columns): (usize, usize, &'static str),
) -> Result<&'a str, PdbParseErrorKind> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Err(PdbParseErrorKind::MissingField { columns });
    }
    Ok(value)
}

fn parse_coordinate(
    line: &str,
    field: (usize, usize, &'static str),
) -> Result<f64, PdbParseErrorKind> {
    let value = required_field(line, field)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PdbParseErrorKind::InvalidFloat {
            columns: field.2,
            value: value.to_string(),
        })
}

/// Parses one line of a PDB file.
///
/// Returns `Ok(None)` for any record kind other than `ATOM`/`HETATM`. For
/// coordinate records the residue number and all three coordinates must
/// parse, otherwise the line is malformed.
pub fn parse_atom_line(line: &str) -> Result<Option<AtomLine<'_>>, PdbParseErrorKind> {
    let record_type = slice_and_trim(line, RECORD_COLUMNS.0, RECORD_COLUMNS.1);
    if record_type != "ATOM" && record_type != "HETATM" {
        return Ok(None);
    }

    let atom_name = slice_and_trim(line, ATOM_NAME_COLUMNS.0, ATOM_NAME_COLUMNS.1);
    let residue_name = slice_and_trim(line, RESIDUE_NAME_COLUMNS.0, RESIDUE_NAME_COLUMNS.1);

    let seq_str = required_field(line, RESIDUE_SEQ_COLUMNS)?;
    let residue_index: i32 = seq_str.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
        columns: RESIDUE_SEQ_COLUMNS.2,
        value: seq_str.to_string(),
    })?;

    let x = parse_coordinate(line, X_COLUMNS)?;
    let y = parse_coordinate(line, Y_COLUMNS)?;
    let z = parse_coordinate(line, Z_COLUMNS)?;

    Ok(Some(AtomLine {
        atom_name,
        residue_name,
        residue_index,
        position: Point3::new(x, y, z),
    }))
}

/// Reader for PDB files that keeps the `C3'` atom of each nucleotide.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<AtomRecord>, Self::Error> {
        let mut records: Vec<AtomRecord> = Vec::new();

        let mut buf = Vec::new();
        let mut line_num = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;

            // Only coordinate records need to be valid UTF-8.
            if !is_coordinate_record(&buf) {
                continue;
            }
            let line = std::str::from_utf8(&buf)
                .map_err(|_| PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::InvalidEncoding,
                })?
                .trim_end_matches(['\n', '\r']);

            let Some(atom) = parse_atom_line(line).map_err(|kind| PdbError::Parse {
                line: line_num,
                kind,
            })?
            else {
                continue;
            };

            if !is_representative_atom(atom.atom_name) {
                continue;
            }
            let Some(residue_type) = Nucleotide::from_residue_name(atom.residue_name) else {
                trace!(
                    "Skipping atom of non-nucleotide residue '{}' on line {}",
                    atom.residue_name, line_num
                );
                continue;
            };

            // Alternate locations repeat the atom for the same residue.
            if let Some(last) = records.last() {
                if last.residue_index == atom.residue_index && last.residue_type == residue_type {
                    trace!(
                        "Ignoring duplicate representative atom for residue {} on line {}",
                        atom.residue_index, line_num
                    );
                    continue;
                }
            }

            records.push(AtomRecord::new(
                atom.atom_name,
                residue_type,
                atom.residue_index,
                atom.position,
            ));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn atom_line(record: &str, name: &str, res_name: &str, res_seq: i32, xyz: [f64; 3]) -> String {
        format!(
            "{:<6}{:>5} {:<4}{:1}{:>3} {:1}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}",
            record, 1, name, "", res_name, "A", res_seq, "", xyz[0], xyz[1], xyz[2], 1.0, 0.0
        )
    }

    fn read_str(content: &str) -> Result<Vec<AtomRecord>, PdbError> {
        let mut reader = BufReader::new(Cursor::new(content.to_string()));
        PdbFile::read_from(&mut reader)
    }

    #[test]
    fn parse_atom_line_extracts_fixed_columns() {
        let line = atom_line("ATOM", "C3'", "G", 42, [1.5, -2.25, 30.125]);
        let atom = parse_atom_line(&line).unwrap().unwrap();
        assert_eq!(atom.atom_name, "C3'");
        assert_eq!(atom.residue_name, "G");
        assert_eq!(atom.residue_index, 42);
        assert_eq!(atom.position, Point3::new(1.5, -2.25, 30.125));
    }

    #[test]
    fn parse_atom_line_accepts_hetatm_records() {
        let line = atom_line("HETATM", "C3'", "A", 7, [0.0, 0.0, 0.0]);
        assert!(parse_atom_line(&line).unwrap().is_some());
    }

    #[test]
    fn parse_atom_line_skips_other_record_kinds() {
        assert_eq!(parse_atom_line("HEADER    RNA").unwrap(), None);
        assert_eq!(parse_atom_line("TER").unwrap(), None);
        assert_eq!(parse_atom_line("").unwrap(), None);
        let anisou = atom_line("ANISOU", "C3'", "A", 7, [0.0, 0.0, 0.0]);
        assert_eq!(parse_atom_line(&anisou).unwrap(), None);
    }

    #[test]
    fn parse_atom_line_reports_malformed_coordinates() {
        let mut line = atom_line("ATOM", "C3'", "A", 3, [1.0, 2.0, 3.0]);
        line.replace_range(30..38, "   abc.d");
        assert_eq!(
            parse_atom_line(&line),
            Err(PdbParseErrorKind::InvalidFloat {
                columns: "31-38",
                value: "abc.d".to_string()
            })
        );
    }

    #[test]
    fn parse_atom_line_reports_truncated_coordinates() {
        let line = atom_line("ATOM", "C3'", "A", 3, [1.0, 2.0, 3.0]);
        let truncated = &line[..44];
        assert_eq!(
            parse_atom_line(truncated),
            Err(PdbParseErrorKind::MissingField { columns: "39-46" })
        );
        let no_z = &line[..46];
        assert_eq!(
            parse_atom_line(no_z),
            Err(PdbParseErrorKind::MissingField { columns: "47-54" })
        );
    }

    #[test]
    fn parse_atom_line_reports_invalid_residue_number() {
        let mut line = atom_line("ATOM", "C3'", "A", 3, [1.0, 2.0, 3.0]);
        line.replace_range(22..26, "  x1");
        assert_eq!(
            parse_atom_line(&line),
            Err(PdbParseErrorKind::InvalidInt {
                columns: "23-26",
                value: "x1".to_string()
            })
        );
    }

    #[test]
    fn parse_atom_line_reads_four_digit_residue_numbers() {
        let line = atom_line("ATOM", "C3'", "U", 1024, [0.0, 0.0, 0.0]);
        assert_eq!(parse_atom_line(&line).unwrap().unwrap().residue_index, 1024);
    }

    #[test]
    fn read_from_keeps_only_representative_nucleotide_atoms() {
        let content = [
            "HEADER    RNA TEST".to_string(),
            atom_line("ATOM", "P", "A", 1, [0.0, 0.0, 0.0]),
            atom_line("ATOM", "C3'", "A", 1, [1.0, 0.0, 0.0]),
            atom_line("ATOM", "C4'", "A", 1, [2.0, 0.0, 0.0]),
            atom_line("ATOM", "C3'", "U", 2, [3.0, 0.0, 0.0]),
            atom_line("HETATM", "C3'", "LIG", 3, [4.0, 0.0, 0.0]),
            atom_line("HETATM", "C3*", "G", 4, [5.0, 0.0, 0.0]),
            "END".to_string(),
        ]
        .join("\n");

        let records = read_str(&content).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].residue_type, Nucleotide::Adenine);
        assert_eq!(records[0].position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(records[1].residue_type, Nucleotide::Uracil);
        assert_eq!(records[2].residue_type, Nucleotide::Guanine);
        assert_eq!(records[2].atom_name, "C3*");
        assert_eq!(records[2].residue_index, 4);
    }

    #[test]
    fn read_from_keeps_first_alternate_location_only() {
        let content = [
            atom_line("ATOM", "C3'", "C", 5, [1.0, 1.0, 1.0]),
            atom_line("ATOM", "C3'", "C", 5, [1.1, 1.1, 1.1]),
            atom_line("ATOM", "C3'", "G", 6, [2.0, 2.0, 2.0]),
        ]
        .join("\n");

        let records = read_str(&content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn read_from_reports_line_number_of_malformed_record() {
        let mut bad = atom_line("ATOM", "P", "A", 2, [0.0, 0.0, 0.0]);
        bad.replace_range(46..54, "  ??????");
        let content = [atom_line("ATOM", "C3'", "A", 1, [0.0, 0.0, 0.0]), bad].join("\n");

        match read_str(&content) {
            Err(PdbError::Parse { line, kind }) => {
                assert_eq!(line, 2);
                assert!(matches!(kind, PdbParseErrorKind::InvalidFloat { columns: "47-54", .. }));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    fn read_bytes(content: &[u8]) -> Result<Vec<AtomRecord>, PdbError> {
        let mut reader = BufReader::new(Cursor::new(content.to_vec()));
        PdbFile::read_from(&mut reader)
    }

    #[test]
    fn read_from_ignores_latin1_bytes_in_free_text_records() {
        let mut content = b"REMARK   1 AUTHOR J. M\xe9nard\r\n".to_vec();
        content.extend_from_slice(atom_line("ATOM", "C3'", "A", 1, [0.0, 0.0, 0.0]).as_bytes());
        content.extend_from_slice(b"\r\n");
        content.extend_from_slice(atom_line("ATOM", "C3'", "U", 5, [4.0, 0.0, 0.0]).as_bytes());
        content.extend_from_slice(b"\nCOMPND    MOL_ID: 1; \xb0\n");

        let records = read_bytes(&content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].residue_index, 5);
        assert_eq!(records[1].position, Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn read_from_rejects_invalid_utf8_in_coordinate_records() {
        let mut content = atom_line("ATOM", "C3'", "A", 1, [0.0, 0.0, 0.0]).into_bytes();
        content.push(b'\n');
        let mut bad = atom_line("ATOM", "C3'", "U", 5, [4.0, 0.0, 0.0]).into_bytes();
        bad[13] = 0xe9;
        content.extend_from_slice(&bad);

        match read_bytes(&content) {
            Err(PdbError::Parse { line, kind }) => {
                assert_eq!(line, 2);
                assert_eq!(kind, PdbParseErrorKind::InvalidEncoding);
            }
            other => panic!("expected encoding error, got {:?}", other),
        }
    }

    #[test]
    fn read_from_empty_input_returns_no_records() {
        assert!(read_str("").unwrap().is_empty());
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("missing.pdb"));
        assert!(matches!(result, Err(PdbError::Io(_))));
    }
}
