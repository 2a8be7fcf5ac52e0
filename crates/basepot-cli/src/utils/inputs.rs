use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const STRUCTURE_EXTENSION: &str = "pdb";

/// Expands the `-i` arguments into a list of structure files.
///
/// Files are taken as given. A directory contributes its `*.pdb` files
/// (case-insensitive, not recursive) in name order.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = structure_files_in(input)?;
            debug!("Found {} structure file(s) in {:?}", found.len(), input);
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(CliError::Argument(format!(
                "input path '{}' does not exist",
                input.display()
            )));
        }
    }

    if files.is_empty() {
        return Err(CliError::Argument(
            "no structure files found in the given inputs".to_string(),
        ));
    }
    Ok(files)
}

fn structure_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(STRUCTURE_EXTENSION))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// File stem used to name per-structure outputs.
pub fn structure_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "structure".to_string())
}
