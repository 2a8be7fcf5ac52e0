use thiserror::Error;

use crate::core::io::pdb::PdbError;
use crate::core::potential::scoring::ScoringError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read structure {path:?}: {source}")]
    Structure {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Energy scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("None of the {attempted} input structure(s) could be read")]
    EmptyCorpus { attempted: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::pair::PairType;

    #[test]
    fn scoring_errors_convert_into_engine_errors() {
        let pair_type: PairType = "AU".parse().unwrap();
        let error: EngineError = ScoringError::UnseenCombination {
            pair_type,
            label: "5-6".to_string(),
        }
        .into();
        assert!(matches!(error, EngineError::Scoring { .. }));
        assert!(error.to_string().contains("5-6"));
    }

    #[test]
    fn structure_error_names_the_file() {
        let error = EngineError::Structure {
            path: PathBuf::from("broken.pdb"),
            source: PdbError::Parse {
                line: 3,
                kind: crate::core::io::pdb::PdbParseErrorKind::InvalidEncoding,
            },
        };
        let message = error.to_string();
        assert!(message.contains("broken.pdb"));
        assert!(message.contains("line 3"));
    }
}
