use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning an input file into records.
#[derive(Debug, Error)]
pub enum DataError {
    /// The expected input file does not exist.
    #[error("input file {} not found", .path.display())]
    Missing { path: PathBuf },

    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}, line {line}, column {column}: '{value}' is not a number", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
    },

    #[error("{}, line {line}: expected {expected} columns, found {found}", .path.display())]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{} contains no data rows", .path.display())]
    Empty { path: PathBuf },

    /// Parallel arrays that must describe the same points disagree in length.
    #[error("{what}: expected {expected} values, found {found}")]
    LengthMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
}

impl DataError {
    /// Whether the error only means "the input has not been produced yet".
    pub fn is_missing(&self) -> bool {
        matches!(self, DataError::Missing { .. })
    }
}
