use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read input file {}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid JSON in {}: top-level value must be an array of records", path.display())]
    NotAnArray { path: PathBuf },

    #[error("record {index} is not a JSON object")]
    InvalidRecord { index: usize },

    #[error("record {index} is missing field `{field}`")]
    FieldMissing { index: usize, field: &'static str },

    #[error("record {index} has an invalid `{field}`: expected {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("failed to write output file {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
