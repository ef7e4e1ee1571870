use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Failed to read track file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid track entry {token:?} on line {line}")]
    InvalidToken { line: usize, token: String },

    #[error("Track entry {index} is zero; entries must be non-zero note divisions")]
    ZeroEntry { index: usize },

    #[error("Track file contains no entries")]
    Empty,
}
