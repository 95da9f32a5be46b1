use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a Pokédex from its source. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("record {index}: {reason}")]
    Malformed { index: usize, reason: String },
    #[error("duplicate id {0}")]
    DuplicateId(u32),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

/// Rejected query argument. Never leaves the index modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unrecognized stat name {0:?} (expected HP, Attack, Defense, Sp. Attack, Sp. Defense or Speed)")]
    InvalidStat(String),
    #[error("unrecognized sort key {0:?} (expected id, name, type or a stat name)")]
    InvalidSortKey(String),
}

/// Failure while editing the companion CSV store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("last stored id {0:?} is not a number")]
    BadLastId(String),
    #[error("id {0} is already in the store")]
    DuplicateId(u32),
    #[error("invalid Pokémon entry: {0}")]
    InvalidEntry(String),
}
