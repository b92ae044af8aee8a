use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store not found at {path}")]
    NotFound { path: PathBuf },

    #[error("store at {path} is not a JSON array of records: {source}")]
    MalformedDocument {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to read store at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Fatal: the live store is left untouched when this is raised.
    #[error("failed to write store at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize store document: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
