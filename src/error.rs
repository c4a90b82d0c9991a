// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoldError {
    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("duplicate group name {0:?}")]
    DuplicateGroupName(String),

    #[error("groups {first:?} and {second:?} appear to be identical")]
    AmbiguousIdenticalGroups { first: String, second: String },

    #[error("not a JSON operation line: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FoldError>;
