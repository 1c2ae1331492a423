//! Error types for loading fetched fight data

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open fight dump {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to memory map file {path}")]
    MemoryMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fight dump {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("not a report URL: {url}")]
    InvalidReportUrl { url: String },

    #[error("fight ID is required, select a fight first: {url}")]
    MissingFightSelector { url: String },
}
