use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

/// Failures of a single retrieval tier. The client absorbs all of them.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid flow URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Request to flow failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Flow returned non-success status {0}")]
    Status(StatusCode),

    #[error("Flow response is not a weekly expenses payload: {0}")]
    ResponseShape(#[source] serde_json::Error),

    #[error("Reading local data file {path}: {source}")]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Local data file {path} is not a weekly expenses payload: {source}")]
    LocalShape {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
