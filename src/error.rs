use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be taken from its configured source. Every
/// variant is recoverable by switching to the embedded dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset document has no alumni records")]
    EmptyPayload,
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
