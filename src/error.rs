//! Error types for roam-point

use thiserror::Error;

/// Main error type for roam-point operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("boundary index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("imagery oracle error: {0}")]
    Oracle(String),

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Server(String),
}

/// Result type alias for roam-point operations
pub type Result<T> = std::result::Result<T, Error>;
