//! Error types for tourist-safety

use thiserror::Error;

/// Main error type for tourist-safety operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("POI error: {0}")]
    Poi(String),

    #[error("State store error: {0}")]
    Store(String),
}

/// Result type alias for tourist-safety operations
pub type Result<T> = std::result::Result<T, Error>;
