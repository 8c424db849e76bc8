//! Error types for fleetmap

use thiserror::Error;

/// Main error type for fleetmap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid point literal: {0}")]
    PointParse(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for fleetmap operations
pub type Result<T> = std::result::Result<T, Error>;
