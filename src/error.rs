// Error types for the puji application.
// Covers terminal I/O, configuration, fixture loading, and logging setup.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PujiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid fixtures: {0}")]
    Fixture(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, PujiError>;
