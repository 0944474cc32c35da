//! Error types for CaptionKit.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Caption error: {0}")]
    Caption(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
