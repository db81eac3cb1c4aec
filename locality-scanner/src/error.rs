use locality_core::LocalityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Classification error: {0}")]
    LocalityError(#[from] LocalityError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
