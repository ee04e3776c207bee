use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediasortError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Filesystem errors
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    // Metadata errors
    #[error("Exiftool error: {0}")]
    Exiftool(String),

    #[error("Failed to extract metadata from {path}: {reason}")]
    MetadataExtraction { path: PathBuf, reason: String },
}

/// Result type for mediasort operations.
pub type Result<T> = std::result::Result<T, MediasortError>;
