// src/utils/error.rs
use std::time::Duration;
use thiserror::Error;

// Failures talking to EDGAR or persisting what it returned
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 403 Forbidden

    #[error("SEC Rate limit likely exceeded")]
    RateLimited,

    #[error("Could not find CIK for ticker {0}")]
    TickerNotFound(String),

    #[error("Could not find specified filing: {0}")]
    FilingDocNotFound(String),

    #[error("Failed to parse EDGAR response: {0}")]
    Parse(String),

    #[error("Failed to persist filing: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] EdgarError),

    #[error("Fetch timed out after {0:?}")]
    FetchTimeout(Duration),

    #[error("Invalid fiscal year: {0}")]
    InvalidYear(i32),

    #[error("No filing artifact found for {0}")]
    FilingNotFound(String),

    #[error("No HTML or TEXT content region in {0}")]
    NoContentRegion(String),

    #[error("Sentence segmentation failed: {0}")]
    Chunking(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
