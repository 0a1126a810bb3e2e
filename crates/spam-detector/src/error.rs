//! Error types for training and prediction.

use std::io;

use spam_data::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    /// Dataset loading or feature extraction failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// I/O errors (config files, stdin).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid JSON for [`crate::config::DetectorConfig`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty or whitespace-only message.
    #[error("Please enter a message to analyze")]
    EmptyMessage,

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
