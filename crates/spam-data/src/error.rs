//! Error types for dataset loading and feature extraction.

use thiserror::Error;

/// Errors raised while reading a labeled dataset or vectorizing text.
#[derive(Error, Debug)]
pub enum DataError {
    /// The CSV reader rejected the file; covers I/O failures too.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("missing column `{0}` in dataset header")]
    MissingColumn(&'static str),

    /// A row has fewer fields than the layout requires.
    #[error("row {row}: expected a label and a message")]
    MissingField { row: usize },

    /// A label outside the two known categories.
    #[error("row {row}: invalid label `{label}`")]
    InvalidLabel { row: usize, label: String },

    /// The stop-word list for the requested language is unavailable.
    #[error("stop-word list unavailable")]
    StopWordsUnavailable,

    /// The vectorizer was used before `fit`.
    #[error("vectorizer has not been fitted")]
    NotFitted,
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, DataError>;
