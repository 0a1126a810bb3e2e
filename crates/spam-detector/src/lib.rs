//! SMS spam detection with TF-IDF features and multinomial Naive Bayes.
//!
//! A [`SpamDetector`] is trained once from a labeled dataset and then answers
//! [`SpamDetector::predict`] calls by shared reference.

pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod naive_bayes;
pub mod samples;
pub mod split;

pub use config::DetectorConfig;
pub use detector::{ModelStats, Prediction, SpamDetector};
pub use error::{DetectorError, Result};
pub use samples::{SampleMessage, NORMAL_SAMPLE, SPAM_SAMPLE};
pub use spam_data::{DatasetFormat, Label};
