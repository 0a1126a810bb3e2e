//! Training configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spam_data::DatasetFormat;

use crate::error::{DetectorError, Result};

pub const DEFAULT_TEST_SIZE: f32 = 0.2;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Where the dataset lives and how the model is trained.
///
/// Missing fields in a JSON config take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub dataset_path: Option<PathBuf>,
    pub format: DatasetFormat,
    /// Fraction of rows held out for the accuracy statistic.
    pub test_size: f32,
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Additive smoothing for Naive Bayes.
    pub alpha: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            format: DatasetFormat::Csv,
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl DetectorConfig {
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: DatasetFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_test_size(mut self, test_size: f32) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn dataset_path(&self) -> Result<&Path> {
        self.dataset_path
            .as_deref()
            .ok_or_else(|| DetectorError::InvalidConfig("no dataset path configured".to_string()))
    }

    /// Check the training parameters; the dataset path is checked on load.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(DetectorError::InvalidConfig(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(DetectorError::InvalidConfig(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
