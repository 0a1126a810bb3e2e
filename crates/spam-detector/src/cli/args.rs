//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use spam_data::DatasetFormat;

use crate::config::DetectorConfig;
use crate::error::Result;
use crate::samples::SampleMessage;

/// Classify text messages as Spam or Not Spam
#[derive(Parser, Debug, Clone)]
#[command(name = "spam-detector")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpamDetectorArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Labeled dataset to train on
    #[arg(short, long, env = "SPAM_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Dataset is tab separated `label<TAB>message` without a header
    #[arg(long)]
    pub tsv: bool,

    /// JSON file with training settings; flags override it
    #[arg(short, long, env = "SPAM_DETECTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fraction of messages held out for accuracy
    #[arg(long)]
    pub test_size: Option<f32>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Naive Bayes smoothing
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl SpamDetectorArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    /// Config file (if any) with command line overrides applied.
    pub fn detector_config(&self) -> Result<DetectorConfig> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::from_json_file(path)?,
            None => DetectorConfig::default(),
        };
        if let Some(path) = &self.dataset {
            config = config.with_dataset_path(path);
        }
        if self.tsv {
            config = config.with_format(DatasetFormat::Tsv);
        }
        if let Some(test_size) = self.test_size {
            config = config.with_test_size(test_size);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify one message
    Predict(PredictArgs),

    /// Classify a built-in sample message
    Sample(SampleArgs),

    /// Show held-out accuracy, dataset size and spam ratio
    Stats,

    /// Classify messages read line by line from stdin
    Interactive,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PredictArgs {
    /// Message text
    pub message: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SampleArgs {
    #[arg(value_enum)]
    pub kind: SampleMessage,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}
