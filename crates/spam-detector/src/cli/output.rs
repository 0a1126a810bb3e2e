//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;
use spam_data::Label;

use crate::cli::args::OutputFormat;
use crate::detector::{ModelStats, Prediction};
use crate::error::{DetectorError, Result};

/// Result structure for a classified message.
#[derive(Debug, Serialize)]
pub struct PredictionResult<'a> {
    pub message: &'a str,
    pub label: Label,
    pub spam: bool,
    /// Percentage, two decimals.
    pub confidence: f64,
}

impl<'a> PredictionResult<'a> {
    pub fn new(message: &'a str, prediction: &Prediction) -> Self {
        Self {
            message,
            label: prediction.label,
            spam: prediction.is_spam(),
            confidence: prediction.confidence_percent(),
        }
    }
}

/// Summary statistics, percentages rounded for display.
#[derive(Debug, Serialize)]
pub struct StatsResult {
    pub accuracy: f64,
    pub total_samples: usize,
    pub spam_ratio: f64,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
}

impl From<&ModelStats> for StatsResult {
    fn from(stats: &ModelStats) -> Self {
        Self {
            accuracy: stats.accuracy_percent(),
            total_samples: stats.total_samples,
            spam_ratio: stats.spam_ratio_percent(),
            train_size: stats.train_size,
            test_size: stats.test_size,
            vocabulary_size: stats.vocabulary_size,
        }
    }
}

#[derive(Debug, Serialize)]
struct WarningResult<'a> {
    warning: &'a str,
}

pub fn write_prediction<W: Write>(
    out: &mut W,
    message: &str,
    prediction: &Prediction,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let result = PredictionResult::new(message, prediction);
    match format {
        OutputFormat::Human => {
            let headline = match result.label {
                Label::Spam => "Spam Detected!",
                Label::NotSpam => "Not Spam",
            };
            writeln!(out, "{headline}")?;
            writeln!(out, "Confidence: {}%", result.confidence)?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, &result, pretty),
    }
}

pub fn write_stats<W: Write>(
    out: &mut W,
    stats: &ModelStats,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let result = StatsResult::from(stats);
    match format {
        OutputFormat::Human => {
            writeln!(out, "Accuracy: {}%", result.accuracy)?;
            writeln!(out, "Total Samples: {}", result.total_samples)?;
            writeln!(out, "Spam Ratio: {}%", result.spam_ratio)?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, &result, pretty),
    }
}

/// The notice shown instead of a verdict for blank input.
pub fn write_empty_message_warning<W: Write>(
    out: &mut W,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let warning = DetectorError::EmptyMessage.to_string();
    match format {
        OutputFormat::Human => {
            writeln!(out, "Warning: {warning}")?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, &WarningResult { warning: &warning }, pretty),
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
