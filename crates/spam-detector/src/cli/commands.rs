//! Command implementations for the spam-detector CLI.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::detector::SpamDetector;
use crate::error::DetectorError;

/// Train the detector, then execute a CLI command.
pub fn execute_command(args: SpamDetectorArgs) -> Result<()> {
    let config = args.detector_config().context("failed to read configuration")?;
    let dataset = config
        .dataset_path()
        .context("set --dataset or SPAM_DATASET")?
        .to_path_buf();
    let detector = SpamDetector::from_config(&config)
        .with_context(|| format!("failed to train on {}", dataset.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Predict(predict) => analyze(&detector, &predict.message, &mut out, &args),
        Command::Sample(sample) => analyze(&detector, sample.kind.text(), &mut out, &args),
        Command::Stats => show_stats(&detector, &mut out, &args),
        Command::Interactive => {
            if args.verbosity() > 0 {
                eprintln!("Enter one message per line, Ctrl-D to quit.");
            }
            interactive(&detector, io::stdin().lock(), &mut out, &args)?;
            Ok(())
        }
    }
}

/// Classify one message, or warn when it is blank.
pub fn analyze<W: Write>(
    detector: &SpamDetector,
    message: &str,
    out: &mut W,
    args: &SpamDetectorArgs,
) -> Result<()> {
    match detector.predict(message) {
        Ok(prediction) => {
            write_prediction(out, message, &prediction, args.output_format, args.pretty)?
        }
        Err(DetectorError::EmptyMessage) => {
            write_empty_message_warning(out, args.output_format, args.pretty)?
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn show_stats<W: Write>(
    detector: &SpamDetector,
    out: &mut W,
    args: &SpamDetectorArgs,
) -> Result<()> {
    write_stats(out, detector.stats(), args.output_format, args.pretty)?;
    Ok(())
}

/// Classify each input line; returns the number of lines read.
pub fn interactive<R: BufRead, W: Write>(
    detector: &SpamDetector,
    input: R,
    out: &mut W,
    args: &SpamDetectorArgs,
) -> Result<usize> {
    let mut lines = 0;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        analyze(detector, &line, out, args)?;
        out.flush()?;
        lines += 1;
    }
    Ok(lines)
}
