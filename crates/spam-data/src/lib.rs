//! Labeled SMS dataset loading, tokenization and TF-IDF features.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

pub mod error;
pub mod tfidf;
pub mod tokenizer;

pub use error::{DataError, Result};
pub use tfidf::{SparseVector, TfIdfVectorizer};
pub use tokenizer::Tokenizer;

const CATEGORY_COLUMN: &str = "Category";
const MESSAGE_COLUMN: &str = "Message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Not Spam")]
    NotSpam,
    Spam,
}

impl Label {
    /// Both labels, ordered by class index.
    pub const ALL: [Label; 2] = [Label::NotSpam, Label::Spam];

    pub fn index(self) -> usize {
        match self {
            Label::NotSpam => 0,
            Label::Spam => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::NotSpam => "Not Spam",
            Label::Spam => "Spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ham" | "not spam" => Ok(Label::NotSpam),
            "spam" => Ok(Label::Spam),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub label: Label,
    pub text: String,
}

impl Message {
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// On-disk layout of a dataset file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Comma separated with a `Category,Message` header row.
    #[default]
    Csv,
    /// Tab separated `label<TAB>message` lines, no header, no quoting.
    Tsv,
}

/// Counts describing a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_samples: usize,
    pub spam_count: usize,
    pub spam_ratio: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    messages: Vec<Message>,
}

impl Dataset {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn from_file<P>(path: P, format: DatasetFormat) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut builder = ReaderBuilder::new();
        match format {
            DatasetFormat::Csv => builder.has_headers(true),
            DatasetFormat::Tsv => builder
                .has_headers(false)
                .delimiter(b'\t')
                .quoting(false)
                .flexible(true),
        };
        let mut reader = builder.from_path(path)?;

        let (label_column, text_column) = match format {
            DatasetFormat::Csv => {
                let headers = reader.headers()?;
                (
                    column_index(headers, CATEGORY_COLUMN)?,
                    column_index(headers, MESSAGE_COLUMN)?,
                )
            }
            DatasetFormat::Tsv => (0, 1),
        };

        let mut messages = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let row = row + 1;
            let (label, text) = match (record.get(label_column), record.get(text_column)) {
                (Some(label), Some(text)) => (label, text),
                _ => return Err(DataError::MissingField { row }),
            };
            // A TSV message runs to the end of the line, tabs included.
            let text = match format {
                DatasetFormat::Csv => text.to_string(),
                DatasetFormat::Tsv => record
                    .iter()
                    .skip(text_column)
                    .collect::<Vec<_>>()
                    .join("\t"),
            };
            let label = Label::from_str(label).map_err(|_| DataError::InvalidLabel {
                row,
                label: label.to_string(),
            })?;
            messages.push(Message::new(label, text));
        }

        log::info!("loaded {} messages from {}", messages.len(), path.display());
        Ok(Self { messages })
    }

    /// Remove exact `(label, text)` duplicates, keeping first occurrences.
    pub fn deduplicate(self) -> Self {
        let before = self.messages.len();
        let mut seen = HashSet::with_capacity(before);
        let messages: Vec<Message> = self
            .messages
            .into_iter()
            .filter(|message| seen.insert(message.clone()))
            .collect();
        log::debug!("removed {} duplicate messages", before - messages.len());
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.messages.iter().map(|m| m.label).collect()
    }

    pub fn spam_count(&self) -> usize {
        self.messages.iter().filter(|m| m.label.is_spam()).count()
    }

    /// Fraction of spam messages, 0 for an empty dataset.
    pub fn spam_ratio(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.spam_count() as f64 / self.len() as f64
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            total_samples: self.len(),
            spam_count: self.spam_count(),
            spam_ratio: self.spam_ratio(),
        }
    }

    /// Rows at the given positions, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            messages: indices
                .iter()
                .filter_map(|&i| self.messages.get(i).cloned())
                .collect(),
        }
    }
}

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or(DataError::MissingColumn(name))
}

/// Load a dataset and drop duplicate rows.
pub fn load_dataset<P: AsRef<Path>>(path: P, format: DatasetFormat) -> Result<Dataset> {
    Ok(Dataset::from_file(path, format)?.deduplicate())
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/spam.csv");

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(Label::from_str("ham"), Ok(Label::NotSpam));
        assert_eq!(Label::from_str(" SPAM "), Ok(Label::Spam));
        assert_eq!(Label::from_str("Not Spam"), Ok(Label::NotSpam));
        assert!(Label::from_str("eggs").is_err());
        assert_eq!(Label::NotSpam.to_string(), "Not Spam");
        assert_eq!(Label::from_index(1), Some(Label::Spam));
        assert_eq!(Label::from_index(2), None);
    }

    #[test]
    fn test_csv_load_and_dedup() {
        let file = write_temp(
            "Category,Message\n\
             ham,See you at lunch\n\
             spam,\"Win a prize, call now\"\n\
             ham,See you at lunch\n\
             spam,See you at lunch\n",
        );
        let dataset = Dataset::from_file(file.path(), DatasetFormat::Csv).expect("load");
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.messages()[1].text, "Win a prize, call now");

        let dataset = dataset.deduplicate();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.labels(), vec![Label::NotSpam, Label::Spam, Label::Spam]);
        assert_eq!(dataset.spam_count(), 2);
    }

    #[test]
    fn test_column_order_from_header() {
        let file = write_temp("message,category\nFree entry,spam\n");
        let dataset = Dataset::from_file(file.path(), DatasetFormat::Csv).expect("load");
        assert_eq!(dataset.messages()[0], Message::new(Label::Spam, "Free entry"));
    }

    #[test]
    fn test_tsv_load() {
        let file = write_temp("ham\tOk lar... \"joking\" wif u oni\nspam\tFree msg\n");
        let dataset = Dataset::from_file(file.path(), DatasetFormat::Tsv).expect("load");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.messages()[0].text, "Ok lar... \"joking\" wif u oni");
        assert_eq!(dataset.messages()[1].label, Label::Spam);
    }

    #[test]
    fn test_tsv_tab_in_message() {
        let file = write_temp("ham\tsee you\tat noon\nspam\tfree\n");
        let dataset = Dataset::from_file(file.path(), DatasetFormat::Tsv).expect("load");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.messages()[0].text, "see you\tat noon");
        assert_eq!(dataset.messages()[1], Message::new(Label::Spam, "free"));
    }

    #[test]
    fn test_tsv_missing_message() {
        let file = write_temp("ham\tfine\nspam\n");
        let err = Dataset::from_file(file.path(), DatasetFormat::Tsv).unwrap_err();
        assert!(matches!(err, DataError::MissingField { row: 2 }));
    }

    #[test]
    fn test_csv_error_not_prefixed_twice() {
        let file = write_temp("Category,Message\nham,fine\nspam,too,many\n");
        let err = Dataset::from_file(file.path(), DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
        assert!(!err.to_string().contains("CSV error: CSV error"));
    }

    #[test]
    fn test_invalid_label() {
        let file = write_temp("Category,Message\nham,fine\nmaybe,hmm\n");
        let err = Dataset::from_file(file.path(), DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataError::InvalidLabel { row: 2, .. }));
    }

    #[test]
    fn test_missing_column() {
        let file = write_temp("Label,Text\nham,fine\n");
        let err = Dataset::from_file(file.path(), DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("Category")));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_file("/nonexistent/spam.csv", DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = load_dataset(FIXTURE, DatasetFormat::Csv).expect("load");
        let twice = once.clone().deduplicate();
        assert_eq!(once.len(), twice.len());

        let again = load_dataset(FIXTURE, DatasetFormat::Csv).expect("load");
        assert_eq!(once.len(), again.len());
        let raw = Dataset::from_file(FIXTURE, DatasetFormat::Csv).expect("load");
        assert!(once.len() < raw.len());
    }

    #[test]
    fn test_summary() {
        let dataset = Dataset::new(vec![
            Message::new(Label::Spam, "a"),
            Message::new(Label::NotSpam, "b"),
            Message::new(Label::NotSpam, "c"),
            Message::new(Label::NotSpam, "d"),
        ]);
        let summary = dataset.summary();
        assert_eq!(summary.total_samples, 4);
        assert_eq!(summary.spam_count, 1);
        assert!((summary.spam_ratio - 0.25).abs() < 1e-12);
        assert_eq!(Dataset::default().spam_ratio(), 0.0);
    }

    #[test]
    fn test_select() {
        let dataset = Dataset::new(vec![
            Message::new(Label::Spam, "a"),
            Message::new(Label::NotSpam, "b"),
        ]);
        let picked = dataset.select(&[1, 0, 5]);
        assert_eq!(picked.texts(), vec!["b", "a"]);
    }
}
