//! Trained spam detector: vectorizer, model and held-out statistics.

use serde::Serialize;
use smartcore::metrics::accuracy::Accuracy;
use smartcore::metrics::Metrics;
use spam_data::{load_dataset, Dataset, Label, TfIdfVectorizer};

use crate::config::DetectorConfig;
use crate::error::{DetectorError, Result};
use crate::naive_bayes::{MultinomialNB, MultinomialNBParameters};
use crate::split::train_test_split;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Posterior probability of `label`, in `[0, 1]`.
    pub confidence: f64,
}

impl Prediction {
    pub fn is_spam(&self) -> bool {
        self.label.is_spam()
    }

    /// Confidence as a percentage rounded to two decimals.
    pub fn confidence_percent(&self) -> f64 {
        round_to(self.confidence * 100.0, 2)
    }
}

/// Statistics computed once at training time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    /// Fraction of held-out messages classified correctly.
    pub accuracy: f64,
    /// Messages in the deduplicated dataset.
    pub total_samples: usize,
    pub spam_count: usize,
    pub spam_ratio: f64,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
}

impl ModelStats {
    /// Accuracy as a percentage rounded to two decimals.
    pub fn accuracy_percent(&self) -> f64 {
        round_to(self.accuracy * 100.0, 2)
    }

    /// Spam ratio as a percentage rounded to one decimal.
    pub fn spam_ratio_percent(&self) -> f64 {
        round_to(self.spam_ratio * 100.0, 1)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// A vectorizer and classifier fitted once, then shared read-only.
#[derive(Debug, Clone)]
pub struct SpamDetector {
    vectorizer: TfIdfVectorizer,
    model: MultinomialNB,
    stats: ModelStats,
}

impl SpamDetector {
    /// Load, deduplicate and train from the configured dataset.
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        let dataset = load_dataset(config.dataset_path()?, config.format)?;
        Self::train(&dataset, config)
    }

    pub fn train(dataset: &Dataset, config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        let split = train_test_split(dataset, config.test_size, config.seed)?;
        log::info!(
            "training on {} messages, holding out {}",
            split.train.len(),
            split.test.len()
        );

        let mut vectorizer = TfIdfVectorizer::english()?;
        let x_train = vectorizer.fit_transform(&split.train.texts())?;
        let model = MultinomialNB::fit(
            &x_train,
            &split.train.labels(),
            vectorizer.vocabulary_size(),
            MultinomialNBParameters::default().with_alpha(config.alpha),
        )?;

        let x_test = vectorizer.transform_batch(&split.test.texts())?;
        let y_test: Vec<usize> = split.test.labels().into_iter().map(Label::index).collect();
        let y_pred: Vec<usize> = x_test.iter().map(|x| model.predict(x).0.index()).collect();
        let accuracy = Accuracy::new().get_score(&y_test, &y_pred);

        let summary = dataset.summary();
        let stats = ModelStats {
            accuracy,
            total_samples: summary.total_samples,
            spam_count: summary.spam_count,
            spam_ratio: summary.spam_ratio,
            train_size: split.train.len(),
            test_size: split.test.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
        };
        log::info!(
            "vocabulary of {} tokens, held-out accuracy {:.4}",
            stats.vocabulary_size,
            stats.accuracy
        );

        Ok(Self {
            vectorizer,
            model,
            stats,
        })
    }

    /// Classify one message. Blank input is rejected before vectorizing.
    pub fn predict(&self, message: &str) -> Result<Prediction> {
        if message.trim().is_empty() {
            log::debug!("rejected empty message");
            return Err(DetectorError::EmptyMessage);
        }
        let features = self.vectorizer.transform(message)?;
        let (label, confidence) = self.model.predict(&features);
        log::debug!(
            "{} known tokens -> {} ({:.4})",
            features.nnz(),
            label,
            confidence
        );
        Ok(Prediction { label, confidence })
    }

    pub fn stats(&self) -> &ModelStats {
        &self.stats
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }
}

#[cfg(test)]
mod test {
    use spam_data::Message;

    use super::*;

    fn toy_dataset() -> Dataset {
        let spam = [
            "win a free prize now",
            "claim your cash prize today",
            "free entry to win cash",
            "urgent prize claim call now",
            "winner claim free voucher",
        ];
        let ham = [
            "lunch tomorrow at noon",
            "see you at the meeting",
            "can you pick up milk",
            "meeting moved to tomorrow",
            "dinner with mum tonight",
            "running late for lunch",
            "call me when home",
            "happy birthday see you soon",
            "meeting notes attached",
            "home soon for dinner",
        ];
        Dataset::new(
            spam.iter()
                .map(|t| Message::new(Label::Spam, *t))
                .chain(ham.iter().map(|t| Message::new(Label::NotSpam, *t)))
                .collect(),
        )
    }

    fn trained() -> SpamDetector {
        SpamDetector::train(&toy_dataset(), &DetectorConfig::default()).expect("train")
    }

    #[test]
    fn test_rounding() {
        let prediction = Prediction {
            label: Label::Spam,
            confidence: 0.876543,
        };
        assert_eq!(prediction.confidence_percent(), 87.65);
        assert_eq!(round_to(13.44, 1), 13.4);
    }

    #[test]
    fn test_empty_message_rejected() {
        let detector = trained();
        assert!(matches!(detector.predict(""), Err(DetectorError::EmptyMessage)));
        assert!(matches!(detector.predict(" \t\n"), Err(DetectorError::EmptyMessage)));
    }

    #[test]
    fn test_stats() {
        let detector = trained();
        let stats = detector.stats();
        assert_eq!(stats.total_samples, 15);
        assert_eq!(stats.spam_count, 5);
        assert_eq!(stats.test_size, 3);
        assert_eq!(stats.train_size, 12);
        assert!((0.0..=1.0).contains(&stats.accuracy));
        assert_eq!(stats.spam_ratio_percent(), 33.3);
        assert_eq!(stats.vocabulary_size, detector.vectorizer().vocabulary_size());
    }

    #[test]
    fn test_confidence_in_range() {
        let detector = trained();
        for message in ["free prize", "lunch", "zzz unknown", "!!!"] {
            let prediction = detector.predict(message).expect("predict");
            assert!(prediction.confidence >= 0.5 && prediction.confidence <= 1.0);
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = DetectorConfig::default().with_alpha(-1.0);
        assert!(matches!(
            SpamDetector::train(&toy_dataset(), &config),
            Err(DetectorError::InvalidConfig(_))
        ));
    }
}
