//! Message tokenization: lowercase, strip punctuation, split, drop stop-words.

use std::collections::HashSet;

use stopwords::{Language, Stopwords, NLTK};

use crate::error::{DataError, Result};

/// Tokens shorter than this are discarded.
const MIN_TOKEN_LEN: usize = 2;

#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<&'static str>,
}

impl Tokenizer {
    /// Tokenizer using the NLTK English stop-word list.
    pub fn english() -> Result<Self> {
        let stop_words = NLTK::stopwords(Language::English)
            .ok_or(DataError::StopWordsUnavailable)?
            .iter()
            .copied()
            .collect();
        Ok(Self { stop_words })
    }

    /// Tokenizer that keeps every token, stop-words included.
    pub fn without_stop_words() -> Self {
        Self {
            stop_words: HashSet::new(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        without_punctuation(&lowercase(text))
            .split_whitespace()
            .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
            .filter(|token| !self.is_stop_word(token))
            .map(ToString::to_string)
            .collect()
    }
}

fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Every character that is not part of a word becomes a separator, so
/// contractions split ("you've" -> "you ve") instead of fusing.
fn without_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect()
}
