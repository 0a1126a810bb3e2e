//! TF-IDF vectorizer for message feature extraction.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{DataError, Result};
use crate::tokenizer::Tokenizer;

/// Sparse feature vector: `(index, weight)` pairs sorted by index.
///
/// Indices absent from the vector have weight zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from `index -> weight` pairs; the `BTreeMap` keeps them ordered.
    fn from_map(map: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }
}

/// TF-IDF vectorizer with a vocabulary learned once by [`TfIdfVectorizer::fit`].
///
/// Weights are raw term counts scaled by a smoothed inverse document
/// frequency, `ln((1 + n) / (1 + df)) + 1`, then L2-normalized per message.
#[derive(Clone)]
pub struct TfIdfVectorizer {
    /// Vocabulary: token -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each index.
    idf: Vec<f64>,
    /// Number of documents seen during fit.
    n_documents: usize,
    tokenizer: Tokenizer,
    fitted: bool,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("fitted", &self.fitted)
            .finish()
    }
}

impl TfIdfVectorizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            tokenizer,
            fitted: false,
        }
    }

    /// Vectorizer with English stop-words removed.
    pub fn english() -> Result<Self> {
        Ok(Self::new(Tokenizer::english()?))
    }

    /// Learn the vocabulary and IDF weights from the training documents.
    ///
    /// Indices follow lexicographic token order, so the same documents always
    /// produce the same vocabulary.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> &mut Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique: BTreeSet<String> =
                self.tokenizer.tokenize(doc.as_ref()).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (token, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(token, index);
        }

        log::debug!(
            "fitted TF-IDF vocabulary of {} tokens over {} documents",
            vocabulary.len(),
            documents.len()
        );

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = documents.len();
        self.fitted = true;
        self
    }

    /// Project one document into the fitted vector space.
    ///
    /// Tokens outside the vocabulary contribute nothing.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.fitted {
            return Err(DataError::NotFitted);
        }

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in self.tokenizer.tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, weight) in counts.iter_mut() {
            *weight *= self.idf[*index];
        }

        let norm = counts.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in counts.values_mut() {
                *weight /= norm;
            }
        }

        Ok(SparseVector::from_map(counts))
    }

    pub fn transform_batch<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents);
        self.transform_batch(documents)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }

    pub fn idf(&self, token: &str) -> Option<f64> {
        self.index_of(token).map(|index| self.idf[index])
    }
}
