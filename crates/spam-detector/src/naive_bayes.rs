//! Multinomial Naive Bayes over sparse TF-IDF vectors.
//!
//! smartcore's `MultinomialNB` only accepts unsigned count matrices and has no
//! posterior output, so fitting and scoring are done here on [`SparseVector`]s.

use serde::{Deserialize, Serialize};
use spam_data::{Label, SparseVector};

use crate::config::DEFAULT_ALPHA;
use crate::error::{DetectorError, Result};

const N_CLASSES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNBParameters {
    /// Additive (Laplace/Lidstone) smoothing parameter.
    pub alpha: f64,
}

impl Default for MultinomialNBParameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl MultinomialNBParameters {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MultinomialNB {
    class_count: [usize; N_CLASSES],
    class_log_prior: [f64; N_CLASSES],
    /// `[class][feature]` smoothed log likelihoods.
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl MultinomialNB {
    /// Fit class priors and per-token likelihoods in one pass over `x`.
    pub fn fit(
        x: &[SparseVector],
        y: &[Label],
        n_features: usize,
        parameters: MultinomialNBParameters,
    ) -> Result<Self> {
        if x.len() != y.len() {
            return Err(DetectorError::InsufficientData(format!(
                "{} feature rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(DetectorError::InsufficientData("no training rows".to_string()));
        }
        let alpha = parameters.alpha;
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(DetectorError::InvalidConfig(format!(
                "alpha must be positive, got {alpha}"
            )));
        }

        let mut class_count = [0usize; N_CLASSES];
        let mut feature_count = vec![vec![0.0; n_features]; N_CLASSES];
        for (row, label) in x.iter().zip(y) {
            let class = label.index();
            class_count[class] += 1;
            for (index, weight) in row.iter() {
                if index < n_features {
                    feature_count[class][index] += weight;
                }
            }
        }

        let n = x.len() as f64;
        let class_log_prior = class_count.map(|count| (count as f64 / n).ln());

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let total = counts.iter().sum::<f64>() + alpha * n_features as f64;
                let log_total = total.ln();
                counts
                    .into_iter()
                    .map(|count| (count + alpha).ln() - log_total)
                    .collect()
            })
            .collect();

        Ok(Self {
            class_count,
            class_log_prior,
            feature_log_prob,
            n_features,
        })
    }

    fn joint_log_likelihood(&self, x: &SparseVector) -> [f64; N_CLASSES] {
        let mut jll = self.class_log_prior;
        for (class, score) in jll.iter_mut().enumerate() {
            // An absent class stays at -inf.
            if self.class_count[class] == 0 {
                continue;
            }
            for (index, weight) in x.iter() {
                if index < self.n_features {
                    *score += weight * self.feature_log_prob[class][index];
                }
            }
        }
        jll
    }

    /// Posterior probability of each class, indexed by [`Label::index`].
    pub fn predict_proba(&self, x: &SparseVector) -> [f64; N_CLASSES] {
        softmax(&self.joint_log_likelihood(x))
    }

    /// Most probable label and its posterior. Ties go to the lower class index.
    pub fn predict(&self, x: &SparseVector) -> (Label, f64) {
        let proba = self.predict_proba(x);
        let mut best = 0;
        for class in 1..N_CLASSES {
            if proba[class] > proba[best] {
                best = class;
            }
        }
        let label = Label::ALL[best];
        (label, proba[best])
    }

    pub fn class_count(&self, label: Label) -> usize {
        self.class_count[label.index()]
    }

    pub fn class_log_prior(&self, label: Label) -> f64 {
        self.class_log_prior[label.index()]
    }

    pub fn feature_log_prob(&self, label: Label, feature: usize) -> Option<f64> {
        self.feature_log_prob[label.index()].get(feature).copied()
    }
}

/// Softmax over log probabilities, shifted by the max for stability.
fn softmax(log_probs: &[f64; N_CLASSES]) -> [f64; N_CLASSES] {
    let max = log_probs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp = log_probs.map(|lp| (lp - max).exp());
    let sum: f64 = exp.iter().sum();
    exp.map(|e| e / sum)
}
