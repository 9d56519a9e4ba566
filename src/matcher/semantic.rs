use std::sync::Arc;

use tracing::{debug, info};

use crate::corpus::{EmbeddingMatrix, FaqIndex};
use crate::embedding::Encoder;

use super::error::MatcherError;
use super::types::{MatchResult, MatcherConfig};

/// Maps a query to the single best precomputed answer, or to `NoMatch`.
///
/// The index and encoder are injected at construction and never mutated, so a
/// matcher can be shared across concurrent requests behind an `Arc`.
pub struct SemanticMatcher<E: Encoder> {
    index: Arc<FaqIndex>,
    encoder: E,
    config: MatcherConfig,
}

impl<E: Encoder> std::fmt::Debug for SemanticMatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticMatcher")
            .field("rows", &self.index.len())
            .field("dim", &self.index.dim())
            .field("encoder_dim", &self.encoder.dim())
            .field("threshold", &self.config.threshold)
            .finish()
    }
}

impl<E: Encoder> SemanticMatcher<E> {
    /// Fails if the threshold is not finite, or if a non-empty index is paired
    /// with a stub encoder or an encoder of a different width.
    pub fn new(
        index: Arc<FaqIndex>,
        encoder: E,
        config: MatcherConfig,
    ) -> Result<Self, MatcherError> {
        config.validate()?;

        if !index.is_empty() {
            if encoder.is_stub() {
                return Err(MatcherError::StubEncoder { rows: index.len() });
            }
            index.ensure_dim(encoder.dim())?;
        }

        Ok(Self {
            index,
            encoder,
            config,
        })
    }

    pub fn with_default_threshold(index: Arc<FaqIndex>, encoder: E) -> Result<Self, MatcherError> {
        Self::new(index, encoder, MatcherConfig::default())
    }

    /// Encodes `query`, scores it against every row and applies the threshold.
    ///
    /// Ties resolve to the lowest row. An empty index is always `NoMatch`.
    pub fn find_match(&self, query: &str) -> Result<MatchResult, MatcherError> {
        if self.index.is_empty() {
            debug!("Empty FAQ index, nothing to match");
            return Ok(MatchResult::NoMatch);
        }

        let query_vec = self.encoder.encode(query)?;
        if query_vec.len() != self.index.dim() {
            return Err(MatcherError::DimensionMismatch {
                expected: self.index.dim(),
                actual: query_vec.len(),
            });
        }

        let scores = similarity_scores(self.index.embeddings(), &query_vec);

        let Some((row, score)) = best_row(&scores) else {
            debug!("No comparable score (all NaN)");
            return Ok(MatchResult::NoMatch);
        };

        if !self.config.is_confident(score) {
            debug!(
                row,
                score,
                threshold = self.config.threshold,
                "Best FAQ row below threshold"
            );
            return Ok(MatchResult::NoMatch);
        }

        let Some(entry) = self.index.corpus().get(row) else {
            // Unreachable for a FaqIndex, which is row-aligned by construction.
            return Ok(MatchResult::NoMatch);
        };

        info!(
            row,
            score,
            threshold = self.config.threshold,
            "FAQ match"
        );

        Ok(MatchResult::Matched {
            answer: entry.answer.clone(),
            score,
            row,
        })
    }

    pub fn index(&self) -> &FaqIndex {
        &self.index
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn threshold(&self) -> f32 {
        self.config.threshold
    }
}

/// Inner product of `a` and `b` (cosine similarity for unit vectors).
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Scores every matrix row against `query`, in row order.
pub fn similarity_scores(matrix: &EmbeddingMatrix, query: &[f32]) -> Vec<f32> {
    matrix.iter_rows().map(|row| dot(row, query)).collect()
}

/// Index and value of the maximum score; the first occurrence wins ties and
/// NaN never wins. `None` for an empty slice or all-NaN input.
pub fn best_row(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, s)| !s.is_nan())
        .fold(None, |best, (idx, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((idx, score)),
        })
}
