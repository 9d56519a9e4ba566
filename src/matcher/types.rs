use crate::constants::DEFAULT_CONFIDENCE_THRESHOLD;

use super::error::MatcherError;

#[derive(Debug, Clone, PartialEq)]
/// Outcome of a semantic lookup.
pub enum MatchResult {
    /// Best row scored strictly above the threshold.
    Matched {
        /// Answer text, verbatim from the corpus.
        answer: String,
        /// Inner-product similarity of the winning row.
        score: f32,
        /// Corpus row of the answer.
        row: usize,
    },
    /// Nothing cleared the threshold (or there was nothing to compare against).
    NoMatch,
}

impl MatchResult {
    /// Returns `true` if matched.
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    /// Returns the answer (if matched).
    pub fn answer(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { answer, .. } => Some(answer),
            MatchResult::NoMatch => None,
        }
    }

    /// Returns the score (if matched).
    pub fn score(&self) -> Option<f32> {
        match self {
            MatchResult::Matched { score, .. } => Some(*score),
            MatchResult::NoMatch => None,
        }
    }

    /// Consumes the result, returning the answer (if matched).
    pub fn into_answer(self) -> Option<String> {
        match self {
            MatchResult::Matched { answer, .. } => Some(answer),
            MatchResult::NoMatch => None,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Matched { score, row, .. } => {
                write!(f, "MATCHED (row: {}, score: {:.4})", row, score)
            }
            MatchResult::NoMatch => write!(f, "NO_MATCH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Matcher tuning.
pub struct MatcherConfig {
    /// A match is trusted only when its score is strictly greater than this.
    pub threshold: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl MatcherConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), MatcherError> {
        if !self.threshold.is_finite() {
            return Err(MatcherError::InvalidThreshold {
                value: self.threshold,
            });
        }
        Ok(())
    }

    /// Strict comparison: a score equal to the threshold is not confident.
    pub fn is_confident(&self, score: f32) -> bool {
        score > self.threshold
    }
}
