use thiserror::Error;

use crate::corpus::CorpusError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("encoder error: {0}")]
    Encoder(#[from] EmbeddingError),

    #[error("index error: {0}")]
    Index(#[from] CorpusError),

    #[error("query embedding has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("stub encoder cannot match against {rows} precomputed embeddings; configure a model directory")]
    StubEncoder { rows: usize },

    #[error("confidence threshold must be finite, got {value}")]
    InvalidThreshold { value: f32 },
}
