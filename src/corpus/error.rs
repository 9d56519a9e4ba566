use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or aligning the FAQ snapshot.
///
/// All of these are startup-time conditions; a process that hits one should
/// refuse to serve rather than answer from a misaligned index.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse FAQ table: {0}")]
    Csv(#[from] csv::Error),

    #[error("FAQ table is missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("failed to read embedding array: {reason}")]
    Npy { reason: String },

    #[error("embedding array must be 2-dimensional, got shape {shape:?}")]
    InvalidShape { shape: Vec<usize> },

    #[error("invalid embedding matrix: {reason}")]
    InvalidMatrix { reason: String },

    #[error("FAQ corpus is empty")]
    Empty,

    #[error("FAQ corpus has {corpus_rows} rows but embedding matrix has {embedding_rows}")]
    RowMismatch {
        corpus_rows: usize,
        embedding_rows: usize,
    },

    #[error("embedding dimension mismatch: encoder produces {expected}, matrix has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl From<candle_core::Error> for CorpusError {
    fn from(err: candle_core::Error) -> Self {
        CorpusError::Npy {
            reason: err.to_string(),
        }
    }
}
