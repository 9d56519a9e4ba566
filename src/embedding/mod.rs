//! Query encoding.
//!
//! - [`Encoder`] is the seam the matcher depends on.
//! - [`minilm`] provides the production BERT encoder (with a stub mode).
//! - `MockEncoder` maps fixed texts to fixed vectors for tests.

/// BERT sentence model (mean pooling).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// MiniLM sentence encoder.
pub mod minilm;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Tokenizer loading and vector helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEncoder};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEncoder;

use std::sync::Arc;

/// Turns text into a fixed-length vector.
///
/// Implementations must be deterministic and produce vectors in the same space
/// (and with the same normalization) as the precomputed answer embeddings.
pub trait Encoder: Send + Sync {
    /// Encodes one text.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output dimensionality.
    fn dim(&self) -> usize;

    /// Returns `true` if the vectors carry no semantic signal.
    fn is_stub(&self) -> bool {
        false
    }
}

impl<T: Encoder + ?Sized> Encoder for Arc<T> {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).encode(text)
    }

    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}
