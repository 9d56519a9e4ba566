//! Static FAQ snapshot: question/answer pairs plus their precomputed embeddings.
//!
//! Loaded once at startup and never mutated. Row `i` of the CSV pairs with row
//! `i` of the `.npy` matrix; [`FaqIndex`] is the only way to put the two
//! together, so a misaligned snapshot cannot reach the matcher.

pub mod error;
pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::CorpusError;
pub use loader::{load_embeddings_npy, load_faq_csv, load_index, read_faq_csv};
pub use types::{EmbeddingMatrix, FaqCorpus, FaqEntry, FaqIndex};
