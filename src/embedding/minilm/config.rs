use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default encoder output dimension.
pub const MINILM_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default encoder max sequence length.
pub const MINILM_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`MiniLmEncoder`](super::MiniLmEncoder).
pub struct MiniLmConfig {
    /// Directory with `config.json`, `model.safetensors` and `tokenizer.json`.
    /// `None` runs the deterministic stub.
    pub model_dir: Option<PathBuf>,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Output dimension of the stub; a loaded model reports its own hidden size.
    pub embedding_dim: usize,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim: MINILM_EMBEDDING_DIM,
        }
    }
}

impl MiniLmConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a config for stub mode (no model files required).
    pub fn stub() -> Self {
        Self::default()
    }

    /// Builds a config from an optional directory (the shape of `Config::encoder_path`).
    pub fn from_optional_dir(model_dir: Option<PathBuf>) -> Self {
        Self {
            model_dir,
            ..Default::default()
        }
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.model_dir.is_none()
    }

    /// Returns `true` if every file the model backend needs is present.
    pub fn model_available(&self) -> bool {
        self.model_dir.as_ref().is_some_and(|dir| {
            ["config.json", "model.safetensors", "tokenizer.json"]
                .iter()
                .all(|name| dir.join(name).is_file())
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be > 0".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be > 0".to_string(),
            });
        }

        if let Some(ref dir) = self.model_dir
            && dir.as_os_str().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }
}
