//! MiniLM sentence encoder (BERT + mean pooling + L2 normalization).
//!
//! Produces vectors comparable with `all-MiniLM-L6-v2` answer embeddings.
//! Use [`MiniLmConfig::stub`] for tests/examples without model files.

/// MiniLM configuration.
pub mod config;


pub use config::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::Encoder;
use crate::embedding::bert::BertSentenceModel;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{l2_normalize, load_tokenizer_for_encoding};

enum EncoderBackend {
    Model {
        model: BertSentenceModel,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Query encoder used by the semantic matcher (supports stub mode).
pub struct MiniLmEncoder {
    backend: EncoderBackend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.dim())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_dir) = config.model_dir.clone() else {
            warn!("MiniLM encoder running in STUB mode (no model directory configured)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        };

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound { path: model_dir });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for encoder");

        let model = BertSentenceModel::load(&model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer_for_encoding(&model_dir, config.max_seq_len).map_err(
            |e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            },
        )?;

        info!(
            model_dir = %model_dir.display(),
            hidden_size = model.hidden_size(),
            max_seq_len = config.max_seq_len,
            "MiniLM encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Shorthand for `load(MiniLmConfig::stub())`.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(MiniLmConfig::stub())
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertSentenceModel,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![0.0; model.hidden_size()]);
        }

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Encoding query"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = model
            .forward_pooled(&input_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("BERT forward pass failed: {}", e),
            })?;

        let mut embedding = pooled.squeeze(0)?.to_vec1::<f32>()?;
        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding: Vec<f32> = (0..self.config.embedding_dim)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect();

        l2_normalize(&mut embedding);
        embedding
    }
}

impl Encoder for MiniLmEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn dim(&self) -> usize {
        match &self.backend {
            EncoderBackend::Model { model, .. } => model.hidden_size(),
            EncoderBackend::Stub => self.config.embedding_dim,
        }
    }

    fn is_stub(&self) -> bool {
        MiniLmEncoder::is_stub(self)
    }
}
