use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

/// BERT encoder with attention-masked mean pooling (sentence-transformers style).
#[derive(Clone)]
pub struct BertSentenceModel {
    bert: Arc<BertModel>,
    hidden_size: usize,
}

impl BertSentenceModel {
    /// Loads `config.json` + `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        // Exported sentence-transformers checkpoints drop the `bert.` prefix.
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self {
            bert: Arc::new(bert),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns the pooled `[batch, hidden]` sentence embedding (not normalized).
    pub fn forward_pooled(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self
            .bert
            .forward(input_ids, &token_type_ids, Some(attention_mask))?;

        // [batch, seq] -> [batch, seq, 1] so padding positions contribute nothing.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;

        summed.broadcast_div(&counts)
    }
}
