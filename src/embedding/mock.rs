use std::collections::HashMap;

use parking_lot::Mutex;

use super::{Encoder, EmbeddingError};

/// Lookup-table encoder for tests.
///
/// Texts registered with [`MockEncoder::with_vector`] encode to exactly that
/// vector; anything else encodes to the all-zero vector,
/// which scores 0.0 against every row.
#[derive(Debug)]
pub struct MockEncoder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    default_vector: Vec<f32>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl MockEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: HashMap::new(),
            default_vector: vec![0.0; dim],
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Every `encode` call fails with `InferenceFailed`.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Texts passed to `encode`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Encoder for MockEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.lock().push(text.to_string());

        if self.fail {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock encoder failure".to_string(),
            });
        }

        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_vector.clone()))
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
