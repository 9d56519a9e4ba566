use std::io;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a model directory (or an explicit tokenizer path).
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path.is_dir() {
        model_path.join("tokenizer.json")
    } else {
        model_path.to_path_buf()
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer that truncates to `max_len` tokens and never pads.
///
/// Single-sequence encoding only: ids, type ids and attention mask must line
/// up one-to-one with the tensor the encoder builds.
pub fn load_tokenizer_for_encoding(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;
    tokenizer.with_padding(None);

    Ok(tokenizer)
}

/// Scales `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
