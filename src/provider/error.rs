use std::time::Duration;
use thiserror::Error;

/// Failures from the generative fallback.
///
/// The router never surfaces these to the caller; they are logged and the
/// request degrades to the fixed fallback message.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("completion request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("upstream completion request failed: {reason}")]
    Upstream { reason: String },
}

impl From<genai::Error> for ProviderError {
    fn from(err: genai::Error) -> Self {
        ProviderError::Upstream {
            reason: err.to_string(),
        }
    }
}
