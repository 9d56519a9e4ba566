//! supportbot library crate (used by the server binary and integration tests).
//!
//! A customer-support responder: each message is answered by the first stage
//! that can, in order: empty-input prompt, greeting, semantic FAQ lookup over
//! precomputed answer embeddings, then a chat-completion fallback.
//!
//! ## Modules
//! - [`config`] - `SUPPORTBOT_*` environment configuration
//! - [`corpus`] - FAQ CSV and `.npy` embedding loading, [`FaqIndex`]
//! - [`embedding`] - [`Encoder`] trait and the MiniLM sentence encoder
//! - [`matcher`] - [`SemanticMatcher`] (inner product, strict threshold)
//! - [`provider`] - [`CompletionProvider`] trait and the `genai` backend
//! - [`router`] - [`ResponseRouter`], the ordered stage chain
//! - [`gateway`] - Axum handlers
//!
//! ## Test/Mock Support
//! `MockEncoder` and `MockCompletionProvider` are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod gateway;
pub mod matcher;
pub mod provider;
pub mod router;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, EMPTY_INPUT_RESPONSE, FALLBACK_RESPONSE, GREETING_RESPONSE,
    SUPPORT_SYSTEM_PROMPT,
};
pub use corpus::{CorpusError, EmbeddingMatrix, FaqCorpus, FaqEntry, FaqIndex, load_index};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEncoder;
pub use embedding::{EmbeddingError, Encoder, MiniLmConfig, MiniLmEncoder};
pub use matcher::{MatchResult, MatcherConfig, MatcherError, SemanticMatcher};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockCompletionProvider;
pub use provider::{
    CompletionProvider, EchoProvider, GenaiProvider, ProviderError, TimeoutProvider,
};
pub use router::{ResponseRouter, ResponseSource, RoutedResponse, Stage};
