//! Cross-cutting, shared constants.
//!
//! The fixed user-facing messages live here so the router, the gateway and the
//! tests agree on them byte for byte.

/// Similarity a semantic match must strictly exceed to be trusted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Output dimension of `all-MiniLM-L6-v2`.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the sentence encoder (MiniLM position embeddings).
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Returned when the message trims to nothing.
pub const EMPTY_INPUT_RESPONSE: &str = "Please type a message.";

/// Returned for a bare greeting.
pub const GREETING_RESPONSE: &str = "Hi there! How can I help you?";

/// Returned when no stage produced usable text.
pub const FALLBACK_RESPONSE: &str = "Sorry, I don't understand.";

/// Tokens that count as a greeting after trimming and ASCII case folding.
pub const GREETING_TOKENS: [&str; 3] = ["hi", "hello", "hey"];

/// System instruction sent with every completion request.
pub const SUPPORT_SYSTEM_PROMPT: &str = "You are a helpful customer support assistant.";

/// Completion model used when `SUPPORTBOT_CHAT_MODEL` is not set.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Upper bound on a single completion call.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Response header naming the stage that produced the answer.
pub const SUPPORTBOT_SOURCE_HEADER: &str = "x-supportbot-source";
