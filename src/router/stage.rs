use std::fmt;

use crate::constants::{FALLBACK_RESPONSE, GREETING_TOKENS};

/// One step of the routing chain. Stages run in [`Stage::PIPELINE`] order and
/// the first one yielding text ends processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Empty,
    Greeting,
    Semantic,
    Fallback,
}

impl Stage {
    pub const PIPELINE: [Stage; 4] = [
        Stage::Empty,
        Stage::Greeting,
        Stage::Semantic,
        Stage::Fallback,
    ];

    /// Source reported when this stage answers.
    pub fn source(self) -> ResponseSource {
        match self {
            Stage::Empty => ResponseSource::Empty,
            Stage::Greeting => ResponseSource::Greeting,
            Stage::Semantic => ResponseSource::Faq,
            Stage::Fallback => ResponseSource::Llm,
        }
    }
}

/// Which part of the chain produced the final text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseSource {
    Empty,
    Greeting,
    Faq,
    Llm,
    /// Safety net: no stage produced usable text.
    Fallback,
}

impl ResponseSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseSource::Empty => "empty",
            ResponseSource::Greeting => "greeting",
            ResponseSource::Faq => "faq",
            ResponseSource::Llm => "llm",
            ResponseSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final reply plus the stage that produced it. `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedResponse {
    pub text: String,
    pub source: ResponseSource,
}

impl RoutedResponse {
    /// Applies the safety net: a candidate that trims to nothing is replaced
    /// by the fallback message. Other candidates are returned untouched.
    pub fn from_candidate(candidate: String, source: ResponseSource) -> Self {
        if candidate.trim().is_empty() {
            Self::fallback()
        } else {
            Self {
                text: candidate,
                source,
            }
        }
    }

    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_RESPONSE.to_string(),
            source: ResponseSource::Fallback,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Exact greeting check on already-trimmed input, ignoring case.
/// "hi there" and "hiya" are not greetings.
pub fn is_greeting(trimmed: &str) -> bool {
    let folded = trimmed.to_lowercase();
    GREETING_TOKENS.iter().any(|token| folded == *token)
}
