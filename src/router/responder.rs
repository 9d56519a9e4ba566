use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::constants::{EMPTY_INPUT_RESPONSE, GREETING_RESPONSE, SUPPORT_SYSTEM_PROMPT};
use crate::embedding::Encoder;
use crate::matcher::{MatchResult, SemanticMatcher};
use crate::provider::CompletionProvider;

use super::stage::{ResponseSource, RoutedResponse, Stage, is_greeting};

/// Turns one raw user message into one non-empty reply.
///
/// Holds no per-request state; share it behind an `Arc` and call
/// [`route`](Self::route) concurrently.
pub struct ResponseRouter<E: Encoder, P: CompletionProvider> {
    matcher: Arc<SemanticMatcher<E>>,
    provider: P,
}

impl<E: Encoder, P: CompletionProvider> std::fmt::Debug for ResponseRouter<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseRouter")
            .field("matcher", &self.matcher)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl<E: Encoder, P: CompletionProvider> ResponseRouter<E, P> {
    pub fn new(matcher: Arc<SemanticMatcher<E>>, provider: P) -> Self {
        Self { matcher, provider }
    }

    pub fn matcher(&self) -> &SemanticMatcher<E> {
        &self.matcher
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Reply text only.
    pub async fn respond(&self, message: &str) -> String {
        self.route(message).await.into_text()
    }

    /// Runs the stage chain on the trimmed message.
    #[instrument(skip(self, message), fields(query_len = message.len()))]
    pub async fn route(&self, message: &str) -> RoutedResponse {
        let trimmed = message.trim();

        for stage in Stage::PIPELINE {
            if let Some(candidate) = self.run_stage(stage, trimmed).await {
                let routed = RoutedResponse::from_candidate(candidate, stage.source());
                if routed.source == ResponseSource::Fallback {
                    warn!(stage = ?stage, "Stage produced blank text, using fallback message");
                }
                info!(source = %routed.source, "Routed message");
                return routed;
            }
            debug!(stage = ?stage, "Stage passed");
        }

        info!(source = %ResponseSource::Fallback, "Routed message");
        RoutedResponse::fallback()
    }

    async fn run_stage(&self, stage: Stage, trimmed: &str) -> Option<String> {
        match stage {
            Stage::Empty => trimmed.is_empty().then(|| EMPTY_INPUT_RESPONSE.to_string()),
            Stage::Greeting => is_greeting(trimmed).then(|| GREETING_RESPONSE.to_string()),
            Stage::Semantic => self.semantic_answer(trimmed),
            Stage::Fallback => self.complete(trimmed).await,
        }
    }

    fn semantic_answer(&self, trimmed: &str) -> Option<String> {
        match self.matcher.find_match(trimmed) {
            Ok(MatchResult::Matched { answer, score, row }) => {
                debug!(row, score, "FAQ answer selected");
                Some(answer)
            }
            Ok(MatchResult::NoMatch) => None,
            Err(e) => {
                warn!(error = %e, "Semantic lookup failed, treating as no match");
                None
            }
        }
    }

    async fn complete(&self, trimmed: &str) -> Option<String> {
        match self.provider.complete(SUPPORT_SYSTEM_PROMPT, trimmed).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!(provider = self.provider.name(), error = %e, "Completion failed");
                None
            }
        }
    }
}
