use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, instrument};

use super::CompletionProvider;
use super::error::ProviderError;

/// Chat-completion fallback backed by `genai` (OpenAI models by default).
///
/// Credentials come from the environment the way `genai` resolves them
/// (`OPENAI_API_KEY` for `gpt-*` models).
#[derive(Clone)]
pub struct GenaiProvider {
    client: Client,
    model: String,
}

impl std::fmt::Debug for GenaiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiProvider")
            .field("model", &self.model)
            .finish()
    }
}

impl GenaiProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Builds the two-message request: fixed system instruction, then the user turn.
pub fn build_chat_request(system_instruction: &str, user_message: &str) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(system_instruction.to_string()),
        ChatMessage::user(user_message.to_string()),
    ])
}

#[async_trait]
impl CompletionProvider for GenaiProvider {
    #[instrument(skip_all, fields(model = %self.model, user_len = user_message.len()))]
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        let request = build_chat_request(system_instruction, user_message);

        let response = self.client.exec_chat(&self.model, request, None).await?;

        // No text is Ok(""), not an error.
        let content = response.first_text().unwrap_or_default().to_string();
        debug!(content_len = content.len(), "Completion received");

        Ok(content)
    }

    fn name(&self) -> &str {
        "genai"
    }
}
