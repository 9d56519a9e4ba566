use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::CompletionProvider;
use super::error::ProviderError;

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Scripted provider for tests.
///
/// Replies are served from a queue; once it drains, the default reply is used.
/// Every call is recorded as `(system_instruction, user_message)`.
#[derive(Debug)]
pub struct MockCompletionProvider {
    script: Mutex<VecDeque<Scripted>>,
    default: Scripted,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::replying("mock completion")
    }
}

impl MockCompletionProvider {
    /// Always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: Scripted::Reply(text.into()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with an upstream error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            default: Scripted::Fail(reason.into()),
            ..Self::replying("")
        }
    }

    /// Queues a one-off reply ahead of the default.
    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.script.lock().push_back(Scripted::Reply(text.into()));
        self
    }

    /// Queues a one-off failure ahead of the default.
    pub fn then_fail(self, reason: impl Into<String>) -> Self {
        self.script.lock().push_back(Scripted::Fail(reason.into()));
        self
    }

    /// Sleeps before answering (for timeout tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .push((system_instruction.to_string(), user_message.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.default.clone());

        match next {
            Scripted::Reply(text) => Ok(text),
            Scripted::Fail(reason) => Err(ProviderError::Upstream { reason }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
