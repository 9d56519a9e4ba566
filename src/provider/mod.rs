//! Generative fallback used when no FAQ answer is confident.
//!
//! - [`CompletionProvider`] is the seam the router depends on.
//! - [`GenaiProvider`] calls a hosted chat model.
//! - [`TimeoutProvider`] bounds any provider's latency.
//! - [`EchoProvider`] answers locally (`SUPPORTBOT_MOCK_PROVIDER`), for demos and smoke tests.

pub mod error;
pub mod llm;
#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(test)]
mod tests;

pub use error::ProviderError;
pub use llm::{GenaiProvider, build_chat_request};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCompletionProvider;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

/// Produces free-text answers from a system instruction and one user turn.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the generated text. Empty text is allowed; failures are errors.
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ProviderError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: CompletionProvider + ?Sized> CompletionProvider for Arc<T> {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        (**self).complete(system_instruction, user_message).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Wraps a provider so no call blocks longer than `timeout`.
#[derive(Debug, Clone)]
pub struct TimeoutProvider<P> {
    inner: P,
    timeout: Duration,
}

impl<P: CompletionProvider> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl<P: CompletionProvider> CompletionProvider for TimeoutProvider<P> {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        match tokio::time::timeout(
            self.timeout,
            self.inner.complete(system_instruction, user_message),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = self.inner.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Completion timed out"
                );
                Err(ProviderError::Timeout {
                    after: self.timeout,
                })
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Local provider that echoes the user turn; never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoProvider;

#[async_trait]
impl CompletionProvider for EchoProvider {
    async fn complete(
        &self,
        _system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        Ok(format!("Mock response for: {}", user_message))
    }

    fn name(&self) -> &str {
        "echo"
    }
}
