use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::constants::SUPPORT_SYSTEM_PROMPT;

#[test]
fn test_chat_request_has_system_then_user() {
    let request = build_chat_request(SUPPORT_SYSTEM_PROMPT, "where is my order?");

    assert_eq!(request.messages.len(), 2);
    let debug = format!("{:?}", request.messages);
    let system_at = debug.find(SUPPORT_SYSTEM_PROMPT).expect("system text");
    let user_at = debug.find("where is my order?").expect("user text");
    assert!(system_at < user_at);
}

#[test]
fn test_genai_provider_keeps_model_name() {
    let provider = GenaiProvider::new("gpt-3.5-turbo");
    assert_eq!(provider.model(), "gpt-3.5-turbo");
    assert_eq!(provider.name(), "genai");
    assert!(format!("{provider:?}").contains("gpt-3.5-turbo"));
}

#[tokio::test]
async fn test_echo_provider() {
    let reply = EchoProvider
        .complete(SUPPORT_SYSTEM_PROMPT, "track my parcel")
        .await
        .expect("echo");
    assert_eq!(reply, "Mock response for: track my parcel");
}

#[tokio::test]
async fn test_mock_records_calls_and_scripts() {
    let mock = MockCompletionProvider::replying("default")
        .then_reply("first")
        .then_fail("boom");

    assert_eq!(mock.complete("sys", "a").await.expect("first"), "first");
    assert!(matches!(
        mock.complete("sys", "b").await,
        Err(ProviderError::Upstream { .. })
    ));
    assert_eq!(mock.complete("sys", "c").await.expect("default"), "default");

    assert_eq!(mock.call_count(), 3);
    assert_eq!(mock.calls()[1], ("sys".to_string(), "b".to_string()));
}

#[tokio::test]
async fn test_arc_dyn_provider_delegates() {
    let provider: Arc<dyn CompletionProvider> = Arc::new(EchoProvider);
    assert_eq!(provider.name(), "echo");
    assert_eq!(
        provider.complete("sys", "x").await.expect("echo"),
        "Mock response for: x"
    );
}

#[tokio::test]
async fn test_timeout_passes_fast_replies_through() {
    let provider = TimeoutProvider::new(
        MockCompletionProvider::replying("quick"),
        Duration::from_secs(5),
    );
    assert_eq!(provider.complete("sys", "q").await.expect("reply"), "quick");
    assert_eq!(provider.name(), "mock");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_cuts_slow_provider() {
    let provider = TimeoutProvider::new(
        MockCompletionProvider::replying("too late").with_delay(Duration::from_secs(60)),
        Duration::from_secs(1),
    );

    let err = provider.complete("sys", "q").await.unwrap_err();
    assert!(matches!(err, ProviderError::Timeout { after } if after == Duration::from_secs(1)));
    assert_eq!(provider.inner().call_count(), 1);
}

#[tokio::test]
async fn test_timeout_preserves_inner_errors() {
    let provider = TimeoutProvider::new(
        MockCompletionProvider::failing("rate limited"),
        Duration::from_secs(5),
    );
    let err = provider.complete("sys", "q").await.unwrap_err();
    assert!(err.to_string().contains("rate limited"));
}
