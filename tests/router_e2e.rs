//! End-to-end tests: snapshot files on disk, loaded index, HTTP round trips.

mod common;

use std::sync::Arc;

use common::{REFUND_ANSWER, RESET_ANSWER, TestServer, default_snapshot, write_snapshot};
use supportbot::corpus::{CorpusError, load_index};
use supportbot::embedding::{MiniLmConfig, MiniLmEncoder};
use supportbot::matcher::{MatcherError, SemanticMatcher};
use supportbot::provider::MockCompletionProvider;
use supportbot::router::ResponseRouter;
use supportbot::{
    EMPTY_INPUT_RESPONSE, FALLBACK_RESPONSE, GREETING_RESPONSE, MockEncoder,
    SUPPORT_SYSTEM_PROMPT,
};

fn query_encoder() -> MockEncoder {
    MockEncoder::new(2)
        .with_vector("reset my password", vec![1.0, 0.0])
        .with_vector("can I get my money back", vec![0.28, 0.96])
        .with_vector("half related", vec![0.6, 0.6])
}

#[tokio::test]
async fn test_full_conversation_over_http() {
    let files = default_snapshot();
    let index = Arc::new(load_index(&files.faq_path, &files.embeddings_path).unwrap());
    assert_eq!(index.len(), 2);

    let matcher = SemanticMatcher::with_default_threshold(index, query_encoder()).unwrap();
    let provider = Arc::new(MockCompletionProvider::replying("Let me check that for you."));
    let server = TestServer::spawn(ResponseRouter::new(
        Arc::new(matcher),
        Arc::clone(&provider),
    ))
    .await;

    assert_eq!(
        server.chat("   ").await,
        ("empty".to_string(), EMPTY_INPUT_RESPONSE.to_string())
    );
    assert_eq!(
        server.chat("Hey").await,
        ("greeting".to_string(), GREETING_RESPONSE.to_string())
    );
    assert_eq!(
        server.chat(" reset my password ").await,
        ("faq".to_string(), RESET_ANSWER.to_string())
    );
    assert_eq!(
        server.chat("can I get my money back").await,
        ("faq".to_string(), REFUND_ANSWER.to_string())
    );
    assert_eq!(provider.call_count(), 0);

    assert_eq!(
        server.chat("half related").await,
        ("llm".to_string(), "Let me check that for you.".to_string())
    );
    assert_eq!(
        provider.calls(),
        vec![(SUPPORT_SYSTEM_PROMPT.to_string(), "half related".to_string())]
    );
}

#[tokio::test]
async fn test_provider_outage_degrades_over_http() {
    let files = default_snapshot();
    let index = Arc::new(load_index(&files.faq_path, &files.embeddings_path).unwrap());
    let matcher = SemanticMatcher::with_default_threshold(index, query_encoder()).unwrap();
    let server = TestServer::spawn(ResponseRouter::new(
        Arc::new(matcher),
        MockCompletionProvider::failing("connection refused").then_reply(""),
    ))
    .await;

    assert_eq!(
        server.chat("unknown topic").await,
        ("fallback".to_string(), FALLBACK_RESPONSE.to_string())
    );
    assert_eq!(
        server.chat("unknown topic").await,
        ("fallback".to_string(), FALLBACK_RESPONSE.to_string())
    );
    assert_eq!(
        server.chat("reset my password").await,
        ("faq".to_string(), RESET_ANSWER.to_string())
    );
}

#[test]
fn test_stub_encoder_is_fatal_for_loaded_snapshot() {
    let files = default_snapshot();
    let index = Arc::new(load_index(&files.faq_path, &files.embeddings_path).unwrap());

    let encoder = MiniLmEncoder::load(MiniLmConfig::from_optional_dir(None)).unwrap();
    assert!(encoder.is_stub());

    let err = SemanticMatcher::with_default_threshold(index, encoder).unwrap_err();
    assert!(matches!(err, MatcherError::StubEncoder { rows: 2 }));
}

#[test]
fn test_encoder_width_mismatch_is_fatal() {
    let files = default_snapshot();
    let index = Arc::new(load_index(&files.faq_path, &files.embeddings_path).unwrap());

    let err = SemanticMatcher::with_default_threshold(index, MockEncoder::new(384)).unwrap_err();
    assert!(matches!(
        err,
        MatcherError::Index(CorpusError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_misaligned_snapshot_is_fatal() {
    let files = default_snapshot();
    let short = write_snapshot(&[("only", "one", [1.0, 0.0])]);

    let err = load_index(&files.faq_path, &short.embeddings_path).unwrap_err();
    assert!(matches!(
        err,
        CorpusError::RowMismatch {
            corpus_rows: 2,
            embedding_rows: 1
        }
    ));
}

#[test]
fn test_empty_snapshot_is_fatal() {
    let files = write_snapshot(&[]);
    let err = load_index(&files.faq_path, &files.embeddings_path).unwrap_err();
    assert!(matches!(err, CorpusError::Empty));
}
