//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use candle_core::{Device, Tensor};
use supportbot::embedding::Encoder;
use supportbot::gateway::{HandlerState, create_router_with_state};
use supportbot::provider::CompletionProvider;
use supportbot::router::ResponseRouter;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const RESET_ANSWER: &str = "Go to settings > security > reset.";
pub const REFUND_ANSWER: &str = "Refunds are issued within 14 days.";

/// FAQ CSV and `.npy` matrix written to a temp dir.
pub struct SnapshotFiles {
    pub faq_path: PathBuf,
    pub embeddings_path: PathBuf,
    _dir: TempDir,
}

/// Writes `rows` as a `question,answer` CSV (plus an ignored `category`
/// column) and their vectors as an f32 `.npy` matrix.
pub fn write_snapshot(rows: &[(&str, &str, [f32; 2])]) -> SnapshotFiles {
    let dir = TempDir::new().unwrap();
    let faq_path = dir.path().join("faq_auto.csv");
    let embeddings_path = dir.path().join("answer_embeddings.npy");

    let mut writer = csv::Writer::from_path(&faq_path).unwrap();
    writer.write_record(["question", "answer", "category"]).unwrap();
    for (question, answer, _) in rows {
        writer.write_record([*question, *answer, "general"]).unwrap();
    }
    writer.flush().unwrap();

    let data: Vec<f32> = rows.iter().flat_map(|(_, _, v)| v.iter().copied()).collect();
    Tensor::from_vec(data, (rows.len(), 2), &Device::Cpu)
        .unwrap()
        .write_npy(&embeddings_path)
        .unwrap();

    SnapshotFiles {
        faq_path,
        embeddings_path,
        _dir: dir,
    }
}

pub fn default_snapshot() -> SnapshotFiles {
    write_snapshot(&[
        ("How do I reset my password?", RESET_ANSWER, [1.0, 0.0]),
        ("What is the refund policy?", REFUND_ANSWER, [0.0, 1.0]),
    ])
}

/// Server bound to an ephemeral port; stops on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn<E, P>(router: ResponseRouter<E, P>) -> Self
    where
        E: Encoder + 'static,
        P: CompletionProvider + 'static,
    {
        let app = create_router_with_state(HandlerState::new(Arc::new(router)));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            _server_handle: handle,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// POSTs `message` as a form and returns `(source header, response text)`.
    pub async fn chat(&self, message: &str) -> (String, String) {
        let res = reqwest::Client::new()
            .post(self.url())
            .form(&[("message", message)])
            .send()
            .await
            .unwrap();
        assert!(res.status().is_success(), "status {}", res.status());

        let source = res
            .headers()
            .get(supportbot::constants::SUPPORTBOT_SOURCE_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body: serde_json::Value = res.json().await.unwrap();
        (source, body["response"].as_str().unwrap().to_string())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
