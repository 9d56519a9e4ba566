//! HTTP gateway (Axum): chat page, chat endpoint and probes.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::embedding::Encoder;
use crate::provider::CompletionProvider;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{ChatForm, ChatResponse, chat_handler, index_handler};
pub use state::HandlerState;

pub fn create_router_with_state<E, P>(state: HandlerState<E, P>) -> Router
where
    E: Encoder + 'static,
    P: CompletionProvider + 'static,
{
    Router::new()
        .route("/", get(index_handler).post(chat_handler))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub corpus_rows: usize,
    pub encoder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, P>(State(state): State<HandlerState<E, P>>) -> Response
where
    E: Encoder + 'static,
    P: CompletionProvider + 'static,
{
    let components = ComponentStatus {
        corpus_rows: state.corpus_rows(),
        encoder_mode: if state.encoder_is_stub() {
            "stub"
        } else {
            "model"
        },
    };

    let is_ready = components.corpus_rows > 0;
    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status = if is_ready { "ok" } else { "pending" };

    (status_code, Json(ReadyResponse { status, components })).into_response()
}
