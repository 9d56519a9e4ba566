use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::constants::SUPPORTBOT_SOURCE_HEADER;
use crate::embedding::Encoder;
use crate::provider::CompletionProvider;

use super::error::GatewayError;
use super::state::HandlerState;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Form body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[instrument]
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Routes one chat message. Any present `message` (even blank) gets a 200
/// reply; a missing field or undecodable body is a 400.
#[instrument(skip(state, form), fields(message_len = tracing::field::Empty))]
pub async fn chat_handler<E, P>(
    State(state): State<HandlerState<E, P>>,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Result<Response, GatewayError>
where
    E: Encoder + 'static,
    P: CompletionProvider + 'static,
{
    let Form(form) =
        form.map_err(|e| GatewayError::InvalidRequest(format!("invalid form body: {}", e)))?;
    let message = form
        .message
        .ok_or_else(|| GatewayError::InvalidRequest("missing form field `message`".to_string()))?;
    tracing::Span::current().record("message_len", message.len());

    let routed = state.router.route(&message).await;
    debug!(source = %routed.source, "Chat reply ready");

    let mut headers = HeaderMap::new();
    headers.insert(
        SUPPORTBOT_SOURCE_HEADER,
        HeaderValue::from_static(routed.source.as_str()),
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(ChatResponse {
            response: routed.into_text(),
        }),
    )
        .into_response())
}
