//! POST /api/chat: answers the last customer message with site context.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use rag_chat::{ChatRequest, ChatResponse, chat_completion};
use tracing::{debug, info};

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Handler: POST /api/chat (also mounted at /api/bruvi)
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"messages":[{"text":"Can it brew tea?","source":"customer"}]}'
/// ```
pub async fn chat_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let Json(body) = payload?;
    debug!(
        request_id = %request_id,
        messages = body.messages.len(),
        "chat_route: start"
    );

    let reply = chat_completion(
        &body,
        &state.corpus,
        state.embedder.as_ref(),
        state.completer.as_ref(),
        &state.chat,
    )
    .await?;

    info!(
        request_id = %request_id,
        references = reply.references.len(),
        "chat_route: success"
    );
    Ok(Json(reply))
}
