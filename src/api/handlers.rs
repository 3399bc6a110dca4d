use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::error::ChatError;
use crate::session;
use crate::types::{
    ChatRequest, ChatResponse, ErrorResponse, KnowledgeBase, KnowledgeBasesResponse,
    SessionRequest, SessionResponse,
};

use super::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a `ChatError` to the HTTP boundary: 400 for validation, 504 for a
/// timed-out run, 500 for a failed run or any upstream error.
fn error_response(err: ChatError) -> ApiError {
    let status = match &err {
        ChatError::Validation(_) => StatusCode::BAD_REQUEST,
        ChatError::RunTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ChatError::RunFailed { .. } | ChatError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn require(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(error_response(ChatError::Validation(field)));
    }
    Ok(())
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// POST /chat - one request/response chat turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    require("assistantId", &req.assistant_id)?;
    require("threadId", &req.thread_id)?;
    require("message", &req.message)?;

    let reply = state
        .driver
        .submit_and_await_reply(
            &req.thread_id,
            &req.assistant_id,
            &req.message,
            state.config.run_timeout,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ChatResponse { reply }))
}

/// POST /session - create an assistant bound to a knowledge base plus a
/// fresh thread.
pub async fn open_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    require("vectorStoreId", &req.vector_store_id)?;

    let session = session::open_session(
        state.api.as_ref(),
        &state.config.model,
        &req.vector_store_id,
        req.vector_store_name.as_deref(),
        req.previous_assistant_id.as_deref(),
    )
    .await
    .map_err(error_response)?;

    Ok(Json(SessionResponse {
        assistant_id: session.assistant_id,
        thread_id: session.thread_id,
        model: session.model,
    }))
}

/// GET /knowledge-bases - list the available vector stores.
pub async fn list_knowledge_bases(
    State(state): State<AppState>,
) -> Result<Json<KnowledgeBasesResponse>, ApiError> {
    let stores = state
        .api
        .list_vector_stores()
        .await
        .map_err(error_response)?;

    let data = stores
        .into_iter()
        .map(|store| KnowledgeBase {
            name: store.name.unwrap_or_else(|| store.id.clone()),
            id: store.id,
            status: store.status,
            file_counts: store.file_counts,
            created_at: chrono::DateTime::from_timestamp(store.created_at, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| store.created_at.to_string()),
        })
        .collect();

    Ok(Json(KnowledgeBasesResponse { data }))
}
