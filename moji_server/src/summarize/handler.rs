use std::sync::Arc;

use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};
use moji_core::{
    helpers::messages,
    summarize::{
        dto::{SummarizeRequest, SummarizeResponse},
        handler::summarize_request,
    },
};

use crate::state::ServerState;

#[utoipa::path(
    post,
    path = "/summarize",
    request_body = SummarizeRequest,
    description = "Summarize YouTube captions or pasted text",
    responses(
        (status = 200, description = "Success", body = SummarizeResponse),
        (status = 400, description = "Invalid mode, missing input or captions unavailable", body = SummarizeResponse),
        (status = 401, description = "API key rejected upstream", body = SummarizeResponse),
        (status = 429, description = "Upstream quota exceeded", body = SummarizeResponse),
        (status = 500, description = "Summarization failed", body = SummarizeResponse),
    )
)]
pub async fn summarize(
    State(server_state): State<Arc<ServerState>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> (StatusCode, Json<SummarizeResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            log::error!("Rejected summarize body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SummarizeResponse::failure(messages::SUMMARIZE_FAILED)),
            );
        }
    };

    let result = summarize_request(
        server_state.captions(),
        server_state.summarizer(),
        server_state.config().openai_api_key.as_deref(),
        &request,
    )
    .await;

    match result {
        Ok(summary) => (StatusCode::OK, Json(SummarizeResponse::success(summary))),
        Err(e) => {
            log::warn!("Summarize request failed: {}", e);
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(SummarizeResponse::failure(e.user_message())))
        }
    }
}
