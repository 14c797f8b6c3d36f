use std::sync::Arc;

use axum::{Json, extract::State};
use moji_core::helpers::messages;

use crate::{info::dto::Info, state::ServerState};

#[utoipa::path(
    get,
    path = "/",
    description = "Health check",
    responses(
        (status = 200, description = "Server is up", body = Info),
    )
)]
pub async fn info(State(server_state): State<Arc<ServerState>>) -> Json<Info> {
    let config = server_state.config();

    Json(Info {
        status: "ok".to_string(),
        message: messages::SERVER_RUNNING.to_string(),
        mode: (if config.mock_mode { "mock" } else { "production" }).to_string(),
        env: config.env.to_string(),
    })
}
