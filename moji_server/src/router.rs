use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    docs::{dto::ApiDoc, handler::api_docs},
    error::not_found,
    info::handler::info,
    slack::handler::{command, events},
    state::ServerState,
    summarize::handler::summarize,
};

const CORS_MAX_AGE: Duration = Duration::from_secs(86400);

pub fn router(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(CORS_MAX_AGE);

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .route("/", get(info))
        .route("/summarize", post(summarize))
        .route("/slack/events", post(events))
        .route("/slack/command", post(command))
        .route("/docs", get(api_docs))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
