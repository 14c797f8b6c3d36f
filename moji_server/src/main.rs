mod docs;
mod error;
mod info;
mod router;
mod slack;
mod state;
mod summarize;

use std::sync::Arc;

use moji_core::{config::dto::AppConfig, kv_store::storage::open_kv_store};
use router::router;
use state::ServerState;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    // Loads .env first so RUST_LOG from it reaches the subscriber.
    let config = AppConfig::from_env();
    tracing_subscriber::fmt::init();
    config.log_summary();

    let kv_store = open_kv_store(&config);
    let bind_address = config.bind_address();
    let state = Arc::new(ServerState::new(config, kv_store)?);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log::info!("Listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
