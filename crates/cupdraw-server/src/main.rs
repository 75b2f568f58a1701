// Tournament draw server entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file)
// 2. Load config
// 3. Open the player store and matchup sheet
// 4. Serve the JSON API until Ctrl+C

use std::sync::Arc;

use anyhow::Context;
use cupdraw_app::Tournament;
use cupdraw_core::config;
use cupdraw_server::{api, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_path = logging::init(&std::env::current_dir()?.join("logs"))?;
    info!("cupdraw starting up, logging to {}", log_path.display());

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: db={}, sheet={}",
        config.storage.db_path, config.storage.sheet_path
    );

    let tournament = Tournament::open(&config.storage).context("failed to open storage")?;
    let app = api::router(Arc::new(tournament));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("cupdraw shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {e}");
    }
}
