use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;

use super::routes::create_router;
use crate::state::AppState;

pub async fn start_server(state: Arc<AppState>, shutdown_rx: watch::Receiver<bool>) -> Result<()> {
    let addr = state.config.bind_addr();

    let app = create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Switchboard API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;

    Ok(())
}

async fn shutdown_signal(mut shutdown_rx: watch::Receiver<bool>) {
    // Wait for shutdown signal
    while !*shutdown_rx.borrow() {
        if shutdown_rx.changed().await.is_err() {
            break;
        }
    }
    tracing::info!("Shutting down API server...");
}
