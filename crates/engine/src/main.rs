use std::sync::Arc;
use anyhow::Result;
use tokio::sync::watch;

use switchboard_engine::api;
use switchboard_engine::config::Config;
use switchboard_engine::state::AppState;
use switchboard_shared::registry;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("Starting Switchboard...\n");

    let config = Config::from_env();
    tracing::info!(model = %config.model, "using model");

    for tool in registry::get_tools() {
        tracing::info!("registered tool: {}", tool.function.name);
    }

    let state = Arc::new(AppState::new(config));

    // Shutdown channel shared with the API server
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let api_state = state.clone();
    let api_handle = tokio::spawn(async move {
        if let Err(e) = api::start_server(api_state, shutdown_rx).await {
            eprintln!("API server crashed: {}", e);
        }
    });

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    println!("\nReceived shutdown signal...");

    let _ = shutdown_tx.send(true);
    let _ = api_handle.await;

    println!("Switchboard shutdown complete.");
    Ok(())
}
