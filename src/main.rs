//! Chronodeck - A clock, countdown timer and stopwatch web widget
//!
//! This is the main entry point for the chronodeck application.

use std::sync::Arc;
use anyhow::{anyhow, Context};
use tokio::net::TcpListener;
use tracing::info;

use chronodeck::{
    config::Config,
    state::AppState,
    api::create_router,
    services::AssetCache,
    tasks::{clock_ticker_task, stopwatch_ticker_task, timer_ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("chronodeck={},tower_http=info", config.log_level()))
        .init();

    info!("Starting chronodeck server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, assets={}, locale={}",
          config.host, config.port, config.assets.display(), config.locale);

    let locale = config.locale().map_err(|e| anyhow!(e))?;

    // Install the offline bundle before serving anything
    let assets = AssetCache::install(&config.assets).await;

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), locale, assets));

    // One ticking task per component
    tokio::spawn(timer_ticker_task(Arc::clone(&state)));
    tokio::spawn(stopwatch_ticker_task(Arc::clone(&state)));
    tokio::spawn(clock_ticker_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /clock                  - Current time and date");
    info!("  GET    /timer                  - Timer state");
    info!("  POST   /timer/{{start,pause}}    - Run or pause the countdown");
    info!("  POST   /timer/reset            - Reload from the entry fields");
    info!("  POST   /timer/set              - Set minutes and seconds");
    info!("  DELETE /timer/notification     - Dismiss the pending notification");
    info!("  GET    /stopwatch              - Stopwatch state and laps");
    info!("  POST   /stopwatch/{{start,pause,reset,lap}}");
    info!("  GET    /status                 - Everything at once");
    info!("  GET    /health                 - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
