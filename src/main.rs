//! Pomo Timer - A state-managed HTTP server driving a focus/break phase timer
//!
//! This is the main entry point for the pomo-timer application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use pomo_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomo_timer={},tower_http=info", config.log_level()))
        .init();

    let durations = config.durations().context("Invalid phase duration")?;

    info!("Starting pomo-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, short_break={}min, long_break={}min",
          config.host, config.port, config.focus, config.short_break, config.long_break);

    // Create application state; it owns the tick task
    let state = Arc::new(AppState::new(config.port, config.host.clone(), durations));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start              - Start or resume the countdown");
    info!("  POST /pause              - Pause the countdown");
    info!("  POST /skip               - Skip to the next phase");
    info!("  POST /reset              - Reset to the focus phase");
    info!("  POST /settings/toggle    - Toggle settings visibility");
    info!("  PUT  /durations/:phase   - Set a phase length ({{\"minutes\": n}})");
    info!("  GET  /status             - Current timer status");
    info!("  GET  /events             - Server-sent timer updates");
    info!("  GET  /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to install signal handler: {}", e),
            }
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
