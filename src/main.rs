//! Countdown Clock - a single-screen countdown timer
//! 
//! This is the main entry point serving the countdown engine over HTTP.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_clock::{
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
        .with_env_filter(format!("countdown_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-clock v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /wheels/minutes - Turn the minutes wheel");
    info!("  POST /wheels/tens    - Turn the tens-of-seconds wheel");
    info!("  POST /wheels/units   - Turn the units-of-seconds wheel");
    info!("  POST /start          - Start the countdown");
    info!("  POST /stop           - Stop and reset the clock");
    info!("  GET  /status         - Current clock state and view");
    info!("  GET  /events         - Snapshot stream (server-sent events)");
    info!("  GET  /health         - Health check");

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

    state.engine.stop();
    info!("Server shutdown complete");
    Ok(())
}
