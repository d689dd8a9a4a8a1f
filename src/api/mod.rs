//! HTTP API module
//! 
//! This module exposes the timer engine to a presentation layer over HTTP.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::{
    events_handler, health_handler, minutes_handler, start_handler, status_handler, stop_handler,
    tens_handler, units_handler,
};

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/wheels/minutes", post(minutes_handler))
        .route("/wheels/tens", post(tens_handler))
        .route("/wheels/units", post(units_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
