//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::state::{app_state::Command, AppState, TimerState};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Run a command and describe what the clock is doing afterwards
fn command_response(state: &AppState, command: Command) -> Json<ApiResponse> {
    let transition = state.apply(command);
    let (was_running, snapshot) = (transition.before.is_running(), transition.after);

    let message = match command {
        Command::Start if snapshot.is_running() && !was_running => {
            format!("Countdown started from {}s", snapshot.remaining_seconds())
        }
        Command::Start if was_running => "Countdown already running".to_string(),
        Command::Start => "Nothing to count down; set a duration first".to_string(),
        Command::Stop => "Clock stopped and reset".to_string(),
        _ if was_running => "Wheels are locked while the countdown runs".to_string(),
        _ => format!("{} wheel turned", command.name()),
    };

    Json(ApiResponse::new(message, snapshot))
}

/// Handle POST /wheels/minutes - Turn the minutes wheel
pub async fn minutes_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    command_response(&state, Command::IncrementMinutes)
}

/// Handle POST /wheels/tens - Turn the tens-of-seconds wheel
pub async fn tens_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    command_response(&state, Command::IncrementTensSeconds)
}

/// Handle POST /wheels/units - Turn the units-of-seconds wheel
pub async fn units_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    command_response(&state, Command::IncrementUnitsSeconds)
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    command_response(&state, Command::Start)
}

/// Handle POST /stop - Stop and reset the clock
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    command_response(&state, Command::Stop)
}

/// Handle GET /status - Return current clock status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.engine.snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        view: (&snapshot).into(),
        state: snapshot,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Stream every published snapshot as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Snapshot subscriber connected");

    let stream = state.engine.snapshots().filter_map(|snapshot| async move {
        snapshot_event(&snapshot).map(Ok)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn snapshot_event(snapshot: &TimerState) -> Option<Event> {
    match Event::default().event("snapshot").json_data(snapshot) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("Failed to encode snapshot event: {}", e);
            None
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
