use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::Value;
use tower::ServiceExt;

use countdown_clock::{create_router, AppState};

fn app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(20560, "127.0.0.1".to_string()));
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_wheel_presses_update_state_and_view() {
    let (app, _) = app();

    send(&app, "POST", "/wheels/minutes").await;
    send(&app, "POST", "/wheels/tens").await;
    let (status, body) = send(&app, "POST", "/wheels/units").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["state"]["wheels"]["minutes"], 1);
    assert_eq!(body["state"]["wheels"]["tens_seconds"], 1);
    assert_eq!(body["state"]["wheels"]["units_seconds"], 1);
    assert_eq!(body["view"]["readout"], "1:11");
    assert_eq!(body["view"]["primary_action"], "start");
}

#[tokio::test(start_paused = true)]
async fn test_start_and_stop() {
    let (app, state) = app();

    let (_, body) = send(&app, "POST", "/start").await;
    assert_eq!(body["status"], "idle");

    send(&app, "POST", "/wheels/units").await;
    send(&app, "POST", "/wheels/units").await;
    let (_, body) = send(&app, "POST", "/start").await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["state"]["total_seconds"], 2);
    assert_eq!(body["state"]["remaining_seconds"], 2);
    assert_eq!(body["view"]["controls_enabled"], false);
    assert!(state.engine.snapshot().is_running());

    let (_, body) = send(&app, "POST", "/wheels/minutes").await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["state"]["configured"]["minutes"], 0);

    let (_, body) = send(&app, "POST", "/stop").await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["view"]["readout"], "0:00");
    assert!(state.engine.snapshot().is_idle());
}

#[tokio::test]
async fn test_status_reports_last_action() {
    let (app, _) = app();
    send(&app, "POST", "/stop").await;

    let (status, body) = send(&app, "GET", "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["status"], "idle");
    assert_eq!(body["last_action"], "stop");
    assert_eq!(body["port"], 20560);
}

#[tokio::test]
async fn test_events_stream_starts_with_current_snapshot() {
    let (app, _) = app();
    send(&app, "POST", "/wheels/tens").await;

    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");

    let mut frames = response.into_body().into_data_stream();
    let frame = frames.next().await.unwrap().unwrap();
    let frame = String::from_utf8(frame.to_vec()).unwrap();

    assert!(frame.starts_with("event: snapshot\n"), "unexpected frame: {frame}");
    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap();
    let snapshot: Value = serde_json::from_str(data).unwrap();
    assert_eq!(snapshot["status"], "idle");
    assert_eq!(snapshot["wheels"]["tens_seconds"], 1);
}
