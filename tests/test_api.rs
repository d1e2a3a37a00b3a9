use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::Value;
use tower::ServiceExt;

use pomo_timer::{create_router, state::PhaseDurations, AppState};

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), PhaseDurations::default()));
    (Arc::clone(&state), create_router(state))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn status_reports_idle_focus_by_default() {
    let (_, router) = app();
    let (status, body) = send(&router, Method::GET, "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "focus");
    assert_eq!(body["phase_label"], "Focus");
    assert_eq!(body["display"], "25:00");
    assert_eq!(body["progress_percent"], 100.0);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["running"], false);
    assert_eq!(body["ticking"], false);
    assert_eq!(body["durations"]["long_break"]["minutes"], 15);
    assert_eq!(body["port"], 20554);
    assert!(body["last_action"].is_null());
}

#[tokio::test(start_paused = true)]
async fn start_pause_resume_flow() {
    let (_, router) = app();

    let (status, body) = send(&router, Method::POST, "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["controls"], serde_json::json!(["pause", "skip", "reset", "settings"]));

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(body["ticking"], true);

    let (_, body) = send(&router, Method::POST, "/pause", None).await;
    assert_eq!(body["message"], "Timer paused");
    assert_eq!(body["timer"]["display"], "24:58");
    assert_eq!(body["timer"]["status"], "paused");
    assert_eq!(body["timer"]["controls"][0], "start");

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(body["ticking"], false);

    let (_, body) = send(&router, Method::POST, "/start", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 1498);
    assert_eq!(body["timer"]["status"], "running");
}

#[tokio::test]
async fn skip_cycles_and_reset_returns_to_focus() {
    let (_, router) = app();

    let (_, body) = send(&router, Method::POST, "/skip", None).await;
    assert_eq!(body["timer"]["phase"], "short-break");
    assert_eq!(body["timer"]["display"], "05:00");

    let (_, body) = send(&router, Method::POST, "/skip", None).await;
    assert_eq!(body["timer"]["phase"], "long-break");

    let (_, body) = send(&router, Method::POST, "/skip", None).await;
    assert_eq!(body["timer"]["phase"], "focus");

    send(&router, Method::POST, "/skip", None).await;
    let (status, body) = send(&router, Method::POST, "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "focus");
    assert_eq!(body["timer"]["remaining_seconds"], 1500);
    assert_eq!(body["timer"]["running"], false);
}

#[tokio::test]
async fn duration_change_applies_to_active_phase_only() {
    let (state, router) = app();

    let (status, body) = send(&router, Method::PUT, "/durations/focus", Some(r#"{"minutes": 10}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["remaining_seconds"], 600);
    assert_eq!(body["timer"]["display"], "10:00");

    state.skip().unwrap();
    let (status, body) = send(&router, Method::PUT, "/durations/focus", Some(r#"{"minutes": 30}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "short-break");
    assert_eq!(body["timer"]["remaining_seconds"], 300);
    assert_eq!(body["timer"]["durations"]["focus"]["seconds"], 1800);
}

#[tokio::test]
async fn invalid_duration_requests_are_rejected() {
    let (state, router) = app();

    let (status, body) = send(&router, Method::PUT, "/durations/focus", Some(r#"{"minutes": 0}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, body) = send(&router, Method::PUT, "/durations/long-break", Some(r#"{"minutes": 1441}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = send(&router, Method::PUT, "/durations/focus", Some(r#"{"minutes": -3}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::PUT, "/durations/focus", Some(r#"{"minutes": "ten"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::PUT, "/durations/lunch", Some(r#"{"minutes": 5}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(state.get_timer_state().unwrap().durations, PhaseDurations::default());
}

#[tokio::test]
async fn settings_toggle_is_reflected_in_status() {
    let (_, router) = app();

    let (_, body) = send(&router, Method::POST, "/settings/toggle", None).await;
    assert_eq!(body["message"], "Settings shown");

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(body["settings_visible"], true);
    assert_eq!(body["last_action"], "toggle-settings");
}

async fn next_frame(body: &mut axum::body::BodyDataStream) -> String {
    let chunk = tokio::time::timeout(Duration::from_secs(5), body.next())
        .await
        .expect("no event within 5s")
        .expect("event stream ended")
        .unwrap();
    String::from_utf8(chunk.to_vec()).unwrap()
}

#[tokio::test]
async fn events_stream_pushes_timer_updates() {
    let (state, router) = app();

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let mut body = response.into_body().into_data_stream();

    let first = next_frame(&mut body).await;
    assert!(first.starts_with("event: timer"), "unexpected frame: {first}");
    assert!(first.contains(r#""settings_visible":false"#));
    assert!(first.contains(r#""display":"25:00""#));

    state.toggle_settings().unwrap();

    let second = next_frame(&mut body).await;
    assert!(second.starts_with("event: timer"), "unexpected frame: {second}");
    assert!(second.contains(r#""settings_visible":true"#));
}

#[tokio::test]
async fn health_check() {
    let (_, router) = app();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
