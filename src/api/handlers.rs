//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::Stream;
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing::{error, warn};

use crate::state::{AppState, Phase, TimerError};
use super::responses::{
    ApiResponse, DurationRequest, ErrorResponse, HealthResponse, StatusResponse, TimerView,
};

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

type ApiResult<T> = Result<Json<T>, ApiError>;

fn timer_error(context: &str, e: TimerError) -> ApiError {
    if e.is_client_error() {
        warn!("{}: {}", context, e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
    } else {
        error!("{}: {}", context, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("{}: {}", context, e))),
        )
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    let timer = state.start().map_err(|e| timer_error("Failed to start timer", e))?;
    Ok(Json(ApiResponse::ok(format!("{} session running", timer.phase), &timer)))
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    let timer = state.pause().map_err(|e| timer_error("Failed to pause timer", e))?;
    let message = if timer.paused {
        "Timer paused"
    } else {
        "Timer was not running"
    };
    Ok(Json(ApiResponse::ok(message, &timer)))
}

/// Handle POST /skip - Advance to the next phase
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    let timer = state.skip().map_err(|e| timer_error("Failed to skip phase", e))?;
    Ok(Json(ApiResponse::ok(format!("Skipped to {}", timer.phase), &timer)))
}

/// Handle POST /reset - Return to an idle focus phase
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    let timer = state.reset().map_err(|e| timer_error("Failed to reset timer", e))?;
    Ok(Json(ApiResponse::ok("Timer reset", &timer)))
}

/// Handle POST /settings/toggle - Show or hide the settings panel
pub async fn toggle_settings_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    let timer = state
        .toggle_settings()
        .map_err(|e| timer_error("Failed to toggle settings", e))?;
    let message = if timer.settings_visible {
        "Settings shown"
    } else {
        "Settings hidden"
    };
    Ok(Json(ApiResponse::ok(message, &timer)))
}

/// Handle PUT /durations/:phase - Change a phase length in minutes
pub async fn set_duration_handler(
    State(state): State<Arc<AppState>>,
    Path(phase): Path<String>,
    body: Result<Json<DurationRequest>, JsonRejection>,
) -> ApiResult<ApiResponse> {
    let phase: Phase = phase
        .parse()
        .map_err(|e| timer_error("Rejected duration change", e))?;

    let Json(request) = body.map_err(|rejection| {
        warn!("Rejected duration body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "Expected a JSON body like {{\"minutes\": 25}}: {}",
                rejection.body_text()
            ))),
        )
    })?;

    let timer = state
        .set_duration(phase, request.minutes)
        .map_err(|e| timer_error("Rejected duration change", e))?;
    Ok(Json(ApiResponse::ok(
        format!("{} set to {} minutes", phase, request.minutes),
        &timer,
    )))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let timer = state
        .get_timer_state()
        .map_err(|e| timer_error("Failed to get timer state", e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: TimerView::from(&timer),
        ticking: state.has_active_ticker(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream timer snapshots as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.subscribe()).map(|timer| {
        let view = TimerView::from(&timer);
        let event = match Event::default().event("timer").json_data(&view) {
            Ok(event) => event,
            Err(e) => {
                error!("Failed to encode timer event: {}", e);
                Event::default().event("error").data(e.to_string())
            }
        };
        Ok::<_, Infallible>(event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
