//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info, warn};

use crate::{
    services::ClockReading,
    state::{AppState, SetOutcome, StopwatchSnapshot, TimerSnapshot},
};
use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

type TimerResult = Result<Json<ApiResponse<TimerSnapshot>>, StatusCode>;
type StopwatchResult = Result<Json<ApiResponse<StopwatchSnapshot>>, StatusCode>;

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("{}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle GET /clock - Latest wall-clock reading
pub async fn clock_handler(State(state): State<Arc<AppState>>) -> Json<ClockReading> {
    Json(state.get_clock())
}

/// Handle GET /timer - Current timer snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Json<TimerSnapshot> {
    Json(state.get_timer_snapshot())
}

/// Handle POST /timer/start - Start the countdown
pub async fn timer_start_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    match state.start_timer() {
        Ok(snapshot) => {
            debug!("Timer start endpoint called");
            Ok(Json(ApiResponse::for_timer("Timer started", snapshot)))
        }
        Err(e) => Err(internal_error("Failed to start timer", e)),
    }
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn timer_pause_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    match state.pause_timer() {
        Ok(snapshot) => {
            debug!("Timer pause endpoint called");
            Ok(Json(ApiResponse::for_timer("Timer paused", snapshot)))
        }
        Err(e) => Err(internal_error("Failed to pause timer", e)),
    }
}

/// Handle POST /timer/reset - Stop and reload from the entry fields
///
/// An optional `{minutes, seconds}` body replaces the stored fields first.
/// An empty body keeps them; a body that is not a valid request is refused
/// the same way `/timer/set` refuses it.
pub async fn timer_reset_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> TimerResult {
    let input = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        match Json::<DurationRequest>::from_bytes(&body) {
            Ok(Json(request)) => Some(request.into()),
            Err(rejection) => {
                warn!("Timer reset endpoint refused body: {}", rejection.body_text());
                return Err(rejection.status());
            }
        }
    };

    match state.reset_timer(input) {
        Ok(snapshot) => {
            debug!("Timer reset endpoint called");
            Ok(Json(ApiResponse::for_timer("Timer reset", snapshot)))
        }
        Err(e) => Err(internal_error("Failed to reset timer", e)),
    }
}

/// Handle POST /timer/set - Apply a new countdown duration
pub async fn timer_set_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> TimerResult {
    match state.set_timer(request.into()) {
        Ok((SetOutcome::Accepted, snapshot)) => {
            Ok(Json(ApiResponse::for_timer("Timer duration set", snapshot)))
        }
        Ok((SetOutcome::Rejected, snapshot)) => {
            info!(
                "Timer set endpoint rejected {}m {}s",
                request.minutes, request.seconds
            );
            Ok(Json(ApiResponse::rejected(
                "Invalid timer duration, default restored",
                snapshot,
            )))
        }
        Err(e) => Err(internal_error("Failed to set timer", e)),
    }
}

/// Handle DELETE /timer/notification - Dismiss the pending notification
pub async fn timer_dismiss_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    match state.dismiss_timer_notification() {
        Ok((Some(notification), snapshot)) => Ok(Json(ApiResponse::for_timer(
            format!("Dismissed: {}", notification.message),
            snapshot,
        ))),
        Ok((None, snapshot)) => Ok(Json(ApiResponse::for_timer(
            "No pending notification",
            snapshot,
        ))),
        Err(e) => Err(internal_error("Failed to dismiss timer notification", e)),
    }
}

/// Handle GET /stopwatch - Current stopwatch snapshot with laps
pub async fn stopwatch_handler(State(state): State<Arc<AppState>>) -> Json<StopwatchSnapshot> {
    Json(state.get_stopwatch_snapshot())
}

/// Handle POST /stopwatch/start - Start or resume the stopwatch
pub async fn stopwatch_start_handler(State(state): State<Arc<AppState>>) -> StopwatchResult {
    match state.start_stopwatch() {
        Ok(snapshot) => Ok(Json(ApiResponse::for_stopwatch("Stopwatch started", snapshot))),
        Err(e) => Err(internal_error("Failed to start stopwatch", e)),
    }
}

/// Handle POST /stopwatch/pause - Pause the stopwatch
pub async fn stopwatch_pause_handler(State(state): State<Arc<AppState>>) -> StopwatchResult {
    match state.pause_stopwatch() {
        Ok(snapshot) => Ok(Json(ApiResponse::for_stopwatch("Stopwatch paused", snapshot))),
        Err(e) => Err(internal_error("Failed to pause stopwatch", e)),
    }
}

/// Handle POST /stopwatch/reset - Zero the stopwatch and clear laps
pub async fn stopwatch_reset_handler(State(state): State<Arc<AppState>>) -> StopwatchResult {
    match state.reset_stopwatch() {
        Ok(snapshot) => Ok(Json(ApiResponse::for_stopwatch("Stopwatch reset", snapshot))),
        Err(e) => Err(internal_error("Failed to reset stopwatch", e)),
    }
}

/// Handle POST /stopwatch/lap - Record a lap at the current elapsed time
pub async fn stopwatch_lap_handler(State(state): State<Arc<AppState>>) -> StopwatchResult {
    match state.record_lap() {
        Ok(snapshot) => {
            let message = format!("Lap {} recorded", snapshot.laps.len());
            Ok(Json(ApiResponse::for_stopwatch(message, snapshot)))
        }
        Err(e) => Err(internal_error("Failed to record lap", e)),
    }
}

/// Handle GET /status - Return the state of every component
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        clock: state.get_clock(),
        timer: state.get_timer_snapshot(),
        stopwatch: state.get_stopwatch_snapshot(),
        cache: state.assets.summary(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
