//! HTTP API module
//!
//! JSON endpoints for the clock, timer and stopwatch, plus the offline
//! bundle served for every other path.

pub mod assets;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use assets::asset_handler;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/clock", get(clock_handler))
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/pause", post(timer_pause_handler))
        .route("/timer/reset", post(timer_reset_handler))
        .route("/timer/set", post(timer_set_handler))
        .route("/timer/notification", delete(timer_dismiss_handler))
        .route("/stopwatch", get(stopwatch_handler))
        .route("/stopwatch/start", post(stopwatch_start_handler))
        .route("/stopwatch/pause", post(stopwatch_pause_handler))
        .route("/stopwatch/reset", post(stopwatch_reset_handler))
        .route("/stopwatch/lap", post(stopwatch_lap_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .fallback(asset_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
