//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::{CacheSummary, ClockReading},
    state::{DurationInput, StopwatchSnapshot, TimerSnapshot},
};

/// Body of `/timer/set` and `/timer/reset`; missing fields count as zero
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DurationRequest {
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
}

impl From<DurationRequest> for DurationInput {
    fn from(request: DurationRequest) -> Self {
        DurationInput::from_fields(request.minutes, request.seconds)
    }
}

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a new API response
    pub fn new(status: &str, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn running(message: impl Into<String>, data: T) -> Self {
        Self::new("running", message, data)
    }

    pub fn idle(message: impl Into<String>, data: T) -> Self {
        Self::new("idle", message, data)
    }

    /// The request was recovered from rather than applied
    pub fn rejected(message: impl Into<String>, data: T) -> Self {
        Self::new("rejected", message, data)
    }
}

impl ApiResponse<TimerSnapshot> {
    pub fn for_timer(message: impl Into<String>, snapshot: TimerSnapshot) -> Self {
        if snapshot.running {
            Self::running(message, snapshot)
        } else {
            Self::idle(message, snapshot)
        }
    }
}

impl ApiResponse<StopwatchSnapshot> {
    pub fn for_stopwatch(message: impl Into<String>, snapshot: StopwatchSnapshot) -> Self {
        if snapshot.running {
            Self::running(message, snapshot)
        } else {
            Self::idle(message, snapshot)
        }
    }
}

/// Everything at once, for the page's initial render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub clock: ClockReading,
    pub timer: TimerSnapshot,
    pub stopwatch: StopwatchSnapshot,
    pub cache: CacheSummary,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
