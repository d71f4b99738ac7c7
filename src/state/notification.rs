//! Pending user notifications raised by the countdown timer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The countdown reached zero on its own
    TimerFinished,
    /// A duration of zero seconds or less was requested
    InvalidDuration,
}

impl NotificationKind {
    pub fn message(&self) -> &'static str {
        match self {
            NotificationKind::TimerFinished => "Timer finished!",
            NotificationKind::InvalidDuration => "Invalid timer duration",
        }
    }
}

/// A notification waiting to be shown and dismissed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            raised_at: Utc::now(),
        }
    }

    pub fn timer_finished() -> Self {
        Self::new(NotificationKind::TimerFinished)
    }

    pub fn invalid_duration() -> Self {
        Self::new(NotificationKind::InvalidDuration)
    }
}
