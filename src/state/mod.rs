//! State management module
//!
//! The countdown timer and stopwatch state machines, the notifications they
//! raise, and the shared application state that owns them.

pub mod app_state;
pub mod notification;
pub mod stopwatch_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, RunEvent};
pub use notification::{Notification, NotificationKind};
pub use stopwatch_state::{Lap, StopwatchSnapshot, StopwatchState};
pub use timer_state::{
    DurationInput, SetOutcome, TickOutcome, TimerSnapshot, TimerState, DEFAULT_DURATION_SECONDS,
};
