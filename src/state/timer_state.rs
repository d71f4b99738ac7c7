//! Countdown timer state and its transitions

use serde::{Deserialize, Serialize};

use super::Notification;
use crate::utils::format_duration;

/// Duration used at startup and whenever a requested duration is rejected (25:00)
pub const DEFAULT_DURATION_SECONDS: u64 = 1500;

/// The minutes/seconds entry fields the timer is configured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInput {
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationInput {
    /// Build an input from raw field values, clamping negative fields to zero
    pub fn from_fields(minutes: i64, seconds: i64) -> Self {
        Self {
            minutes: minutes.max(0) as u64,
            seconds: seconds.max(0) as u64,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }
}

impl Default for DurationInput {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_DURATION_SECONDS / 60,
            seconds: DEFAULT_DURATION_SECONDS % 60,
        }
    }
}

/// Result of applying a new duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Accepted,
    /// The duration was not positive and the default was substituted
    Rejected,
}

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Idle,
    /// One second was taken off; carries the remaining seconds
    Ticked(u64),
    /// The countdown reached zero and stopped
    Finished,
}

/// Countdown timer state
#[derive(Debug, Clone)]
pub struct TimerState {
    remaining_seconds: u64,
    running: bool,
    input: DurationInput,
    pending: Option<Notification>,
}

impl TimerState {
    /// Create an idle timer at the default duration
    pub fn new() -> Self {
        Self {
            remaining_seconds: DEFAULT_DURATION_SECONDS,
            running: false,
            input: DurationInput::default(),
            pending: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn input(&self) -> DurationInput {
        self.input
    }

    pub fn pending_notification(&self) -> Option<&Notification> {
        self.pending.as_ref()
    }

    /// Adopt a new duration from the entry fields.
    ///
    /// Does not look at the running flag: setting while running changes the
    /// value the next tick counts down from.
    pub fn set_duration(&mut self, input: DurationInput) -> SetOutcome {
        let total = input.total_seconds();
        if total == 0 {
            self.input = DurationInput::default();
            self.remaining_seconds = DEFAULT_DURATION_SECONDS;
            self.pending = Some(Notification::invalid_duration());
            return SetOutcome::Rejected;
        }

        self.input = input;
        self.remaining_seconds = total;
        SetOutcome::Accepted
    }

    /// Mark the timer running. Returns false if it already was.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting and keep the remaining duration. Returns whether it was running.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Stop counting and reload the remaining duration from the entry fields.
    ///
    /// New field values, when given, replace the stored ones first. A zero
    /// total is kept as is. Returns whether the timer was running.
    pub fn reset(&mut self, input: Option<DurationInput>) -> bool {
        if let Some(input) = input {
            self.input = input;
        }
        self.remaining_seconds = self.input.total_seconds();
        std::mem::replace(&mut self.running, false)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            if self.remaining_seconds > 0 {
                return TickOutcome::Ticked(self.remaining_seconds);
            }
        }

        self.running = false;
        self.pending = Some(Notification::timer_finished());
        TickOutcome::Finished
    }

    /// Take the pending notification, if any
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.take()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.remaining_seconds,
            display: format_duration(self.remaining_seconds),
            running: self.running,
            input: self.input,
            notification: self.pending.clone(),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the timer handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u64,
    pub display: String,
    pub running: bool,
    pub input: DurationInput,
    pub notification: Option<Notification>,
}
