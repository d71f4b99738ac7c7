//! Main application state management

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Locale, Utc};
use tokio::{
    sync::{broadcast, watch},
    time::Instant,
};
use tracing::{debug, info, warn};

use super::{
    DurationInput, Notification, SetOutcome, StopwatchSnapshot, StopwatchState, TickOutcome,
    TimerSnapshot, TimerState,
};
use crate::services::{read_clock, AssetCache, ClockReading};

/// Tells a component's ticking task to begin or stop counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    Started,
    Stopped,
}

/// Application state shared by the HTTP handlers and the ticking tasks
#[derive(Debug)]
pub struct AppState {
    /// Countdown timer
    pub timer: Arc<Mutex<TimerState>>,
    /// Stopwatch and its laps
    pub stopwatch: Arc<Mutex<StopwatchState>>,
    /// Run events consumed by the ticking tasks
    pub timer_events: broadcast::Sender<RunEvent>,
    pub stopwatch_events: broadcast::Sender<RunEvent>,
    /// Snapshot channels for the presentation layer
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    pub stopwatch_update_tx: watch::Sender<StopwatchSnapshot>,
    pub clock_tx: watch::Sender<ClockReading>,
    /// Keep the receivers alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
    pub _stopwatch_update_rx: watch::Receiver<StopwatchSnapshot>,
    pub _clock_rx: watch::Receiver<ClockReading>,
    /// Locale used for clock readings
    pub locale: Locale,
    /// Installed offline bundle
    pub assets: AssetCache,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an idle timer at its default duration and
    /// a zeroed stopwatch
    pub fn new(port: u16, host: String, locale: Locale, assets: AssetCache) -> Self {
        let timer = TimerState::new();
        let stopwatch = StopwatchState::new();

        let (timer_events, _) = broadcast::channel(16);
        let (stopwatch_events, _) = broadcast::channel(16);
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.snapshot());
        let (stopwatch_update_tx, stopwatch_update_rx) = watch::channel(stopwatch.snapshot());
        let (clock_tx, clock_rx) = watch::channel(read_clock(locale));

        Self {
            timer: Arc::new(Mutex::new(timer)),
            stopwatch: Arc::new(Mutex::new(stopwatch)),
            timer_events,
            stopwatch_events,
            timer_update_tx,
            stopwatch_update_tx,
            clock_tx,
            _timer_update_rx: timer_update_rx,
            _stopwatch_update_rx: stopwatch_update_rx,
            _clock_rx: clock_rx,
            locale,
            assets,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply a change to the timer under its lock and publish the new snapshot
    fn update_timer<F, R>(&self, updater: F) -> Result<(R, TimerSnapshot), String>
    where
        F: FnOnce(&mut TimerState) -> R,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let result = updater(&mut *timer);
        let snapshot = timer.snapshot();

        // Published under the lock so the channel sees updates in mutation order
        self.timer_update_tx.send_replace(snapshot.clone());
        drop(timer);

        Ok((result, snapshot))
    }

    /// Apply a change to the stopwatch under its lock and publish the new snapshot
    fn update_stopwatch<F, R>(&self, updater: F) -> Result<(R, StopwatchSnapshot), String>
    where
        F: FnOnce(&mut StopwatchState) -> R,
    {
        let mut stopwatch = self.stopwatch.lock()
            .map_err(|e| format!("Failed to lock stopwatch state: {}", e))?;

        let result = updater(&mut *stopwatch);
        let snapshot = stopwatch.snapshot();

        self.stopwatch_update_tx.send_replace(snapshot.clone());
        drop(stopwatch);

        Ok((result, snapshot))
    }

    fn send_timer_event(&self, event: RunEvent) {
        if let Err(e) = self.timer_events.send(event) {
            warn!("Failed to send timer run event {:?}: {}", event, e);
        }
    }

    fn send_stopwatch_event(&self, event: RunEvent) {
        if let Err(e) = self.stopwatch_events.send(event) {
            warn!("Failed to send stopwatch run event {:?}: {}", event, e);
        }
    }

    /// Start the countdown; a no-op if it is already running
    pub fn start_timer(&self) -> Result<TimerSnapshot, String> {
        let (started, snapshot) = self.update_timer(|timer| timer.start())?;
        self.record_action("timer-start");

        if started {
            info!("Timer started at {}", snapshot.display);
            self.send_timer_event(RunEvent::Started);
        } else {
            debug!("Timer already running, start ignored");
        }
        Ok(snapshot)
    }

    /// Pause the countdown, keeping the remaining time
    pub fn pause_timer(&self) -> Result<TimerSnapshot, String> {
        let (was_running, snapshot) = self.update_timer(|timer| timer.pause())?;
        self.record_action("timer-pause");

        if was_running {
            info!("Timer paused at {}", snapshot.display);
            self.send_timer_event(RunEvent::Stopped);
        }
        Ok(snapshot)
    }

    /// Stop the countdown and reload it from the entry fields
    pub fn reset_timer(&self, input: Option<DurationInput>) -> Result<TimerSnapshot, String> {
        let (was_running, snapshot) = self.update_timer(|timer| timer.reset(input))?;
        self.record_action("timer-reset");

        info!("Timer reset to {}", snapshot.display);
        if was_running {
            self.send_timer_event(RunEvent::Stopped);
        }
        Ok(snapshot)
    }

    /// Apply a new countdown duration
    pub fn set_timer(&self, input: DurationInput) -> Result<(SetOutcome, TimerSnapshot), String> {
        let (outcome, snapshot) = self.update_timer(|timer| timer.set_duration(input))?;
        self.record_action("timer-set");

        match outcome {
            SetOutcome::Accepted => info!("Timer set to {}", snapshot.display),
            SetOutcome::Rejected => warn!(
                "Rejected timer duration {}m {}s, using default {}",
                input.minutes, input.seconds, snapshot.display
            ),
        }
        Ok((outcome, snapshot))
    }

    /// Clear the timer's pending notification
    pub fn dismiss_timer_notification(&self) -> Result<(Option<Notification>, TimerSnapshot), String> {
        let (dismissed, snapshot) = self.update_timer(|timer| timer.dismiss())?;
        self.record_action("timer-dismiss");
        Ok((dismissed, snapshot))
    }

    /// Advance the countdown by one second (ticking task only)
    pub fn tick_timer(&self) -> Result<TickOutcome, String> {
        let (outcome, _) = self.update_timer(|timer| timer.tick())?;
        if outcome == TickOutcome::Finished {
            info!("Timer finished");
        }
        Ok(outcome)
    }

    /// Latest published timer snapshot
    pub fn get_timer_snapshot(&self) -> TimerSnapshot {
        self.timer_update_tx.borrow().clone()
    }

    pub fn timer_running(&self) -> Result<bool, String> {
        self.timer.lock()
            .map(|timer| timer.is_running())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Start the stopwatch from its current elapsed value
    pub fn start_stopwatch(&self) -> Result<StopwatchSnapshot, String> {
        let now = Instant::now();
        let (started, snapshot) = self.update_stopwatch(|stopwatch| stopwatch.start(now))?;
        self.record_action("stopwatch-start");

        if started {
            info!("Stopwatch started at {}", snapshot.display);
            self.send_stopwatch_event(RunEvent::Started);
        } else {
            debug!("Stopwatch already running, start ignored");
        }
        Ok(snapshot)
    }

    pub fn pause_stopwatch(&self) -> Result<StopwatchSnapshot, String> {
        let (was_running, snapshot) = self.update_stopwatch(|stopwatch| stopwatch.pause())?;
        self.record_action("stopwatch-pause");

        if was_running {
            info!("Stopwatch paused at {}", snapshot.display);
            self.send_stopwatch_event(RunEvent::Stopped);
        }
        Ok(snapshot)
    }

    /// Zero the stopwatch and clear its laps in one step
    pub fn reset_stopwatch(&self) -> Result<StopwatchSnapshot, String> {
        let (was_running, snapshot) = self.update_stopwatch(|stopwatch| stopwatch.reset())?;
        self.record_action("stopwatch-reset");

        info!("Stopwatch reset");
        if was_running {
            self.send_stopwatch_event(RunEvent::Stopped);
        }
        Ok(snapshot)
    }

    pub fn record_lap(&self) -> Result<StopwatchSnapshot, String> {
        let (lap, snapshot) = self.update_stopwatch(|stopwatch| stopwatch.record_lap())?;
        self.record_action("stopwatch-lap");

        info!("Lap {} recorded at {}s", snapshot.laps.len(), lap);
        Ok(snapshot)
    }

    /// Recompute stopwatch elapsed time as of `now` (ticking task only)
    pub fn tick_stopwatch(&self, now: Instant) -> Result<Option<u64>, String> {
        let (elapsed, _) = self.update_stopwatch(|stopwatch| stopwatch.tick(now))?;
        Ok(elapsed)
    }

    /// Latest published stopwatch snapshot
    pub fn get_stopwatch_snapshot(&self) -> StopwatchSnapshot {
        self.stopwatch_update_tx.borrow().clone()
    }

    pub fn stopwatch_running(&self) -> Result<bool, String> {
        self.stopwatch.lock()
            .map(|stopwatch| stopwatch.is_running())
            .map_err(|e| format!("Failed to lock stopwatch state: {}", e))
    }

    /// Take a fresh wall-clock reading and publish it
    pub fn refresh_clock(&self) -> ClockReading {
        let reading = read_clock(self.locale);
        if let Err(e) = self.clock_tx.send(reading.clone()) {
            warn!("Failed to send clock update: {}", e);
        }
        reading
    }

    /// Latest published clock reading
    pub fn get_clock(&self) -> ClockReading {
        self.clock_tx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::test_support::test_state;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_start_emits_one_event_per_transition() {
        let state = test_state();
        let mut events = state.timer_events.subscribe();

        state.start_timer().unwrap();
        state.start_timer().unwrap();
        state.pause_timer().unwrap();
        state.pause_timer().unwrap();

        assert_eq!(events.try_recv().unwrap(), RunEvent::Started);
        assert_eq!(events.try_recv().unwrap(), RunEvent::Stopped);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_updates_publish_snapshots() {
        let state = test_state();
        let rx = state.timer_update_tx.subscribe();

        state.set_timer(DurationInput::from_fields(1, 5)).unwrap();
        assert_eq!(rx.borrow().display, "01:05");
        assert_eq!(rx.borrow().remaining_seconds, 65);
        let published = rx.borrow().clone();
        assert_eq!(state.get_timer_snapshot(), published);

        state.record_lap().unwrap();
        assert_eq!(state.get_stopwatch_snapshot().laps.len(), 1);
    }

    #[test]
    fn test_snapshot_readers_follow_every_mutation() {
        let state = test_state();
        assert_eq!(state.get_timer_snapshot().remaining_seconds, 1500);

        state.set_timer(DurationInput::from_fields(0, 3)).unwrap();
        state.start_timer().unwrap();
        state.tick_timer().unwrap();
        assert_eq!(state.get_timer_snapshot().remaining_seconds, 2);
        assert!(state.get_timer_snapshot().running);

        state.tick_timer().unwrap();
        state.tick_timer().unwrap();
        let snapshot = state.get_timer_snapshot();
        assert_eq!(snapshot.remaining_seconds, 0);
        assert!(!snapshot.running);
        assert!(snapshot.notification.is_some());
    }

    #[test]
    fn test_rejected_set_keeps_running_flag() {
        let state = test_state();
        state.start_timer().unwrap();

        let (outcome, snapshot) = state.set_timer(DurationInput::from_fields(0, 0)).unwrap();
        assert_eq!(outcome, SetOutcome::Rejected);
        assert_eq!(snapshot.remaining_seconds, 1500);
        assert!(snapshot.running);
        assert!(snapshot.notification.is_some());

        let (dismissed, snapshot) = state.dismiss_timer_notification().unwrap();
        assert!(dismissed.is_some());
        assert!(snapshot.notification.is_none());
    }

    #[test]
    fn test_stopwatch_reset_stops_ticker() {
        let state = test_state();
        let mut events = state.stopwatch_events.subscribe();

        state.start_stopwatch().unwrap();
        state.record_lap().unwrap();
        let snapshot = state.reset_stopwatch().unwrap();

        assert_eq!(events.try_recv().unwrap(), RunEvent::Started);
        assert_eq!(events.try_recv().unwrap(), RunEvent::Stopped);
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert!(!snapshot.running);
        assert!(snapshot.laps.is_empty());
        assert_eq!(state.get_last_action().0.as_deref(), Some("stopwatch-reset"));
    }
}
