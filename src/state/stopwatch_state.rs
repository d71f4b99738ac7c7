//! Stopwatch state with lap recording

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::utils::format_duration;

/// Where the current run started from
#[derive(Debug, Clone, Copy)]
struct RunAnchor {
    started_at: Instant,
    base_seconds: u64,
}

/// Stopwatch state
///
/// While running, elapsed time is recomputed on every tick from the run
/// anchor, so late or dropped ticks never accumulate as drift.
#[derive(Debug, Clone, Default)]
pub struct StopwatchState {
    elapsed_seconds: u64,
    anchor: Option<RunAnchor>,
    laps: Vec<u64>,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    /// Start a run at `now`. Returns false if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.anchor.is_some() {
            return false;
        }
        self.anchor = Some(RunAnchor {
            started_at: now,
            base_seconds: self.elapsed_seconds,
        });
        true
    }

    /// Stop the run. Elapsed stays at the last ticked value.
    pub fn pause(&mut self) -> bool {
        self.anchor.take().is_some()
    }

    /// Zero elapsed time and drop every lap. Returns whether it was running.
    pub fn reset(&mut self) -> bool {
        self.elapsed_seconds = 0;
        self.laps.clear();
        self.anchor.take().is_some()
    }

    /// Recompute elapsed seconds as of `now`. Returns None when not running.
    pub fn tick(&mut self, now: Instant) -> Option<u64> {
        let anchor = self.anchor?;
        let run = now.saturating_duration_since(anchor.started_at).as_secs();
        self.elapsed_seconds = anchor.base_seconds.saturating_add(run);
        Some(self.elapsed_seconds)
    }

    /// Append the current elapsed value, running or not
    pub fn record_lap(&mut self) -> u64 {
        self.laps.push(self.elapsed_seconds);
        self.elapsed_seconds
    }

    pub fn snapshot(&self) -> StopwatchSnapshot {
        StopwatchSnapshot {
            elapsed_seconds: self.elapsed_seconds,
            display: format_duration(self.elapsed_seconds),
            running: self.is_running(),
            laps: self
                .laps
                .iter()
                .enumerate()
                .map(|(i, &seconds)| Lap {
                    number: i + 1,
                    seconds,
                    display: format_duration(seconds),
                })
                .collect(),
        }
    }
}

/// One recorded lap, numbered from 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    pub number: usize,
    pub seconds: u64,
    pub display: String,
}

/// Point-in-time view of the stopwatch handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopwatchSnapshot {
    pub elapsed_seconds: u64,
    pub display: String,
    pub running: bool,
    pub laps: Vec<Lap>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        assert!(sw.start(t0));

        for n in 1..=3 {
            sw.tick(t0 + secs(n));
        }
        assert_eq!(sw.elapsed_seconds(), 3);

        assert!(sw.pause());
        assert_eq!(sw.tick(t0 + secs(60)), None);
        assert_eq!(sw.elapsed_seconds(), 3);

        // Resuming continues from the frozen value, not from wall time
        sw.start(t0 + secs(100));
        sw.tick(t0 + secs(102));
        assert_eq!(sw.elapsed_seconds(), 5);
    }

    #[test]
    fn test_tick_recomputes_from_anchor() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.start(t0);

        // A late tick catches up instead of adding one second
        assert_eq!(sw.tick(t0 + Duration::from_millis(4_900)), Some(4));
        assert_eq!(sw.tick(t0 + Duration::from_millis(5_100)), Some(5));
    }

    #[test]
    fn test_laps_keep_order_and_duplicates() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.start(t0);

        sw.tick(t0 + secs(2));
        sw.record_lap();
        sw.tick(t0 + secs(7));
        sw.record_lap();
        assert_eq!(sw.laps(), &[2, 7]);

        sw.pause();
        assert_eq!(sw.record_lap(), 7);
        assert_eq!(sw.laps(), &[2, 7, 7]);

        let snapshot = sw.snapshot();
        assert_eq!(snapshot.laps[2], Lap { number: 3, seconds: 7, display: "00:07".to_string() });
    }

    #[test]
    fn test_reset_clears_everything() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.start(t0);
        sw.tick(t0 + secs(4));
        sw.record_lap();

        assert!(sw.reset());
        let snapshot = sw.snapshot();
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert!(!snapshot.running);
        assert!(snapshot.laps.is_empty());

        // A stale tick after reset changes nothing
        assert_eq!(sw.tick(t0 + secs(9)), None);
        assert_eq!(sw.elapsed_seconds(), 0);
    }

    #[test]
    fn test_start_and_pause_are_idempotent() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        assert!(sw.start(t0));
        assert!(!sw.start(t0 + secs(5)));

        // The second start did not move the anchor
        assert_eq!(sw.tick(t0 + secs(6)), Some(6));

        assert!(sw.pause());
        assert!(!sw.pause());
    }
}
