//! Stopwatch ticking task

use std::sync::Arc;
use tokio::{
    sync::broadcast::error::RecvError,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info, warn};

use super::TICK_PERIOD;
use crate::state::{AppState, RunEvent};

/// Background task that refreshes the stopwatch once per second while it runs
///
/// Each tick recomputes elapsed time from the run's start instant, so a
/// delayed tick shows the right value instead of falling behind.
pub async fn stopwatch_ticker_task(state: Arc<AppState>) {
    info!("Starting stopwatch ticker task");

    let mut events = state.stopwatch_events.subscribe();

    loop {
        match events.recv().await {
            Ok(RunEvent::Started) => {}
            Ok(RunEvent::Stopped) => continue,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Stopwatch ticker lagged by {} events, resyncing", skipped);
                if !state.stopwatch_running().unwrap_or(false) {
                    continue;
                }
            }
            Err(RecvError::Closed) => break,
        }

        debug!("Stopwatch ticker running");
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            tokio::select! {
                biased;

                event = events.recv() => {
                    match event {
                        Ok(RunEvent::Stopped) => break,
                        Ok(RunEvent::Started) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Stopwatch ticker lagged by {} events, resyncing", skipped);
                            if !state.stopwatch_running().unwrap_or(false) {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => return,
                    }
                }

                _ = interval.tick() => {
                    match state.tick_stopwatch(Instant::now()) {
                        Ok(Some(elapsed)) => debug!("Stopwatch tick, {}s elapsed", elapsed),
                        Ok(None) => break,
                        Err(e) => {
                            error!("Failed to tick stopwatch: {}", e);
                            break;
                        }
                    }
                }
            }
        }

        debug!("Stopwatch ticker idle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::test_support::{test_state, wait_for_subscriber};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time::sleep;

    async fn stopwatch_with_ticker() -> Arc<AppState> {
        let state = Arc::new(test_state());
        tokio::spawn(stopwatch_ticker_task(Arc::clone(&state)));
        wait_for_subscriber(&state.stopwatch_events).await;
        state
    }

    fn elapsed(state: &AppState) -> u64 {
        state.get_stopwatch_snapshot().elapsed_seconds
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_elapsed() {
        let state = stopwatch_with_ticker().await;
        state.start_stopwatch().unwrap();

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(elapsed(&state), 3);

        state.pause_stopwatch().unwrap();
        sleep(Duration::from_secs(10)).await;
        assert_eq!(elapsed(&state), 3);

        state.start_stopwatch().unwrap();
        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(elapsed(&state), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_laps_follow_elapsed_time() {
        let state = stopwatch_with_ticker().await;
        state.start_stopwatch().unwrap();

        sleep(Duration::from_millis(2_500)).await;
        state.record_lap().unwrap();
        sleep(Duration::from_secs(5)).await;
        state.record_lap().unwrap();
        state.pause_stopwatch().unwrap();
        let snapshot = state.record_lap().unwrap();

        let laps: Vec<u64> = snapshot.laps.iter().map(|lap| lap.seconds).collect();
        assert_eq!(laps, vec![2, 7, 7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_tick_source() {
        let state = stopwatch_with_ticker().await;
        state.start_stopwatch().unwrap();
        sleep(Duration::from_millis(1_500)).await;
        state.start_stopwatch().unwrap();

        sleep(Duration::from_secs(2)).await;
        assert_eq!(elapsed(&state), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_running() {
        let state = stopwatch_with_ticker().await;
        state.start_stopwatch().unwrap();
        sleep(Duration::from_millis(4_500)).await;
        state.record_lap().unwrap();

        let snapshot = state.reset_stopwatch().unwrap();
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert!(snapshot.laps.is_empty());

        sleep(Duration::from_secs(3)).await;
        let snapshot = state.get_stopwatch_snapshot();
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert!(!snapshot.running);
    }
}
