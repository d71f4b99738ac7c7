//! Countdown ticking task

use std::sync::Arc;
use tokio::{
    sync::broadcast::error::RecvError,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info, warn};

use super::TICK_PERIOD;
use crate::state::{AppState, RunEvent, TickOutcome};

/// Background task that counts the timer down once per second while it runs
///
/// This is the only tick source for the timer. It idles until a Started
/// event arrives, then ticks until the timer is paused, reset or finishes.
pub async fn timer_ticker_task(state: Arc<AppState>) {
    info!("Starting timer ticker task");

    let mut events = state.timer_events.subscribe();

    loop {
        // Wait until the timer is started
        match events.recv().await {
            Ok(RunEvent::Started) => {}
            Ok(RunEvent::Stopped) => continue,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Timer ticker lagged by {} events, resyncing", skipped);
                if !state.timer_running().unwrap_or(false) {
                    continue;
                }
            }
            Err(RecvError::Closed) => break,
        }

        debug!("Timer ticker running");
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            tokio::select! {
                biased;

                event = events.recv() => {
                    match event {
                        Ok(RunEvent::Stopped) => break,
                        Ok(RunEvent::Started) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Timer ticker lagged by {} events, resyncing", skipped);
                            if !state.timer_running().unwrap_or(false) {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => return,
                    }
                }

                _ = interval.tick() => {
                    match state.tick_timer() {
                        Ok(TickOutcome::Ticked(remaining)) => {
                            debug!("Timer tick, {}s remaining", remaining);
                        }
                        Ok(TickOutcome::Finished) | Ok(TickOutcome::Idle) => break,
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                            break;
                        }
                    }
                }
            }
        }

        debug!("Timer ticker idle");
    }
}
