//! Wall-clock refresh task

use std::sync::Arc;
use tokio::time::interval;
use tracing::{debug, info};

use super::TICK_PERIOD;
use crate::state::AppState;

/// Background task that publishes a fresh clock reading every second
pub async fn clock_ticker_task(state: Arc<AppState>) {
    info!("Starting clock ticker task");

    let mut interval = interval(TICK_PERIOD);

    loop {
        interval.tick().await;
        let reading = state.refresh_clock();
        debug!("Clock refreshed: {} {}", reading.date, reading.time);
    }
}
