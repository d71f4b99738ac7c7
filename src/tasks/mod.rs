//! Background tasks module
//!
//! One ticking task per component runs alongside the HTTP server.

pub mod clock_ticker;
pub mod stopwatch_ticker;
pub mod timer_ticker;

use std::time::Duration;

// Re-export main functions
pub use clock_ticker::clock_ticker_task;
pub use stopwatch_ticker::stopwatch_ticker_task;
pub use timer_ticker::timer_ticker_task;

/// Interval between ticks for every component
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[cfg(test)]
pub(crate) mod test_support {
    use tokio::sync::broadcast;

    use crate::{
        services::{parse_locale, AssetCache},
        state::AppState,
    };

    pub fn test_state() -> AppState {
        AppState::new(
            0,
            "127.0.0.1".to_string(),
            parse_locale("en_US").unwrap(),
            AssetCache::empty("web"),
        )
    }

    /// Yield until a spawned ticker has subscribed to its run events
    pub async fn wait_for_subscriber<T: Clone>(events: &broadcast::Sender<T>) {
        while events.receiver_count() == 0 {
            tokio::task::yield_now().await;
        }
    }
}
