//! Chronodeck - A clock, countdown timer and stopwatch web widget
//!
//! This library provides the timekeeping state machines, the background
//! tasks that tick them, the JSON API that drives them and the offline
//! cache that serves the widget's page.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
