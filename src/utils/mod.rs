//! Utility functions module
//!
//! Display formatting shared by the timer and stopwatch, and shutdown
//! signal handling.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::format_duration;
pub use signals::shutdown_signal;
