//! Host-facing services
//!
//! Wall-clock readings for the clock view and the offline asset cache that
//! serves the widget bundle.

pub mod asset_cache;
pub mod clock;

// Re-export main types
pub use asset_cache::{AssetCache, CacheSummary, ASSET_MANIFEST, CACHE_NAME};
pub use clock::{parse_locale, read_clock, ClockReading};
