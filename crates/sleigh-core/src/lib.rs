//! sleigh-core — domain types for Sleigh Command.
//!
//! The six entity collections tracked by the mission dashboard, their
//! status enums (with the snake_case wire names the store uses), display
//! labels, and the reference city list used by the seed bootstrapper.
//!
//! All types are `Serialize`/`Deserialize`; timestamps are unix seconds.

pub mod seed;
pub mod types;

pub use types::*;

/// Current unix time in seconds.
pub fn epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Format a unix-seconds timestamp for display (UTC, `YYYY-MM-DD HH:MM`).
pub fn format_epoch(secs: u64) -> String {
    chrono::DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
