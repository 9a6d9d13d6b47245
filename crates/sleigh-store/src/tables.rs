//! redb table definitions for the Sleigh Command store.
//!
//! Each table uses `&str` keys (row ids) and `&[u8]` values
//! (JSON-serialized domain types). Ordering and filtering happen at read
//! time; the collections are small.

use redb::TableDefinition;

/// Cities keyed by city id.
pub const CITIES: TableDefinition<&str, &[u8]> = TableDefinition::new("cities");

/// Deliveries keyed by delivery id.
pub const DELIVERIES: TableDefinition<&str, &[u8]> = TableDefinition::new("deliveries");

/// Mission stats; one logical row under a fixed key.
pub const MISSION_STATS: TableDefinition<&str, &[u8]> = TableDefinition::new("mission_stats");

/// Telemetry readings keyed by reading id.
pub const TELEMETRY: TableDefinition<&str, &[u8]> = TableDefinition::new("sleigh_telemetry");

/// Weather conditions keyed by condition id.
pub const WEATHER: TableDefinition<&str, &[u8]> = TableDefinition::new("weather_conditions");

/// Emergencies keyed by emergency id.
pub const EMERGENCIES: TableDefinition<&str, &[u8]> = TableDefinition::new("emergencies");
