//! Domain types for the Sleigh Command mission replica.
//!
//! These mirror the store's row shapes: six collections (cities,
//! deliveries, mission stats, sleigh telemetry, weather conditions,
//! emergencies). Enums serialize to the store's snake_case strings.

use serde::{Deserialize, Serialize};

/// Unique identifier for a city row.
pub type CityId = String;

/// Unique identifier for an emergency row.
pub type EmergencyId = String;

// ── City ──────────────────────────────────────────────────────────

/// A delivery target city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    /// IANA timezone name (e.g. "Asia/Tokyo").
    pub timezone: String,
    /// UTC offset in hours; fractional offsets exist (e.g. 5.5).
    pub timezone_offset: f64,
    /// Delivery ordering weight; higher is visited earlier.
    pub priority_score: u32,
    /// Gifts allocated to this city.
    pub gift_count: u64,
    pub created_at: u64,
}

// ── Delivery ──────────────────────────────────────────────────────

/// Delivery progress for one city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Delivery {
    pub id: String,
    pub city_id: CityId,
    pub status: DeliveryStatus,
    pub scheduled_at: Option<u64>,
    pub completed_at: Option<u64>,
    pub delay_reason: Option<String>,
    pub gifts_delivered: u64,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Lifecycle status of a city delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    InProgress,
    Completed,
    Delayed,
    Skipped,
}

impl DeliveryStatus {
    /// Human-readable label for dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
            Self::Skipped => "Skipped",
        }
    }
}

// ── Sleigh telemetry ──────────────────────────────────────────────

/// A single telemetry reading from the sleigh.
///
/// Only the most recent reading (by `recorded_at`) is retained in the
/// mission replica; the store emits inserts only for this collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleighTelemetry {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_meters: f64,
    pub speed_kmh: f64,
    pub heading_degrees: f64,
    pub current_city_id: Option<CityId>,
    pub next_city_id: Option<CityId>,
    pub reindeer_fatigue_percent: f64,
    pub cargo_weight_kg: f64,
    pub recorded_at: u64,
}

// ── Weather ───────────────────────────────────────────────────────

/// An active or expired weather condition affecting a city or region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherCondition {
    pub id: String,
    pub city_id: Option<CityId>,
    pub region: Option<String>,
    pub condition: WeatherType,
    /// Ordinal severity, 1 (mild) to 5 (extreme).
    pub severity: u8,
    pub wind_speed_kmh: f64,
    pub visibility_km: f64,
    pub speed_reduction_percent: f64,
    pub is_active: bool,
    pub expires_at: Option<u64>,
    pub created_at: u64,
}

/// Weather condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherType {
    Clear,
    Snow,
    Blizzard,
    Fog,
    Wind,
    Storm,
}

impl WeatherType {
    /// Dashboard glyph for this condition.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Snow => "🌨️",
            Self::Blizzard => "❄️",
            Self::Fog => "🌫️",
            Self::Wind => "💨",
            Self::Storm => "⛈️",
        }
    }
}

// ── Emergency ─────────────────────────────────────────────────────

/// An in-flight emergency requiring operator attention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Emergency {
    pub id: EmergencyId,
    pub kind: EmergencyKind,
    pub severity: EmergencySeverity,
    pub title: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_resolved: bool,
    pub resolved_at: Option<u64>,
    pub created_at: u64,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyKind {
    ReindeerFatigue,
    WeatherCritical,
    Mechanical,
    RouteBlocked,
    TimeCritical,
}

/// How urgently it needs attention. Ordered: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencySeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EmergencySeverity {
    /// Human-readable label for dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

// ── Mission stats ─────────────────────────────────────────────────

/// Mission-level totals; one logical row in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionStats {
    pub id: String,
    pub mission_start: Option<u64>,
    pub mission_end: Option<u64>,
    pub total_gifts: u64,
    pub gifts_delivered: u64,
    pub cities_visited: u32,
    pub total_cities: u32,
    pub distance_traveled_km: f64,
    pub current_status: MissionStatus,
    pub updated_at: u64,
}

/// Overall mission phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Preparing,
    InFlight,
    Completed,
    Paused,
    Emergency,
}

impl MissionStatus {
    /// Human-readable label for dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Preparing => "Preparing",
            Self::InFlight => "In Flight",
            Self::Completed => "Completed",
            Self::Paused => "Paused",
            Self::Emergency => "Emergency",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: DeliveryStatus = serde_json::from_str("\"skipped\"").unwrap();
        assert_eq!(parsed, DeliveryStatus::Skipped);
    }

    #[test]
    fn emergency_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&EmergencyKind::WeatherCritical).unwrap(),
            "\"weather_critical\""
        );
    }

    #[test]
    fn severity_ordering() {
        assert!(EmergencySeverity::Critical > EmergencySeverity::High);
        assert!(EmergencySeverity::Medium > EmergencySeverity::Low);
    }

    #[test]
    fn mission_stats_round_trip() {
        let stats = MissionStats {
            id: "stats-1".to_string(),
            mission_start: Some(1000),
            mission_end: None,
            total_gifts: 2_100_000_000,
            gifts_delivered: 0,
            cities_visited: 0,
            total_cities: 60,
            distance_traveled_km: 0.0,
            current_status: MissionStatus::Preparing,
            updated_at: 1000,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"current_status\":\"preparing\""));
        let back: MissionStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
