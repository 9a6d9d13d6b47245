//! View types for API responses.
//!
//! Purpose-built for dashboards: rows carry pre-formatted display
//! strings and resolved city names so clients stay simple. Every view
//! is a pure function of the aggregator's read model; absent singletons
//! (stats, telemetry) render a defined fallback.

use serde::Serialize;

use sleigh_core::seed::REINDEER_NAMES;
use sleigh_core::{DeliveryStatus, format_epoch};
use sleigh_mission::MissionSnapshot;

// ── Overview ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OverviewView {
    pub mission_status: String,
    pub total_gifts: u64,
    pub gifts_delivered: u64,
    pub completion_percent: String,
    pub cities_visited: u32,
    pub total_cities: u32,
    pub distance_traveled_km: String,
    pub deliveries: DeliveryCounts,
    pub active_emergencies: usize,
    pub active_weather_fronts: usize,
    pub sleigh: Option<SleighSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct DeliveryCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub delayed: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct SleighSummary {
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: f64,
    pub current_city: Option<String>,
    pub next_city: Option<String>,
}

impl OverviewView {
    pub fn build(snapshot: &MissionSnapshot) -> Self {
        let mut counts = DeliveryCounts::default();
        for delivery in &snapshot.deliveries {
            match delivery.status {
                DeliveryStatus::Pending => counts.pending += 1,
                DeliveryStatus::InProgress => counts.in_progress += 1,
                DeliveryStatus::Completed => counts.completed += 1,
                DeliveryStatus::Delayed => counts.delayed += 1,
                DeliveryStatus::Skipped => counts.skipped += 1,
            }
        }

        let (status, total, delivered, visited, total_cities, distance) = match &snapshot.stats {
            Some(stats) => (
                stats.current_status.label().to_string(),
                stats.total_gifts,
                stats.gifts_delivered,
                stats.cities_visited,
                stats.total_cities,
                stats.distance_traveled_km,
            ),
            None => ("Unknown".to_string(), 0, 0, 0, 0, 0.0),
        };
        let completion = if total > 0 {
            delivered as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let sleigh = snapshot.telemetry.as_ref().map(|t| SleighSummary {
            latitude: t.latitude,
            longitude: t.longitude,
            speed_kmh: t.speed_kmh,
            current_city: city_name(snapshot, t.current_city_id.as_deref()),
            next_city: city_name(snapshot, t.next_city_id.as_deref()),
        });

        Self {
            mission_status: status,
            total_gifts: total,
            gifts_delivered: delivered,
            completion_percent: format!("{completion:.1}"),
            cities_visited: visited,
            total_cities,
            distance_traveled_km: format!("{distance:.0}"),
            deliveries: counts,
            active_emergencies: snapshot.emergencies.len(),
            active_weather_fronts: snapshot.weather.len(),
            sleigh,
            loading: snapshot.loading,
            error: snapshot.error.clone(),
        }
    }
}

// ── Cities ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CityRow {
    pub id: String,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    pub priority_score: u32,
    pub gift_count: u64,
    pub delivery_status: Option<&'static str>,
}

impl CityRow {
    pub fn build(snapshot: &MissionSnapshot) -> Vec<Self> {
        snapshot
            .cities
            .iter()
            .map(|c| Self {
                id: c.id.clone(),
                name: c.name.clone(),
                country: c.country.clone(),
                latitude: c.latitude,
                longitude: c.longitude,
                population: c.population,
                priority_score: c.priority_score,
                gift_count: c.gift_count,
                delivery_status: snapshot
                    .delivery_status_by_city
                    .get(&c.id)
                    .map(|s| s.label()),
            })
            .collect()
    }
}

// ── Deliveries ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeliveryRow {
    pub id: String,
    pub city: String,
    pub country: String,
    pub status: &'static str,
    pub gifts_delivered: u64,
    pub scheduled: String,
    pub completed: String,
    pub delay_reason: Option<String>,
}

impl DeliveryRow {
    pub fn build(snapshot: &MissionSnapshot) -> Vec<Self> {
        snapshot
            .deliveries
            .iter()
            .map(|d| {
                let city = snapshot.city_by_id.get(&d.city_id);
                Self {
                    id: d.id.clone(),
                    city: city.map_or_else(|| "Unknown".to_string(), |c| c.name.clone()),
                    country: city.map_or_else(String::new, |c| c.country.clone()),
                    status: d.status.label(),
                    gifts_delivered: d.gifts_delivered,
                    scheduled: d.scheduled_at.map(format_epoch).unwrap_or_else(|| "-".into()),
                    completed: d.completed_at.map(format_epoch).unwrap_or_else(|| "-".into()),
                    delay_reason: d.delay_reason.clone(),
                }
            })
            .collect()
    }
}

// ── Fleet ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FleetView {
    pub tracking: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: String,
    pub speed: String,
    pub heading_degrees: f64,
    pub fatigue_percent: String,
    pub fatigue_level: &'static str,
    pub cargo: String,
    pub current_city: Option<String>,
    pub next_city: Option<String>,
    pub recorded: String,
    pub reindeer: [&'static str; 9],
}

impl FleetView {
    pub fn build(snapshot: &MissionSnapshot) -> Self {
        match &snapshot.telemetry {
            Some(t) => Self {
                tracking: true,
                latitude: t.latitude,
                longitude: t.longitude,
                altitude: format!("{:.0} m", t.altitude_meters),
                speed: format!("{:.0} km/h", t.speed_kmh),
                heading_degrees: t.heading_degrees,
                fatigue_percent: format!("{:.0}", t.reindeer_fatigue_percent),
                fatigue_level: fatigue_level(t.reindeer_fatigue_percent),
                cargo: format!("{:.0} kg", t.cargo_weight_kg),
                current_city: city_name(snapshot, t.current_city_id.as_deref()),
                next_city: city_name(snapshot, t.next_city_id.as_deref()),
                recorded: format_epoch(t.recorded_at),
                reindeer: REINDEER_NAMES,
            },
            None => Self {
                tracking: false,
                latitude: 0.0,
                longitude: 0.0,
                altitude: "-".to_string(),
                speed: "-".to_string(),
                heading_degrees: 0.0,
                fatigue_percent: "-".to_string(),
                fatigue_level: "unknown",
                cargo: "-".to_string(),
                current_city: None,
                next_city: None,
                recorded: "-".to_string(),
                reindeer: REINDEER_NAMES,
            },
        }
    }
}

fn fatigue_level(percent: f64) -> &'static str {
    if percent >= 80.0 {
        "critical"
    } else if percent >= 50.0 {
        "elevated"
    } else {
        "nominal"
    }
}

// ── Weather ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct WeatherRow {
    pub id: String,
    pub place: String,
    pub condition: &'static str,
    pub severity: u8,
    pub wind: String,
    pub visibility: String,
    pub speed_reduction: String,
    pub expires: String,
}

impl WeatherRow {
    pub fn build(snapshot: &MissionSnapshot) -> Vec<Self> {
        let mut rows: Vec<Self> = snapshot
            .weather
            .iter()
            .map(|w| {
                let place = w
                    .city_id
                    .as_deref()
                    .and_then(|id| snapshot.city_by_id.get(id))
                    .map(|c| c.name.clone())
                    .or_else(|| w.region.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                Self {
                    id: w.id.clone(),
                    place,
                    condition: w.condition.glyph(),
                    severity: w.severity,
                    wind: format!("{:.0} km/h", w.wind_speed_kmh),
                    visibility: format!("{:.1} km", w.visibility_km),
                    speed_reduction: format!("{:.0}%", w.speed_reduction_percent),
                    expires: w.expires_at.map(format_epoch).unwrap_or_else(|| "-".into()),
                }
            })
            .collect();
        // Worst fronts first.
        rows.sort_by(|a, b| b.severity.cmp(&a.severity));
        rows
    }
}

// ── Emergencies ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EmergencyRow {
    pub id: String,
    pub severity: &'static str,
    pub title: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub raised: String,
}

impl EmergencyRow {
    pub fn build(snapshot: &MissionSnapshot) -> Vec<Self> {
        let mut emergencies: Vec<_> = snapshot.emergencies.iter().collect();
        // Most severe first, newest first within a severity.
        emergencies.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(b.created_at.cmp(&a.created_at))
        });
        emergencies
            .into_iter()
            .map(|e| Self {
                id: e.id.clone(),
                severity: e.severity.label(),
                title: e.title.clone(),
                description: e.description.clone(),
                latitude: e.latitude,
                longitude: e.longitude,
                raised: format_epoch(e.created_at),
            })
            .collect()
    }
}

// ── Analytics ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyticsView {
    pub completion_percent: String,
    pub countries: Vec<CountryRow>,
}

#[derive(Debug, Serialize)]
pub struct CountryRow {
    pub country: String,
    pub cities: usize,
    pub deliveries_completed: usize,
    pub gifts_delivered: u64,
}

impl AnalyticsView {
    pub fn build(snapshot: &MissionSnapshot) -> Self {
        let mut by_country: std::collections::BTreeMap<String, CountryRow> =
            std::collections::BTreeMap::new();
        for city in &snapshot.cities {
            let row = by_country
                .entry(city.country.clone())
                .or_insert_with(|| CountryRow {
                    country: city.country.clone(),
                    cities: 0,
                    deliveries_completed: 0,
                    gifts_delivered: 0,
                });
            row.cities += 1;
        }
        for delivery in &snapshot.deliveries {
            let Some(city) = snapshot.city_by_id.get(&delivery.city_id) else {
                continue;
            };
            if let Some(row) = by_country.get_mut(&city.country) {
                row.gifts_delivered += delivery.gifts_delivered;
                if delivery.status == DeliveryStatus::Completed {
                    row.deliveries_completed += 1;
                }
            }
        }

        let completion = match &snapshot.stats {
            Some(s) if s.total_gifts > 0 => {
                s.gifts_delivered as f64 / s.total_gifts as f64 * 100.0
            }
            _ => 0.0,
        };

        Self {
            completion_percent: format!("{completion:.1}"),
            countries: by_country.into_values().collect(),
        }
    }
}

fn city_name(snapshot: &MissionSnapshot, id: Option<&str>) -> Option<String> {
    id.and_then(|id| snapshot.city_by_id.get(id))
        .map(|c| c.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use sleigh_core::{City, Delivery, MissionStats, MissionStatus};

    fn empty_snapshot() -> MissionSnapshot {
        MissionSnapshot {
            cities: vec![],
            deliveries: vec![],
            stats: None,
            telemetry: None,
            weather: vec![],
            emergencies: vec![],
            city_by_id: HashMap::new(),
            delivery_status_by_city: HashMap::new(),
            loading: false,
            error: None,
        }
    }

    fn city(id: &str, name: &str, country: &str) -> City {
        City {
            id: id.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            population: 1_000_000,
            timezone: "UTC".to_string(),
            timezone_offset: 0.0,
            priority_score: 50,
            gift_count: 1000,
            created_at: 1000,
        }
    }

    fn delivery(id: &str, city_id: &str, status: DeliveryStatus, gifts: u64) -> Delivery {
        Delivery {
            id: id.to_string(),
            city_id: city_id.to_string(),
            status,
            scheduled_at: None,
            completed_at: None,
            delay_reason: None,
            gifts_delivered: gifts,
            created_at: 1000,
            updated_at: 1000,
        }
    }

    #[test]
    fn overview_with_absent_singletons_renders_fallback() {
        let view = OverviewView::build(&empty_snapshot());
        assert_eq!(view.mission_status, "Unknown");
        assert_eq!(view.completion_percent, "0.0");
        assert!(view.sleigh.is_none());
    }

    #[test]
    fn overview_counts_deliveries_by_status() {
        let mut snapshot = empty_snapshot();
        snapshot.deliveries = vec![
            delivery("d1", "c1", DeliveryStatus::Pending, 0),
            delivery("d2", "c2", DeliveryStatus::Completed, 100),
            delivery("d3", "c3", DeliveryStatus::Completed, 200),
            delivery("d4", "c4", DeliveryStatus::Delayed, 0),
        ];
        snapshot.stats = Some(MissionStats {
            id: "stats-1".to_string(),
            mission_start: Some(1000),
            mission_end: None,
            total_gifts: 1000,
            gifts_delivered: 300,
            cities_visited: 2,
            total_cities: 4,
            distance_traveled_km: 1234.5,
            current_status: MissionStatus::InFlight,
            updated_at: 2000,
        });

        let view = OverviewView::build(&snapshot);
        assert_eq!(view.deliveries.pending, 1);
        assert_eq!(view.deliveries.completed, 2);
        assert_eq!(view.deliveries.delayed, 1);
        assert_eq!(view.mission_status, "In Flight");
        assert_eq!(view.completion_percent, "30.0");
    }

    #[test]
    fn delivery_rows_resolve_city_names() {
        let mut snapshot = empty_snapshot();
        let tokyo = city("c1", "Tokyo", "Japan");
        snapshot.city_by_id.insert("c1".to_string(), tokyo);
        snapshot.deliveries = vec![
            delivery("d1", "c1", DeliveryStatus::InProgress, 0),
            delivery("d2", "c-unknown", DeliveryStatus::Pending, 0),
        ];

        let rows = DeliveryRow::build(&snapshot);
        assert_eq!(rows[0].city, "Tokyo");
        assert_eq!(rows[0].status, "In Progress");
        assert_eq!(rows[1].city, "Unknown");
    }

    #[test]
    fn fleet_view_without_telemetry_is_not_tracking() {
        let view = FleetView::build(&empty_snapshot());
        assert!(!view.tracking);
        assert_eq!(view.speed, "-");
        assert_eq!(view.reindeer[8], "Rudolph");
    }

    #[test]
    fn analytics_rolls_up_by_country() {
        let mut snapshot = empty_snapshot();
        let c1 = city("c1", "Tokyo", "Japan");
        let c2 = city("c2", "Osaka", "Japan");
        let c3 = city("c3", "Paris", "France");
        for c in [&c1, &c2, &c3] {
            snapshot.city_by_id.insert(c.id.clone(), c.clone());
        }
        snapshot.cities = vec![c1, c2, c3];
        snapshot.deliveries = vec![
            delivery("d1", "c1", DeliveryStatus::Completed, 500),
            delivery("d2", "c2", DeliveryStatus::Pending, 0),
            delivery("d3", "c3", DeliveryStatus::Completed, 300),
        ];

        let view = AnalyticsView::build(&snapshot);
        assert_eq!(view.countries.len(), 2);
        let japan = view.countries.iter().find(|r| r.country == "Japan").unwrap();
        assert_eq!(japan.cities, 2);
        assert_eq!(japan.deliveries_completed, 1);
        assert_eq!(japan.gifts_delivered, 500);
    }
}
