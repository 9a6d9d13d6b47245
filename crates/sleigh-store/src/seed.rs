//! Seed bootstrapper — populates demo data on first run.
//!
//! When the cities table is empty, the reference city list becomes store
//! rows: one city and one pending delivery per entry, the mission-stats
//! singleton, an initial telemetry reading at the North Pole, and a few
//! active weather fronts. A non-empty store is left untouched.

use tracing::info;

use sleigh_core::seed::{SEED_CITIES, SLEIGH_CAPACITY_KG, TOTAL_GIFTS};
use sleigh_core::{
    City, Delivery, DeliveryStatus, MissionStats, MissionStatus, SleighTelemetry,
    WeatherCondition, WeatherType, epoch_secs,
};

use crate::error::StoreResult;
use crate::store::SleighStore;

/// Fixed id of the mission-stats singleton.
pub const MISSION_STATS_ID: &str = "mission-1";

/// Seed demo data if the store is empty. Returns `true` when seeding ran.
pub fn seed_if_empty(store: &SleighStore) -> StoreResult<bool> {
    if store.city_count()? > 0 {
        return Ok(false);
    }

    let now = epoch_secs();

    for (index, entry) in SEED_CITIES.iter().enumerate() {
        let city_id = format!("city-{:03}", index + 1);
        // Rank-based priority: the largest city scores highest, and the
        // scores stay distinct so the snapshot order is deterministic.
        let priority_score = 100 - index as u32;
        store.put_city(&City {
            id: city_id.clone(),
            name: entry.name.to_string(),
            country: entry.country.to_string(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            population: entry.population,
            timezone: entry.timezone.to_string(),
            timezone_offset: entry.timezone_offset,
            priority_score,
            gift_count: entry.population / 3,
            created_at: now,
        })?;

        store.insert_delivery(&Delivery {
            id: format!("delivery-{:03}", index + 1),
            city_id,
            status: DeliveryStatus::Pending,
            scheduled_at: Some(now + (index as u64) * 60),
            completed_at: None,
            delay_reason: None,
            gifts_delivered: 0,
            created_at: now,
            updated_at: now,
        })?;
    }

    store.put_mission_stats(&MissionStats {
        id: MISSION_STATS_ID.to_string(),
        mission_start: Some(now),
        mission_end: None,
        total_gifts: TOTAL_GIFTS,
        gifts_delivered: 0,
        cities_visited: 0,
        total_cities: SEED_CITIES.len() as u32,
        distance_traveled_km: 0.0,
        current_status: MissionStatus::Preparing,
        updated_at: now,
    })?;

    // The sleigh starts loaded at the North Pole.
    store.insert_telemetry(&SleighTelemetry {
        id: "telemetry-000001".to_string(),
        latitude: 90.0,
        longitude: 0.0,
        altitude_meters: 0.0,
        speed_kmh: 0.0,
        heading_degrees: 180.0,
        current_city_id: None,
        next_city_id: Some("city-001".to_string()),
        reindeer_fatigue_percent: 0.0,
        cargo_weight_kg: SLEIGH_CAPACITY_KG,
        recorded_at: now,
    })?;

    for (id, region, condition, severity) in [
        ("weather-001", "Siberia", WeatherType::Blizzard, 4),
        ("weather-002", "North Atlantic", WeatherType::Storm, 3),
        ("weather-003", "Northern Europe", WeatherType::Fog, 2),
    ] {
        store.put_weather(&WeatherCondition {
            id: id.to_string(),
            city_id: None,
            region: Some(region.to_string()),
            condition,
            severity,
            wind_speed_kmh: 20.0 * severity as f64,
            visibility_km: (10.0 - 2.0 * severity as f64).max(0.5),
            speed_reduction_percent: 10.0 * severity as f64,
            is_active: true,
            expires_at: Some(now + 6 * 3600),
            created_at: now,
        })?;
    }

    info!(cities = SEED_CITIES.len(), "seeded demo mission data");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StoreClient;

    #[tokio::test]
    async fn seeds_empty_store() {
        let store = SleighStore::open_in_memory().unwrap();
        assert!(seed_if_empty(&store).unwrap());

        let cities = store.list_cities().await.unwrap();
        assert_eq!(cities.len(), SEED_CITIES.len());
        // Priority order matches the reference list order.
        assert_eq!(cities[0].name, "Tokyo");

        let deliveries = store.list_deliveries().await.unwrap();
        assert_eq!(deliveries.len(), SEED_CITIES.len());
        assert!(
            deliveries
                .iter()
                .all(|d| d.status == DeliveryStatus::Pending)
        );

        let stats = store.mission_stats().await.unwrap().unwrap();
        assert_eq!(stats.total_cities, SEED_CITIES.len() as u32);
        assert_eq!(stats.current_status, MissionStatus::Preparing);

        assert!(store.latest_telemetry().await.unwrap().is_some());
        assert_eq!(store.active_weather().await.unwrap().len(), 3);
        assert!(store.unresolved_emergencies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_seed_is_a_no_op() {
        let store = SleighStore::open_in_memory().unwrap();
        assert!(seed_if_empty(&store).unwrap());
        assert!(!seed_if_empty(&store).unwrap());

        let deliveries = store.list_deliveries().await.unwrap();
        assert_eq!(deliveries.len(), SEED_CITIES.len());
    }
}
