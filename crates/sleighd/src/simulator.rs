//! Flight simulator — a demo writer that drives the mission forward.
//!
//! Advances the sleigh through the cities in priority order, one
//! delivery per two ticks (en route, then delivered), writing telemetry,
//! delivery, and mission-stats rows through the store so everything
//! reaches the aggregator via the real change feed. Occasionally raises
//! weather fronts and emergencies.
//!
//! This is demo plumbing only: no route optimization happens here, the
//! visit order is the given priority order.

use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use sleigh_core::seed::SLEIGH_CAPACITY_KG;
use sleigh_core::{
    City, Delivery, DeliveryStatus, Emergency, EmergencyKind, EmergencySeverity, MissionStatus,
    SleighTelemetry, WeatherCondition, WeatherType, epoch_secs,
};
use sleigh_store::{SleighStore, StoreClient, StoreResult};

/// Per-tick chance of raising a random emergency.
const EMERGENCY_CHANCE: f64 = 0.06;

/// Per-tick chance of a new weather front.
const WEATHER_CHANCE: f64 = 0.10;

/// Drives the demo mission through the store.
pub struct FlightSimulator {
    store: SleighStore,
    interval: Duration,
    /// Cities in visit order (priority descending), fetched once.
    route: Vec<City>,
    /// Index of the city currently being served.
    position: usize,
    /// Whether the current city's delivery is still en route.
    en_route: bool,
    telemetry_counter: u64,
    emergency_counter: u64,
    weather_counter: u64,
    fatigue_percent: f64,
    cargo_weight_kg: f64,
}

impl FlightSimulator {
    pub fn new(store: SleighStore, interval: Duration) -> Self {
        Self {
            store,
            interval,
            route: Vec::new(),
            position: 0,
            en_route: true,
            // The seed bootstrapper wrote reading 1.
            telemetry_counter: 2,
            emergency_counter: 0,
            weather_counter: 100,
            fatigue_percent: 0.0,
            cargo_weight_kg: SLEIGH_CAPACITY_KG,
        }
    }

    /// Run until shutdown or mission completion.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        self.route = match self.store.list_cities().await {
            Ok(cities) => cities,
            Err(e) => {
                warn!(error = %e, "simulator could not load the city list");
                return;
            }
        };
        info!(cities = self.route.len(), "flight simulator starting");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    if let Err(e) = self.tick().await {
                        warn!(error = %e, "simulator tick failed");
                    }
                    if self.position >= self.route.len() {
                        info!("all cities served, simulator stopping");
                        break;
                    }
                }
                _ = shutdown.changed() => {
                    debug!("simulator shutting down");
                    break;
                }
            }
        }
    }

    async fn tick(&mut self) -> StoreResult<()> {
        let Some(city) = self.route.get(self.position).cloned() else {
            return Ok(());
        };
        let deliveries = self.store.list_deliveries().await?;
        let Some(delivery) = deliveries.iter().find(|d| d.city_id == city.id).cloned() else {
            // No delivery row for this city; skip it.
            self.position += 1;
            return Ok(());
        };

        if self.en_route {
            self.start_leg(&city, &delivery)?;
            self.en_route = false;
        } else {
            self.complete_leg(&city, &delivery).await?;
            self.en_route = true;
            self.position += 1;
        }

        let mut rng = rand::thread_rng();
        if rng.gen_bool(EMERGENCY_CHANCE) {
            self.raise_emergency(&city, &mut rng)?;
        }
        if rng.gen_bool(WEATHER_CHANCE) {
            self.raise_weather(&city, &mut rng)?;
        }
        Ok(())
    }

    /// Head for the city: delivery goes in-progress, telemetry points at it.
    fn start_leg(&mut self, city: &City, delivery: &Delivery) -> StoreResult<()> {
        let now = epoch_secs();
        self.store.update_delivery(&Delivery {
            status: DeliveryStatus::InProgress,
            updated_at: now,
            ..delivery.clone()
        })?;

        let (latitude, longitude) = self.approach_position(city);
        self.fatigue_percent = (self.fatigue_percent + 0.8).min(100.0);
        self.write_telemetry(latitude, longitude, 1200.0, 6500.0, Some(city.id.clone()), now)?;
        debug!(city = %city.name, "leg started");
        Ok(())
    }

    /// Arrive and deliver: delivery completes, stats advance.
    async fn complete_leg(&mut self, city: &City, delivery: &Delivery) -> StoreResult<()> {
        let now = epoch_secs();
        self.store.update_delivery(&Delivery {
            status: DeliveryStatus::Completed,
            completed_at: Some(now),
            gifts_delivered: city.gift_count,
            updated_at: now,
            ..delivery.clone()
        })?;

        self.cargo_weight_kg = (self.cargo_weight_kg - city.gift_count as f64 * 0.001).max(0.0);
        self.write_telemetry(city.latitude, city.longitude, 50.0, 0.0, Some(city.id.clone()), now)?;

        let leg_km = self
            .position
            .checked_sub(1)
            .and_then(|i| self.route.get(i))
            .map_or(0.0, |prev| haversine_km(prev, city));
        if let Some(mut stats) = self.store.mission_stats().await? {
            stats.gifts_delivered += city.gift_count;
            stats.cities_visited += 1;
            stats.distance_traveled_km += leg_km;
            stats.current_status = if self.position + 1 >= self.route.len() {
                stats.mission_end = Some(now);
                MissionStatus::Completed
            } else {
                MissionStatus::InFlight
            };
            stats.updated_at = now;
            self.store.put_mission_stats(&stats)?;
        }
        info!(city = %city.name, gifts = city.gift_count, "delivery completed");
        Ok(())
    }

    fn write_telemetry(
        &mut self,
        latitude: f64,
        longitude: f64,
        altitude_meters: f64,
        speed_kmh: f64,
        city_id: Option<String>,
        now: u64,
    ) -> StoreResult<()> {
        let next_city = self.route.get(self.position + 1).map(|c| c.id.clone());
        let reading = SleighTelemetry {
            id: format!("telemetry-{:06}", self.telemetry_counter),
            latitude,
            longitude,
            altitude_meters,
            speed_kmh,
            heading_degrees: (self.telemetry_counter as f64 * 37.0) % 360.0,
            current_city_id: city_id,
            next_city_id: next_city,
            reindeer_fatigue_percent: self.fatigue_percent,
            cargo_weight_kg: self.cargo_weight_kg,
            recorded_at: now,
        };
        self.telemetry_counter += 1;
        self.store.insert_telemetry(&reading)
    }

    fn raise_emergency(&mut self, city: &City, rng: &mut impl Rng) -> StoreResult<()> {
        self.emergency_counter += 1;
        let (kind, title) = if self.fatigue_percent > 60.0 {
            (
                EmergencyKind::ReindeerFatigue,
                "Reindeer fatigue climbing".to_string(),
            )
        } else {
            (
                EmergencyKind::WeatherCritical,
                format!("Severe weather near {}", city.name),
            )
        };
        let severity = match rng.gen_range(0..4) {
            0 => EmergencySeverity::Low,
            1 => EmergencySeverity::Medium,
            2 => EmergencySeverity::High,
            _ => EmergencySeverity::Critical,
        };
        self.store.insert_emergency(&Emergency {
            id: format!("emergency-{:04}", self.emergency_counter),
            kind,
            severity,
            title,
            description: None,
            latitude: Some(city.latitude),
            longitude: Some(city.longitude),
            is_resolved: false,
            resolved_at: None,
            created_at: epoch_secs(),
        })
    }

    fn raise_weather(&mut self, city: &City, rng: &mut impl Rng) -> StoreResult<()> {
        self.weather_counter += 1;
        let severity = rng.gen_range(1..=5u8);
        let condition = match rng.gen_range(0..4) {
            0 => WeatherType::Snow,
            1 => WeatherType::Fog,
            2 => WeatherType::Wind,
            _ => WeatherType::Storm,
        };
        self.store.put_weather(&WeatherCondition {
            id: format!("weather-{:04}", self.weather_counter),
            city_id: Some(city.id.clone()),
            region: None,
            condition,
            severity,
            wind_speed_kmh: 15.0 * severity as f64,
            visibility_km: (12.0 - 2.0 * severity as f64).max(0.5),
            speed_reduction_percent: 8.0 * severity as f64,
            is_active: true,
            expires_at: Some(epoch_secs() + 3 * 3600),
            created_at: epoch_secs(),
        })
    }

    /// A point short of the city, on the line from the previous stop.
    fn approach_position(&self, city: &City) -> (f64, f64) {
        match self.position.checked_sub(1).and_then(|i| self.route.get(i)) {
            Some(prev) => (
                (prev.latitude + city.latitude) / 2.0,
                (prev.longitude + city.longitude) / 2.0,
            ),
            None => (city.latitude + 5.0, city.longitude),
        }
    }
}

/// Great-circle distance between two cities.
fn haversine_km(a: &City, b: &City) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleigh_store::seed_if_empty;

    fn city_at(id: &str, latitude: f64, longitude: f64) -> City {
        City {
            id: id.to_string(),
            name: id.to_uppercase(),
            country: "Testland".to_string(),
            latitude,
            longitude,
            population: 1_000_000,
            timezone: "UTC".to_string(),
            timezone_offset: 0.0,
            priority_score: 50,
            gift_count: 1000,
            created_at: 1000,
        }
    }

    #[test]
    fn haversine_known_distance() {
        // London to Paris is roughly 344 km.
        let london = city_at("london", 51.5074, -0.1278);
        let paris = city_at("paris", 48.8566, 2.3522);
        let d = haversine_km(&london, &paris);
        assert!((330.0..360.0).contains(&d), "got {d}");
    }

    #[tokio::test]
    async fn two_ticks_complete_the_first_delivery() {
        let store = SleighStore::open_in_memory().unwrap();
        seed_if_empty(&store).unwrap();

        let mut sim = FlightSimulator::new(store.clone(), Duration::from_millis(1));
        sim.route = store.list_cities().await.unwrap();

        sim.tick().await.unwrap();
        let first = store.list_cities().await.unwrap()[0].clone();
        let deliveries = store.list_deliveries().await.unwrap();
        let delivery = deliveries.iter().find(|d| d.city_id == first.id).unwrap();
        assert_eq!(delivery.status, DeliveryStatus::InProgress);

        sim.tick().await.unwrap();
        let deliveries = store.list_deliveries().await.unwrap();
        let delivery = deliveries.iter().find(|d| d.city_id == first.id).unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Completed);
        assert_eq!(delivery.gifts_delivered, first.gift_count);

        let stats = store.mission_stats().await.unwrap().unwrap();
        assert_eq!(stats.cities_visited, 1);
        assert_eq!(stats.current_status, MissionStatus::InFlight);

        // Telemetry advanced past the seed reading.
        let latest = store.latest_telemetry().await.unwrap().unwrap();
        assert_ne!(latest.id, "telemetry-000001");
    }
}
