//! SleighStore — redb-backed store with a broadcast change feed.
//!
//! Typed CRUD over the six mission collections. All values are
//! JSON-serialized into redb's `&[u8]` value columns. Writes to the
//! feed-covered collections (deliveries, mission stats, telemetry,
//! emergencies) publish a [`ChangeEvent`] to every open [`ChangeFeed`].

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use tokio::sync::broadcast;
use tracing::debug;

use sleigh_core::{
    City, Delivery, Emergency, MissionStats, SleighTelemetry, WeatherCondition, epoch_secs,
};

use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};
use crate::feed::{ChangeEvent, ChangeFeed, RowChange};
use crate::tables::*;

/// Feed buffer size; a consumer further behind than this lags and must
/// resynchronize with a snapshot reload.
const FEED_CAPACITY: usize = 256;

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe mission store backed by redb.
#[derive(Clone)]
pub struct SleighStore {
    db: Arc<Database>,
    feed_tx: broadcast::Sender<ChangeEvent>,
}

impl SleighStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self::from_db(db)?;
        debug!(?path, "sleigh store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing and demo runs).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self::from_db(db)?;
        debug!("in-memory sleigh store opened");
        Ok(store)
    }

    fn from_db(db: Database) -> StoreResult<Self> {
        let (feed_tx, _) = broadcast::channel(FEED_CAPACITY);
        let store = Self {
            db: Arc::new(db),
            feed_tx,
        };
        store.ensure_tables()?;
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(CITIES).map_err(map_err!(Table))?;
        txn.open_table(DELIVERIES).map_err(map_err!(Table))?;
        txn.open_table(MISSION_STATS).map_err(map_err!(Table))?;
        txn.open_table(TELEMETRY).map_err(map_err!(Table))?;
        txn.open_table(WEATHER).map_err(map_err!(Table))?;
        txn.open_table(EMERGENCIES).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Publish a feed event. No-op when no subscriber is connected.
    fn publish(&self, event: ChangeEvent) {
        let _ = self.feed_tx.send(event);
    }

    // ── Generic row helpers ────────────────────────────────────────

    fn put_row<T: serde::Serialize>(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
        row: &T,
    ) -> StoreResult<()> {
        let value = serde_json::to_vec(row).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(table).map_err(map_err!(Table))?;
            table
                .insert(key, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    fn get_row<T: serde::de::DeserializeOwned>(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(table).map_err(map_err!(Table))?;
        match table.get(key).map_err(map_err!(Read))? {
            Some(guard) => {
                let row: T =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn scan_rows<T: serde::de::DeserializeOwned>(
        &self,
        table: TableDefinition<&str, &[u8]>,
    ) -> StoreResult<Vec<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(table).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let row: T = serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(row);
        }
        Ok(results)
    }

    // ── Cities ─────────────────────────────────────────────────────

    /// Insert or update a city. City writes are not part of the change
    /// feed; they are picked up by snapshot reloads only.
    pub fn put_city(&self, city: &City) -> StoreResult<()> {
        self.put_row(CITIES, &city.id, city)?;
        debug!(city_id = %city.id, name = %city.name, "city stored");
        Ok(())
    }

    /// Number of city rows (used by the seed bootstrapper).
    pub fn city_count(&self) -> StoreResult<u64> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(CITIES).map_err(map_err!(Table))?;
        table.len().map_err(map_err!(Read))
    }

    // ── Deliveries ─────────────────────────────────────────────────

    /// Insert a delivery and publish an insert event.
    pub fn insert_delivery(&self, delivery: &Delivery) -> StoreResult<()> {
        self.put_row(DELIVERIES, &delivery.id, delivery)?;
        self.publish(ChangeEvent::Delivery(RowChange::Inserted(delivery.clone())));
        Ok(())
    }

    /// Update a delivery in place and publish an update event.
    pub fn update_delivery(&self, delivery: &Delivery) -> StoreResult<()> {
        self.put_row(DELIVERIES, &delivery.id, delivery)?;
        self.publish(ChangeEvent::Delivery(RowChange::Updated(delivery.clone())));
        Ok(())
    }

    /// Get a delivery by id.
    pub fn get_delivery(&self, id: &str) -> StoreResult<Option<Delivery>> {
        self.get_row(DELIVERIES, id)
    }

    // ── Mission stats ──────────────────────────────────────────────

    /// Replace the mission-stats singleton and publish an update event.
    pub fn put_mission_stats(&self, stats: &MissionStats) -> StoreResult<()> {
        self.put_row(MISSION_STATS, &stats.id, stats)?;
        self.publish(ChangeEvent::Stats(stats.clone()));
        Ok(())
    }

    // ── Telemetry ──────────────────────────────────────────────────

    /// Insert a telemetry reading and publish an insert event. Readings
    /// are append-only; the feed treats each insert as "latest now".
    pub fn insert_telemetry(&self, reading: &SleighTelemetry) -> StoreResult<()> {
        self.put_row(TELEMETRY, &reading.id, reading)?;
        self.publish(ChangeEvent::Telemetry(reading.clone()));
        Ok(())
    }

    // ── Weather ────────────────────────────────────────────────────

    /// Insert or update a weather condition. Not part of the change
    /// feed; reaches consumers via snapshot reloads.
    pub fn put_weather(&self, condition: &WeatherCondition) -> StoreResult<()> {
        self.put_row(WEATHER, &condition.id, condition)
    }

    // ── Emergencies ────────────────────────────────────────────────

    /// Insert an emergency and publish an insert event.
    pub fn insert_emergency(&self, emergency: &Emergency) -> StoreResult<()> {
        self.put_row(EMERGENCIES, &emergency.id, emergency)?;
        self.publish(ChangeEvent::Emergency(RowChange::Inserted(
            emergency.clone(),
        )));
        Ok(())
    }

    /// Get an emergency by id.
    pub fn get_emergency(&self, id: &str) -> StoreResult<Option<Emergency>> {
        self.get_row(EMERGENCIES, id)
    }
}

#[async_trait]
impl StoreClient for SleighStore {
    async fn list_cities(&self) -> StoreResult<Vec<City>> {
        let mut cities: Vec<City> = self.scan_rows(CITIES)?;
        cities.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
        Ok(cities)
    }

    async fn list_deliveries(&self) -> StoreResult<Vec<Delivery>> {
        self.scan_rows(DELIVERIES)
    }

    async fn mission_stats(&self) -> StoreResult<Option<MissionStats>> {
        // Zero-or-one semantics: take the first row if several exist.
        let rows: Vec<MissionStats> = self.scan_rows(MISSION_STATS)?;
        Ok(rows.into_iter().next())
    }

    async fn latest_telemetry(&self) -> StoreResult<Option<SleighTelemetry>> {
        let rows: Vec<SleighTelemetry> = self.scan_rows(TELEMETRY)?;
        Ok(rows.into_iter().max_by_key(|r| r.recorded_at))
    }

    async fn active_weather(&self) -> StoreResult<Vec<WeatherCondition>> {
        let rows: Vec<WeatherCondition> = self.scan_rows(WEATHER)?;
        Ok(rows.into_iter().filter(|w| w.is_active).collect())
    }

    async fn unresolved_emergencies(&self) -> StoreResult<Vec<Emergency>> {
        let rows: Vec<Emergency> = self.scan_rows(EMERGENCIES)?;
        Ok(rows.into_iter().filter(|e| !e.is_resolved).collect())
    }

    async fn resolve_emergency(&self, id: &str) -> StoreResult<()> {
        let mut emergency: Emergency = self
            .get_row(EMERGENCIES, id)?
            .filter(|e: &Emergency| !e.is_resolved)
            .ok_or_else(|| StoreError::NotFound(format!("emergency {id}")))?;
        emergency.is_resolved = true;
        emergency.resolved_at = Some(epoch_secs());
        self.put_row(EMERGENCIES, id, &emergency)?;
        self.publish(ChangeEvent::Emergency(RowChange::Updated(emergency)));
        debug!(emergency_id = %id, "emergency resolved");
        Ok(())
    }

    fn subscribe(&self) -> ChangeFeed {
        ChangeFeed::new(self.feed_tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleigh_core::{DeliveryStatus, EmergencyKind, EmergencySeverity, MissionStatus};

    fn test_city(id: &str, priority: u32) -> City {
        City {
            id: id.to_string(),
            name: format!("City {id}"),
            country: "Testland".to_string(),
            latitude: 10.0,
            longitude: 20.0,
            population: 1_000_000,
            timezone: "UTC".to_string(),
            timezone_offset: 0.0,
            priority_score: priority,
            gift_count: 250_000,
            created_at: 1000,
        }
    }

    fn test_delivery(id: &str, city_id: &str, status: DeliveryStatus) -> Delivery {
        Delivery {
            id: id.to_string(),
            city_id: city_id.to_string(),
            status,
            scheduled_at: Some(2000),
            completed_at: None,
            delay_reason: None,
            gifts_delivered: 0,
            created_at: 1000,
            updated_at: 1000,
        }
    }

    fn test_telemetry(id: &str, recorded_at: u64) -> SleighTelemetry {
        SleighTelemetry {
            id: id.to_string(),
            latitude: 60.0,
            longitude: 25.0,
            altitude_meters: 1200.0,
            speed_kmh: 4800.0,
            heading_degrees: 90.0,
            current_city_id: None,
            next_city_id: None,
            reindeer_fatigue_percent: 12.0,
            cargo_weight_kg: 400_000.0,
            recorded_at,
        }
    }

    fn test_weather(id: &str, active: bool) -> WeatherCondition {
        WeatherCondition {
            id: id.to_string(),
            city_id: None,
            region: Some("North Atlantic".to_string()),
            condition: sleigh_core::WeatherType::Snow,
            severity: 2,
            wind_speed_kmh: 30.0,
            visibility_km: 5.0,
            speed_reduction_percent: 10.0,
            is_active: active,
            expires_at: None,
            created_at: 1000,
        }
    }

    fn test_emergency(id: &str) -> Emergency {
        Emergency {
            id: id.to_string(),
            kind: EmergencyKind::Mechanical,
            severity: EmergencySeverity::High,
            title: "Runner damage".to_string(),
            description: None,
            latitude: Some(55.0),
            longitude: Some(12.0),
            is_resolved: false,
            resolved_at: None,
            created_at: 1000,
        }
    }

    #[tokio::test]
    async fn cities_ordered_by_priority_descending() {
        let store = SleighStore::open_in_memory().unwrap();
        store.put_city(&test_city("c-low", 10)).unwrap();
        store.put_city(&test_city("c-high", 90)).unwrap();
        store.put_city(&test_city("c-mid", 50)).unwrap();

        let cities = store.list_cities().await.unwrap();
        let ids: Vec<&str> = cities.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c-high", "c-mid", "c-low"]);
    }

    #[tokio::test]
    async fn mission_stats_absent_is_none() {
        let store = SleighStore::open_in_memory().unwrap();
        assert!(store.mission_stats().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn latest_telemetry_picks_max_recorded_at() {
        let store = SleighStore::open_in_memory().unwrap();
        store.insert_telemetry(&test_telemetry("t1", 100)).unwrap();
        store.insert_telemetry(&test_telemetry("t3", 300)).unwrap();
        store.insert_telemetry(&test_telemetry("t2", 200)).unwrap();

        let latest = store.latest_telemetry().await.unwrap().unwrap();
        assert_eq!(latest.id, "t3");
    }

    #[tokio::test]
    async fn active_weather_filters_inactive() {
        let store = SleighStore::open_in_memory().unwrap();
        store.put_weather(&test_weather("w1", true)).unwrap();
        store.put_weather(&test_weather("w2", false)).unwrap();

        let active = store.active_weather().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "w1");
    }

    #[tokio::test]
    async fn resolve_emergency_updates_row_and_filters_it() {
        let store = SleighStore::open_in_memory().unwrap();
        store.insert_emergency(&test_emergency("e1")).unwrap();
        store.insert_emergency(&test_emergency("e2")).unwrap();

        store.resolve_emergency("e1").await.unwrap();

        let unresolved = store.unresolved_emergencies().await.unwrap();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].id, "e2");

        let resolved = store.get_emergency("e1").unwrap().unwrap();
        assert!(resolved.is_resolved);
        assert!(resolved.resolved_at.is_some());
    }

    #[tokio::test]
    async fn resolve_missing_emergency_is_not_found() {
        let store = SleighStore::open_in_memory().unwrap();
        let err = store.resolve_emergency("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn resolve_twice_is_not_found() {
        let store = SleighStore::open_in_memory().unwrap();
        store.insert_emergency(&test_emergency("e1")).unwrap();
        store.resolve_emergency("e1").await.unwrap();
        let first_resolved_at = store.get_emergency("e1").unwrap().unwrap().resolved_at;

        let err = store.resolve_emergency("e1").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // The original resolution timestamp is untouched.
        let row = store.get_emergency("e1").unwrap().unwrap();
        assert_eq!(row.resolved_at, first_resolved_at);
    }

    #[tokio::test]
    async fn feed_carries_writes_in_order() {
        let store = SleighStore::open_in_memory().unwrap();
        let mut feed = store.subscribe();

        store
            .insert_delivery(&test_delivery("d1", "c1", DeliveryStatus::Pending))
            .unwrap();
        let mut updated = test_delivery("d1", "c1", DeliveryStatus::Completed);
        updated.gifts_delivered = 500;
        store.update_delivery(&updated).unwrap();
        store.insert_telemetry(&test_telemetry("t1", 100)).unwrap();

        match feed.recv().await.unwrap() {
            ChangeEvent::Delivery(RowChange::Inserted(d)) => assert_eq!(d.id, "d1"),
            other => panic!("unexpected event: {other:?}"),
        }
        match feed.recv().await.unwrap() {
            ChangeEvent::Delivery(RowChange::Updated(d)) => {
                assert_eq!(d.status, DeliveryStatus::Completed)
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match feed.recv().await.unwrap() {
            ChangeEvent::Telemetry(t) => assert_eq!(t.id, "t1"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_publishes_update_event() {
        let store = SleighStore::open_in_memory().unwrap();
        store.insert_emergency(&test_emergency("e1")).unwrap();

        let mut feed = store.subscribe();
        store.resolve_emergency("e1").await.unwrap();

        match feed.recv().await.unwrap() {
            ChangeEvent::Emergency(RowChange::Updated(e)) => {
                assert_eq!(e.id, "e1");
                assert!(e.is_resolved);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn writes_without_subscribers_succeed() {
        let store = SleighStore::open_in_memory().unwrap();
        store
            .insert_delivery(&test_delivery("d1", "c1", DeliveryStatus::Pending))
            .unwrap();
        assert!(store.get_delivery("d1").unwrap().is_some());
    }

    #[tokio::test]
    async fn persistence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("mission.redb");

        {
            let store = SleighStore::open(&db_path).unwrap();
            store.put_city(&test_city("c1", 80)).unwrap();
        }

        // Reopen the same database file.
        let store = SleighStore::open(&db_path).unwrap();
        let cities = store.list_cities().await.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].id, "c1");
    }
}
