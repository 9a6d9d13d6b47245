//! The mission replica and its reducer.
//!
//! `MissionState` holds the cached, eventually-consistent copy of the
//! six store collections plus two derived indexes. It changes only
//! through [`MissionState::apply`], which consumes one [`MissionEvent`]
//! at a time. Indexes are rebuilt inside `apply`, exactly when their
//! source collection changed, never on read.

use std::collections::HashMap;

use serde::Serialize;

use sleigh_core::{
    City, CityId, Delivery, DeliveryStatus, Emergency, MissionStats, SleighTelemetry,
    WeatherCondition,
};
use sleigh_store::RowChange;

/// One transition of the mission replica.
#[derive(Debug, Clone)]
pub enum MissionEvent {
    /// A snapshot load settled successfully. `seq` is the load sequence
    /// stamped when the load started; a load older than one already
    /// applied is discarded, so a later-started load always settles
    /// last.
    SnapshotLoaded {
        seq: u64,
        cities: Vec<City>,
        deliveries: Vec<Delivery>,
        stats: Option<MissionStats>,
        telemetry: Option<SleighTelemetry>,
        weather: Vec<WeatherCondition>,
        emergencies: Vec<Emergency>,
    },
    /// A snapshot load failed on a required query. Previously held
    /// collections are retained; only the error message changes.
    SnapshotFailed { seq: u64, message: String },
    /// A delivery changed on the feed. Updates replace the matching row
    /// in place (no match is a no-op, never an append); inserts are not
    /// consumed by the replica.
    DeliveryChanged(RowChange<Delivery>),
    /// The mission-stats singleton was replaced wholesale.
    StatsUpdated(MissionStats),
    /// A new telemetry reading arrived; it replaces the current value
    /// wholesale ("latest now", no merge).
    TelemetryInserted(SleighTelemetry),
    /// An emergency was inserted (append) or updated (replace in place,
    /// no match is a no-op).
    EmergencyChanged(RowChange<Emergency>),
    /// An emergency was resolved through this aggregator; remove it
    /// optimistically without waiting for the feed to echo the update.
    EmergencyResolvedLocally { id: String },
}

/// The aggregator's in-memory replica and derived indexes.
#[derive(Debug, Default)]
pub struct MissionState {
    pub cities: Vec<City>,
    pub deliveries: Vec<Delivery>,
    pub stats: Option<MissionStats>,
    pub telemetry: Option<SleighTelemetry>,
    pub weather: Vec<WeatherCondition>,
    pub emergencies: Vec<Emergency>,

    /// City rows by id; rebuilt only when `cities` changes.
    pub city_by_id: HashMap<CityId, City>,
    /// Latest delivery status per city; rebuilt only when `deliveries`
    /// changes. At most one entry per city — later rows in iteration
    /// order win.
    pub delivery_status_by_city: HashMap<CityId, DeliveryStatus>,

    /// Bumped every time `cities` is replaced (index rebuild marker).
    pub cities_rev: u64,
    /// Bumped every time `deliveries` is replaced or mutated.
    pub deliveries_rev: u64,

    pub loading: bool,
    pub error: Option<String>,

    /// Sequence of the newest applied snapshot load.
    applied_seq: u64,
    /// Sequence of the newest started snapshot load.
    started_seq: u64,
}

impl MissionState {
    /// Mark a snapshot load as started. The matching
    /// `SnapshotLoaded`/`SnapshotFailed` clears the flag unless a newer
    /// load has started since. A load whose sequence is already behind
    /// the applied one is pre-empted: its settle would be discarded, so
    /// it must not raise the flag either.
    pub fn begin_load(&mut self, seq: u64) {
        if seq > self.applied_seq {
            self.loading = true;
        }
        self.started_seq = self.started_seq.max(seq);
    }

    /// Apply one event. Pure state transition; never fails.
    pub fn apply(&mut self, event: MissionEvent) {
        match event {
            MissionEvent::SnapshotLoaded {
                seq,
                cities,
                deliveries,
                stats,
                telemetry,
                weather,
                emergencies,
            } => {
                if seq >= self.started_seq {
                    self.loading = false;
                }
                if seq <= self.applied_seq {
                    // A newer load already settled; discard this one.
                    return;
                }
                self.applied_seq = seq;
                self.cities = cities;
                self.deliveries = deliveries;
                self.stats = stats;
                self.telemetry = telemetry;
                self.weather = weather;
                self.emergencies = emergencies;
                self.error = None;
                self.rebuild_city_index();
                self.rebuild_status_index();
            }
            MissionEvent::SnapshotFailed { seq, message } => {
                if seq >= self.started_seq {
                    self.loading = false;
                }
                if seq <= self.applied_seq {
                    return;
                }
                self.applied_seq = seq;
                // Stale collections are retained on purpose.
                self.error = Some(message);
            }
            MissionEvent::DeliveryChanged(RowChange::Updated(delivery)) => {
                if let Some(slot) = self.deliveries.iter_mut().find(|d| d.id == delivery.id) {
                    *slot = delivery;
                    self.rebuild_status_index();
                }
            }
            MissionEvent::DeliveryChanged(RowChange::Inserted(_)) => {
                // Updates imply pre-existence; inserts arrive via snapshot.
            }
            MissionEvent::StatsUpdated(stats) => {
                self.stats = Some(stats);
            }
            MissionEvent::TelemetryInserted(reading) => {
                self.telemetry = Some(reading);
            }
            MissionEvent::EmergencyChanged(RowChange::Inserted(emergency)) => {
                self.emergencies.push(emergency);
            }
            MissionEvent::EmergencyChanged(RowChange::Updated(emergency)) => {
                if let Some(slot) = self.emergencies.iter_mut().find(|e| e.id == emergency.id) {
                    *slot = emergency;
                }
            }
            MissionEvent::EmergencyResolvedLocally { id } => {
                self.emergencies.retain(|e| e.id != id);
            }
        }
    }

    fn rebuild_city_index(&mut self) {
        self.cities_rev += 1;
        self.city_by_id = self
            .cities
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();
    }

    fn rebuild_status_index(&mut self) {
        self.deliveries_rev += 1;
        // Later rows overwrite earlier ones for the same city.
        self.delivery_status_by_city = self
            .deliveries
            .iter()
            .map(|d| (d.city_id.clone(), d.status))
            .collect();
    }

    /// Clone the read model for consumers.
    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot {
            cities: self.cities.clone(),
            deliveries: self.deliveries.clone(),
            stats: self.stats.clone(),
            telemetry: self.telemetry.clone(),
            weather: self.weather.clone(),
            emergencies: self.emergencies.clone(),
            city_by_id: self.city_by_id.clone(),
            delivery_status_by_city: self.delivery_status_by_city.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// The read model handed to views: six collections, two derived maps,
/// and the load flags. Optional singletons stay `None` until data
/// exists; consumers render a fallback.
#[derive(Debug, Clone, Serialize)]
pub struct MissionSnapshot {
    pub cities: Vec<City>,
    pub deliveries: Vec<Delivery>,
    pub stats: Option<MissionStats>,
    pub telemetry: Option<SleighTelemetry>,
    pub weather: Vec<WeatherCondition>,
    pub emergencies: Vec<Emergency>,
    pub city_by_id: HashMap<CityId, City>,
    pub delivery_status_by_city: HashMap<CityId, DeliveryStatus>,
    pub loading: bool,
    pub error: Option<String>,
}
