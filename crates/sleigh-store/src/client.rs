//! The `StoreClient` trait — what the mission aggregator needs from a
//! store.
//!
//! The aggregator takes its client as an explicit constructor argument
//! (generic injection), so tests can script a mock without touching redb.
//! Queries are typed per collection; the read shapes are exactly the six
//! the snapshot needs.

use async_trait::async_trait;

use sleigh_core::{City, Delivery, Emergency, MissionStats, SleighTelemetry, WeatherCondition};

use crate::error::StoreResult;
use crate::feed::ChangeFeed;

/// Query, mutation, and subscription capabilities consumed by the
/// mission aggregator.
#[async_trait]
pub trait StoreClient: Send + Sync + 'static {
    /// All cities, ordered by `priority_score` descending.
    async fn list_cities(&self) -> StoreResult<Vec<City>>;

    /// All deliveries.
    async fn list_deliveries(&self) -> StoreResult<Vec<Delivery>>;

    /// The mission-stats singleton. Absence is not an error.
    async fn mission_stats(&self) -> StoreResult<Option<MissionStats>>;

    /// The most recent telemetry reading by `recorded_at`, if any.
    async fn latest_telemetry(&self) -> StoreResult<Option<SleighTelemetry>>;

    /// Weather conditions with `is_active = true`.
    async fn active_weather(&self) -> StoreResult<Vec<WeatherCondition>>;

    /// Emergencies with `is_resolved = false`.
    async fn unresolved_emergencies(&self) -> StoreResult<Vec<Emergency>>;

    /// Mark an emergency resolved (`is_resolved = true`,
    /// `resolved_at = now`). Ids not in the unresolved set — unknown or
    /// already resolved — are `NotFound`.
    async fn resolve_emergency(&self, id: &str) -> StoreResult<()>;

    /// Open a subscription to the multiplexed change feed.
    fn subscribe(&self) -> ChangeFeed;
}
