//! MissionData — the aggregator handle.
//!
//! Owns the replica, the feed task, and the load sequence. Construction
//! opens the change-feed subscription immediately; the initial snapshot
//! is a separate operation so callers decide when to await it. Teardown
//! stops the feed task exactly once, from `shutdown` or `Drop`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use sleigh_store::{ChangeEvent, FeedError, StoreClient, StoreResult};

use crate::state::{MissionEvent, MissionSnapshot, MissionState};

/// Aggregates the six mission collections into one live read model.
pub struct MissionData<S: StoreClient> {
    store: Arc<S>,
    state: Arc<RwLock<MissionState>>,
    load_seq: Arc<AtomicU64>,
    shutdown_tx: watch::Sender<bool>,
    feed_task: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl<S: StoreClient> MissionData<S> {
    /// Create the aggregator and open the change-feed subscription.
    ///
    /// The feed starts before any snapshot is loaded; call
    /// [`load_snapshot`](Self::load_snapshot) to populate the replica.
    pub fn new(store: S) -> Self {
        let store = Arc::new(store);
        let state = Arc::new(RwLock::new(MissionState::default()));
        let load_seq = Arc::new(AtomicU64::new(0));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(run_feed_loop(
            store.clone(),
            state.clone(),
            load_seq.clone(),
            shutdown_rx,
        ));

        Self {
            store,
            state,
            load_seq,
            shutdown_tx,
            feed_task: std::sync::Mutex::new(Some(handle)),
        }
    }

    /// Fetch a fresh snapshot of all six collections and commit it as a
    /// single state transition.
    ///
    /// A failure of the cities or deliveries query fails the whole load
    /// and surfaces as `error` in the read model; the other four queries
    /// default to empty/absent on failure. The live feed is unaffected.
    pub async fn load_snapshot(&self) {
        run_load(&*self.store, &self.state, &self.load_seq).await;
    }

    /// Manual refetch — the same path as the initial snapshot load.
    pub async fn refetch(&self) {
        self.load_snapshot().await;
    }

    /// Resolve an emergency: persist the change, then remove the row
    /// from the local unresolved set without waiting for the feed echo.
    ///
    /// A store failure leaves local state untouched and is returned to
    /// the caller.
    pub async fn resolve_emergency(&self, id: &str) -> StoreResult<()> {
        self.store.resolve_emergency(id).await?;
        let mut state = self.state.write().await;
        state.apply(MissionEvent::EmergencyResolvedLocally { id: id.to_string() });
        Ok(())
    }

    /// Clone the current read model.
    pub async fn snapshot(&self) -> MissionSnapshot {
        self.state.read().await.snapshot()
    }

    /// Stop the feed task and release the subscription. Idempotent: the
    /// task is stopped at most once, no matter how often this is called.
    pub fn shutdown(&self) {
        if let Some(handle) = self.feed_task.lock().expect("feed task lock").take() {
            let _ = self.shutdown_tx.send(true);
            handle.abort();
            debug!("mission aggregator shut down");
        }
    }
}

impl<S: StoreClient> Drop for MissionData<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Stamp a new load sequence, run the six queries concurrently, and
/// commit the joint result.
async fn run_load<S: StoreClient>(
    store: &S,
    state: &RwLock<MissionState>,
    load_seq: &AtomicU64,
) {
    let seq = load_seq.fetch_add(1, Ordering::SeqCst) + 1;
    state.write().await.begin_load(seq);

    let (cities, deliveries, stats, telemetry, weather, emergencies) = tokio::join!(
        store.list_cities(),
        store.list_deliveries(),
        store.mission_stats(),
        store.latest_telemetry(),
        store.active_weather(),
        store.unresolved_emergencies(),
    );

    let event = match (cities, deliveries) {
        (Ok(cities), Ok(deliveries)) => MissionEvent::SnapshotLoaded {
            seq,
            cities,
            deliveries,
            stats: stats.unwrap_or_else(|e| {
                warn!(error = %e, "mission stats query failed, treating as absent");
                None
            }),
            telemetry: telemetry.unwrap_or_else(|e| {
                warn!(error = %e, "telemetry query failed, treating as absent");
                None
            }),
            weather: weather.unwrap_or_else(|e| {
                warn!(error = %e, "weather query failed, treating as empty");
                Vec::new()
            }),
            emergencies: emergencies.unwrap_or_else(|e| {
                warn!(error = %e, "emergencies query failed, treating as empty");
                Vec::new()
            }),
        },
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, seq, "snapshot load failed");
            MissionEvent::SnapshotFailed {
                seq,
                message: e.to_string(),
            }
        }
    };

    state.write().await.apply(event);
}

/// Consume the change feed until shutdown or closure, applying events
/// strictly in arrival order. A lagged receiver resynchronizes with a
/// full snapshot reload.
async fn run_feed_loop<S: StoreClient>(
    store: Arc<S>,
    state: Arc<RwLock<MissionState>>,
    load_seq: Arc<AtomicU64>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut feed = store.subscribe();
    debug!("change feed opened");

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                debug!("feed loop shutting down");
                break;
            }
            result = feed.recv() => match result {
                Ok(event) => {
                    let event = match event {
                        ChangeEvent::Delivery(change) => MissionEvent::DeliveryChanged(change),
                        ChangeEvent::Stats(stats) => MissionEvent::StatsUpdated(stats),
                        ChangeEvent::Telemetry(reading) => MissionEvent::TelemetryInserted(reading),
                        ChangeEvent::Emergency(change) => MissionEvent::EmergencyChanged(change),
                    };
                    state.write().await.apply(event);
                }
                Err(FeedError::Lagged(dropped)) => {
                    warn!(dropped, "change feed lagged, refetching snapshot");
                    run_load(&*store, &state, &load_seq).await;
                }
                Err(FeedError::Closed) => {
                    debug!("change feed closed");
                    break;
                }
            }
        }
    }

    feed.close();
}
