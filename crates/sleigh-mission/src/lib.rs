//! sleigh-mission — the mission data aggregator.
//!
//! Maintains a consistent, continuously updated read model over the six
//! mission collections: an initial snapshot fetched with six concurrent
//! queries and committed as one state transition, then incremental
//! updates applied in arrival order from the store's change feed.
//!
//! The replica is a single [`MissionState`] value transformed by a
//! closed set of [`MissionEvent`] variants — a pure reducer, so every
//! consistency property is unit-testable without a UI or a live store.
//! [`MissionData`] wraps the reducer with the async plumbing: the
//! snapshot load, the feed task, the optimistic resolve-emergency
//! action, and deterministic teardown.

pub mod aggregator;
pub mod state;

pub use aggregator::MissionData;
pub use state::{MissionEvent, MissionSnapshot, MissionState};
