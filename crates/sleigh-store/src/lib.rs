//! sleigh-store — the store boundary for Sleigh Command.
//!
//! Defines the [`StoreClient`] trait the mission aggregator is written
//! against, the change-feed event types it consumes, and [`SleighStore`],
//! a concrete store backed by [redb](https://docs.rs/redb) with both
//! on-disk and in-memory backends (the latter for testing).
//!
//! # Architecture
//!
//! All domain rows are JSON-serialized into redb's `&[u8]` value columns,
//! one table per collection, keyed by row id. Every write that belongs to
//! the feed alphabet (deliveries, mission stats, telemetry, emergencies)
//! is published on a `tokio::sync::broadcast` channel; [`ChangeFeed`]
//! wraps a receiver as a cancellable subscription handle.
//!
//! The `SleighStore` is `Clone` + `Send` + `Sync` (backed by
//! `Arc<Database>`) and can be shared across async tasks.

pub mod client;
pub mod error;
pub mod feed;
pub mod seed;
pub mod store;
pub mod tables;

pub use client::StoreClient;
pub use error::{StoreError, StoreResult};
pub use feed::{ChangeEvent, ChangeFeed, FeedError, RowChange};
pub use seed::seed_if_empty;
pub use store::SleighStore;
