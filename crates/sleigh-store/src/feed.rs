//! Change-feed types: the multiplexed event alphabet and the
//! cancellable subscription handle.
//!
//! The feed covers the four collections the aggregator keeps live:
//! deliveries (insert/update), mission stats (update), telemetry
//! (insert-only), and emergencies (insert/update). City and weather
//! changes are picked up only by a snapshot reload.

use thiserror::Error;
use tokio::sync::broadcast;

use sleigh_core::{Delivery, Emergency, MissionStats, SleighTelemetry};

/// An insert or in-place update of a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowChange<T> {
    Inserted(T),
    Updated(T),
}

impl<T> RowChange<T> {
    /// The carried row, regardless of operation.
    pub fn row(&self) -> &T {
        match self {
            Self::Inserted(row) | Self::Updated(row) => row,
        }
    }
}

/// One event on the multiplexed change feed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    Delivery(RowChange<Delivery>),
    Stats(MissionStats),
    Telemetry(SleighTelemetry),
    Emergency(RowChange<Emergency>),
}

/// Errors surfaced by [`ChangeFeed::recv`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    /// The receiver fell behind and `n` events were dropped. The
    /// consumer should resynchronize with a snapshot reload.
    #[error("feed lagged, {0} events dropped")]
    Lagged(u64),

    /// The feed was closed (publisher dropped or subscription closed).
    #[error("feed closed")]
    Closed,
}

/// A cancellable subscription to the change feed.
///
/// Events arrive in publication order. `close` releases the underlying
/// receiver exactly once; calling it again (or dropping after close) is
/// a no-op.
#[derive(Debug)]
pub struct ChangeFeed {
    rx: Option<broadcast::Receiver<ChangeEvent>>,
}

impl ChangeFeed {
    /// Wrap a raw broadcast receiver. Alternate `StoreClient`
    /// implementations can hand out feeds the same way `SleighStore`
    /// does.
    pub fn new(rx: broadcast::Receiver<ChangeEvent>) -> Self {
        Self { rx: Some(rx) }
    }

    /// Wait for the next event.
    ///
    /// Returns [`FeedError::Closed`] once the feed is closed, from
    /// either end.
    pub async fn recv(&mut self) -> Result<ChangeEvent, FeedError> {
        let Some(rx) = self.rx.as_mut() else {
            return Err(FeedError::Closed);
        };
        match rx.recv().await {
            Ok(event) => Ok(event),
            Err(broadcast::error::RecvError::Lagged(n)) => Err(FeedError::Lagged(n)),
            Err(broadcast::error::RecvError::Closed) => Err(FeedError::Closed),
        }
    }

    /// Close the subscription. Idempotent.
    pub fn close(&mut self) {
        self.rx = None;
    }

    /// Whether the subscription has been closed locally.
    pub fn is_closed(&self) -> bool {
        self.rx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleigh_core::{MissionStats, MissionStatus};

    fn test_stats() -> MissionStats {
        MissionStats {
            id: "stats-1".to_string(),
            mission_start: None,
            mission_end: None,
            total_gifts: 100,
            gifts_delivered: 0,
            cities_visited: 0,
            total_cities: 2,
            distance_traveled_km: 0.0,
            current_status: MissionStatus::Preparing,
            updated_at: 1000,
        }
    }

    #[tokio::test]
    async fn recv_in_publication_order() {
        let (tx, rx) = broadcast::channel(16);
        let mut feed = ChangeFeed::new(rx);

        let mut first = test_stats();
        first.gifts_delivered = 1;
        let mut second = test_stats();
        second.gifts_delivered = 2;

        tx.send(ChangeEvent::Stats(first.clone())).unwrap();
        tx.send(ChangeEvent::Stats(second.clone())).unwrap();

        assert_eq!(feed.recv().await.unwrap(), ChangeEvent::Stats(first));
        assert_eq!(feed.recv().await.unwrap(), ChangeEvent::Stats(second));
    }

    #[tokio::test]
    async fn recv_after_close_returns_closed() {
        let (_tx, rx) = broadcast::channel::<ChangeEvent>(16);
        let mut feed = ChangeFeed::new(rx);

        feed.close();
        feed.close(); // second close is a no-op
        assert!(feed.is_closed());
        assert_eq!(feed.recv().await, Err(FeedError::Closed));
    }

    #[tokio::test]
    async fn recv_after_publisher_drop_returns_closed() {
        let (tx, rx) = broadcast::channel::<ChangeEvent>(16);
        let mut feed = ChangeFeed::new(rx);
        drop(tx);
        assert_eq!(feed.recv().await, Err(FeedError::Closed));
    }

    #[tokio::test]
    async fn lag_is_reported() {
        let (tx, rx) = broadcast::channel(2);
        let mut feed = ChangeFeed::new(rx);

        for _ in 0..4 {
            tx.send(ChangeEvent::Stats(test_stats())).unwrap();
        }

        assert_eq!(feed.recv().await, Err(FeedError::Lagged(2)));
        // The remaining buffered events are still readable.
        assert!(feed.recv().await.is_ok());
    }
}
