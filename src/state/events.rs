//! Change notifications for observers of the synchronized state.

use crate::domain::{FeeTotals, PoolKey};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

// Capacity per state object; slow receivers see `Lagged` and can re-read.
const EVENTS_CAPACITY: usize = 256;

/// A mutation that already happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// A refresh upserted these pool keys.
    PoolsRefreshed {
        keys: Vec<PoolKey>,
        at: DateTime<Utc>,
    },
    /// Fee totals were overwritten.
    FeesUpdated { totals: FeeTotals, at: DateTime<Utc> },
}

/// Publisher side of a state object's notifications.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: broadcast::Sender<StateEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENTS_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.tx.subscribe()
    }

    /// Non-blocking; dropped when nobody is subscribed.
    pub fn publish(&self, event: StateEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);

        let event = StateEvent::FeesUpdated {
            totals: FeeTotals::default(),
            at: Utc::now(),
        };
        publisher.publish(event.clone());
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let publisher = EventPublisher::new();
        publisher.publish(StateEvent::PoolsRefreshed {
            keys: vec![],
            at: Utc::now(),
        });
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = StateEvent::PoolsRefreshed {
            keys: vec![PoolKey::new("a")],
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "pools_refreshed");
        assert_eq!(json["keys"][0], "a");
    }
}
