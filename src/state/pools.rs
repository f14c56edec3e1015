//! Last-known-good snapshot of every liquidity pool, keyed by pool id.

use super::events::{EventPublisher, StateEvent};
use crate::datasource::{FetchError, PoolSource};
use crate::domain::{PoolKey, PoolRecord};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// What a call to [`PoolStore::refresh`] did.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum RefreshOutcome {
    /// Fetch succeeded; this many records were upserted.
    Updated { upserted: usize },
    /// Fetch failed; the previous snapshot is untouched.
    Unchanged(FetchError),
    /// The store was disposed; nothing was written.
    Disposed,
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }
}

#[derive(Debug, Default)]
struct Snapshot {
    pools: HashMap<PoolKey, PoolRecord>,
    last_refreshed: Option<DateTime<Utc>>,
}

/// Keyed pool store refreshed from a [`PoolSource`].
///
/// Only [`refresh`](Self::refresh) writes. Records are upserted by key with
/// full replacement and are never removed, so a failed fetch leaves the
/// previous snapshot authoritative.
#[derive(Debug)]
pub struct PoolStore {
    source: Arc<dyn PoolSource>,
    snapshot: RwLock<Snapshot>,
    disposed: AtomicBool,
    events: EventPublisher,
}

impl PoolStore {
    /// Create an empty store fed by `source`.
    pub fn new(source: Arc<dyn PoolSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(Snapshot::default()),
            disposed: AtomicBool::new(false),
            events: EventPublisher::new(),
        }
    }

    /// Fetch all pools and merge them into the store.
    ///
    /// Fetch errors are logged and reported as [`RefreshOutcome::Unchanged`],
    /// never propagated. One call's record set is applied under a single
    /// write lock; concurrent calls resolve per key, last writer wins.
    pub async fn refresh(&self) -> RefreshOutcome {
        if self.is_disposed() {
            return RefreshOutcome::Disposed;
        }

        let records = match self.source.fetch_pools().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Pool refresh failed, keeping previous snapshot: {}", e);
                return RefreshOutcome::Unchanged(e);
            }
        };

        // The store may have been torn down while the fetch was in flight.
        if self.is_disposed() {
            debug!("Dropping {} fetched pools for disposed store", records.len());
            return RefreshOutcome::Disposed;
        }

        let upserted = records.len();
        let keys: Vec<PoolKey> = records.iter().map(|r| r.key.clone()).collect();
        let now = Utc::now();
        {
            let mut snapshot = self.write();
            for record in records {
                snapshot.pools.insert(record.key.clone(), record);
            }
            snapshot.last_refreshed = Some(now);
        }

        info!("Pool refresh upserted {} records", upserted);
        self.events.publish(StateEvent::PoolsRefreshed { keys, at: now });

        RefreshOutcome::Updated { upserted }
    }

    pub fn get(&self, key: &PoolKey) -> Option<PoolRecord> {
        self.read().pools.get(key).cloned()
    }

    /// Copy of the whole store.
    pub fn snapshot(&self) -> HashMap<PoolKey, PoolRecord> {
        self.read().pools.clone()
    }

    pub fn keys(&self) -> Vec<PoolKey> {
        let mut keys: Vec<PoolKey> = self.read().pools.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.read().pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().pools.is_empty()
    }

    /// Time of the last successful refresh.
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.read().last_refreshed
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    /// Stop accepting writes. In-flight refreshes complete as no-ops.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Snapshot> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::MockPoolSource;
    use crate::domain::{DecimalAmount, TokenId};

    fn make_pool(key: &str, reserve_0: f64) -> PoolRecord {
        PoolRecord::new(
            PoolKey::new(key),
            TokenId::new("ICP"),
            TokenId::new("ckUSDC"),
            DecimalAmount::new(reserve_0),
            DecimalAmount::new(1.0),
        )
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = PoolStore::new(Arc::new(MockPoolSource::new()));
        assert!(store.is_empty());
        assert!(store.last_refreshed().is_none());
    }

    #[tokio::test]
    async fn test_refresh_populates_store() {
        let source = MockPoolSource::new()
            .with_pool(make_pool("a", 1.0))
            .with_pool(make_pool("b", 2.0));
        let store = PoolStore::new(Arc::new(source));

        assert_eq!(store.refresh().await, RefreshOutcome::Updated { upserted: 2 });
        assert_eq!(store.keys(), vec![PoolKey::new("a"), PoolKey::new("b")]);
        assert_eq!(store.get(&PoolKey::new("b")), Some(make_pool("b", 2.0)));
        assert!(store.last_refreshed().is_some());
    }

    #[tokio::test]
    async fn test_refresh_after_dispose_is_noop() {
        let source = Arc::new(MockPoolSource::new().with_pool(make_pool("a", 1.0)));
        let store = PoolStore::new(source.clone());
        store.dispose();

        assert_eq!(store.refresh().await, RefreshOutcome::Disposed);
        assert!(store.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_publishes_keys() {
        let store = PoolStore::new(Arc::new(
            MockPoolSource::new().with_pool(make_pool("a", 1.0)),
        ));
        let mut rx = store.subscribe();

        assert!(store.refresh().await.is_updated());
        match rx.recv().await.unwrap() {
            StateEvent::PoolsRefreshed { keys, .. } => assert_eq!(keys, vec![PoolKey::new("a")]),
            other => panic!("Expected PoolsRefreshed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_publishes_nothing() {
        let store = PoolStore::new(Arc::new(
            MockPoolSource::new().with_failure(FetchError::Network("down".to_string())),
        ));
        let mut rx = store.subscribe();

        assert!(matches!(store.refresh().await, RefreshOutcome::Unchanged(_)));
        assert!(rx.try_recv().is_err());
    }
}
