//! Observable synchronized state owned by the application.
//!
//! There are no globals: a [`SyncState`] is built once at startup and handed
//! to whatever needs to read or refresh it.

use crate::datasource::PoolSource;
use std::sync::Arc;

pub mod events;
pub mod fees;
pub mod pools;

pub use events::{EventPublisher, StateEvent};
pub use fees::FeeAccountingState;
pub use pools::{PoolStore, RefreshOutcome};

#[derive(Debug, Clone)]
pub struct SyncState {
    pub pools: Arc<PoolStore>,
    pub fees: Arc<FeeAccountingState>,
}

impl SyncState {
    pub fn new(pool_source: Arc<dyn PoolSource>) -> Self {
        Self {
            pools: Arc::new(PoolStore::new(pool_source)),
            fees: Arc::new(FeeAccountingState::new()),
        }
    }

    /// Tear down: later pool refreshes become no-ops.
    pub fn dispose(&self) {
        self.pools.dispose();
    }
}
