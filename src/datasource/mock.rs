//! Mock pool source for testing without network calls.

use super::{FetchError, PoolSource};
use crate::domain::PoolRecord;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Mock pool source returning scripted responses.
///
/// Queued responses are served first, in order; once the queue is drained
/// every call returns the fixed record set.
#[derive(Debug, Default)]
pub struct MockPoolSource {
    pools: Vec<PoolRecord>,
    scripted: Mutex<VecDeque<Result<Vec<PoolRecord>, FetchError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockPoolSource {
    /// Create a new mock source with no pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pool to the fixed record set.
    pub fn with_pool(mut self, pool: PoolRecord) -> Self {
        self.pools.push(pool);
        self
    }

    /// Add multiple pools to the fixed record set.
    pub fn with_pools(mut self, pools: Vec<PoolRecord>) -> Self {
        self.pools.extend(pools);
        self
    }

    /// Queue a one-shot response.
    pub fn with_response(self, response: Result<Vec<PoolRecord>, FetchError>) -> Self {
        self.queue(response);
        self
    }

    /// Queue a one-shot failure.
    pub fn with_failure(self, error: FetchError) -> Self {
        self.with_response(Err(error))
    }

    /// Suspend each fetch for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a response after construction.
    pub fn queue(&self, response: Result<Vec<PoolRecord>, FetchError>) {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PoolSource for MockPoolSource {
    async fn fetch_pools(&self) -> Result<Vec<PoolRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        next.unwrap_or_else(|| Ok(self.pools.clone()))
    }
}
