//! Pool source querying the exchange canister.

use super::{FetchError, PoolSource};
use crate::actor::{decode_reply, ActorHandle};
use crate::domain::{PoolRecord, RawPoolRecord};
use async_trait::async_trait;
use tracing::debug;

/// Default query method returning `vec RawPoolRecord`.
pub const DEFAULT_POOL_QUERY: &str = "get_pools";

/// Fetches pools through an anonymous [`ActorHandle`] and normalizes their
/// fixed-point amounts.
#[derive(Debug, Clone)]
pub struct CanisterPoolSource {
    handle: ActorHandle,
    method: String,
}

impl CanisterPoolSource {
    pub fn new(handle: ActorHandle, method: impl Into<String>) -> Self {
        Self {
            handle,
            method: method.into(),
        }
    }

    pub fn with_default_method(handle: ActorHandle) -> Self {
        Self::new(handle, DEFAULT_POOL_QUERY)
    }
}

#[async_trait]
impl PoolSource for CanisterPoolSource {
    async fn fetch_pools(&self) -> Result<Vec<PoolRecord>, FetchError> {
        debug!(
            "Fetching pools via {} on {}",
            self.method,
            self.handle.canister_id()
        );

        let bytes = self.handle.query_bytes(&self.method).await?;
        pools_from_reply(&self.method, &bytes)
    }
}

/// Decode a `vec RawPoolRecord` reply and normalize it.
fn pools_from_reply(method: &str, bytes: &[u8]) -> Result<Vec<PoolRecord>, FetchError> {
    let raw: Vec<RawPoolRecord> = decode_reply(method, bytes)?;
    normalize_records(raw)
}

/// Normalize every record; one bad amount fails the whole batch so that a
/// partially converted set never reaches the store.
fn normalize_records(raw: Vec<RawPoolRecord>) -> Result<Vec<PoolRecord>, FetchError> {
    raw.into_iter()
        .map(|record| {
            let key = record.key.clone();
            PoolRecord::try_from(record).map_err(|e| FetchError::InvalidRecord {
                key,
                message: e.to_string(),
            })
        })
        .collect()
}
