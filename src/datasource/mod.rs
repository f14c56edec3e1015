//! Pool and price sources backed by the exchange canisters.

use crate::actor::ActorError;
use crate::domain::PoolRecord;
use async_trait::async_trait;
use std::fmt;

pub mod canister;
pub mod mock;
pub mod prices;

pub use canister::CanisterPoolSource;
pub use mock::MockPoolSource;
pub use prices::{PriceClient, PriceQuery};

/// Source of liquidity pool snapshots.
///
/// Implementations return already-normalized records; timeouts are their
/// own concern.
#[async_trait]
pub trait PoolSource: Send + Sync + fmt::Debug {
    /// Fetch the current record of every pool. Ordering is not significant.
    async fn fetch_pools(&self) -> Result<Vec<PoolRecord>, FetchError>;
}

/// Error type for remote fetches.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Transport or agent failure before a reply arrived
    Network(String),
    /// The replica or canister rejected the query
    Rejected(String),
    /// Reply could not be decoded into the expected candid type
    Decode(String),
    /// A decoded record carried an amount that could not be normalized
    InvalidRecord { key: String, message: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Rejected(msg) => write!(f, "Rejected: {}", msg),
            FetchError::Decode(msg) => write!(f, "Decode error: {}", msg),
            FetchError::InvalidRecord { key, message } => {
                write!(f, "Invalid record {}: {}", key, message)
            }
        }
    }
}

impl std::error::Error for FetchError {}

impl From<ActorError> for FetchError {
    fn from(err: ActorError) -> Self {
        match err {
            ActorError::Decode { .. } => FetchError::Decode(err.to_string()),
            ActorError::Call { .. } | ActorError::Connection(_) => {
                FetchError::Network(err.to_string())
            }
            ActorError::Rejected { .. } | ActorError::InvalidAddress(_) => {
                FetchError::Rejected(err.to_string())
            }
        }
    }
}
