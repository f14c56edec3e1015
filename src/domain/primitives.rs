//! Domain primitives: PoolKey, TokenId.

use serde::{Deserialize, Serialize};

/// Stable pool identifier, e.g. `"ckBTC_ckUSDT"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolKey(pub String);

impl PoolKey {
    /// Create a PoolKey from a string.
    pub fn new(key: impl Into<String>) -> Self {
        PoolKey(key.into())
    }

    /// Get the key as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PoolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token identity (ledger canister id or symbol).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub String);

impl TokenId {
    /// Create a TokenId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        TokenId(id.into())
    }

    /// Get the token id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
