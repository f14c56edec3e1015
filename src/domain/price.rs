//! Token price quote from the remote price service.

use candid::CandidType;
use serde::{Deserialize, Serialize};

/// `(identifier, price)` pair returned by the price aggregation queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    /// Token identifier (ledger canister id or symbol).
    pub token: String,
    /// Price in the aggregation's quote currency.
    pub price: f64,
}

impl TokenPrice {
    pub fn new(token: impl Into<String>, price: f64) -> Self {
        Self {
            token: token.into(),
            price,
        }
    }
}

/// Wire form of a price quote: a candid `record { text; float64 }`.
#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub struct RawTokenPrice(pub String, pub f64);

impl From<RawTokenPrice> for TokenPrice {
    fn from(raw: RawTokenPrice) -> Self {
        TokenPrice::new(raw.0, raw.1)
    }
}
