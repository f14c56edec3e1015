//! Liquidity pool snapshot.

use crate::domain::amount::{normalize, AmountError, MonetaryAmount};
use crate::domain::{DecimalAmount, PoolKey, TokenId};
use candid::{CandidType, Nat};
use serde::{Deserialize, Serialize};

/// Current reserves and price snapshot of a liquidity pool.
///
/// Records are replaced wholesale by key; optional fields absent from a
/// newer record are absent from the store afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    /// Pool identifier.
    pub key: PoolKey,
    pub token_0: TokenId,
    pub token_1: TokenId,
    pub reserve_0: DecimalAmount,
    pub reserve_1: DecimalAmount,
    /// Price of token_0 in units of token_1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvl_usd: Option<DecimalAmount>,
    /// LP fee in basis points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lp_fee_bps: Option<u32>,
}

impl PoolRecord {
    /// Create a record with reserves only; price fields start empty.
    pub fn new(
        key: PoolKey,
        token_0: TokenId,
        token_1: TokenId,
        reserve_0: DecimalAmount,
        reserve_1: DecimalAmount,
    ) -> Self {
        Self {
            key,
            token_0,
            token_1,
            reserve_0,
            reserve_1,
            price: None,
            price_usd: None,
            tvl_usd: None,
            lp_fee_bps: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_price_usd(mut self, price_usd: f64) -> Self {
        self.price_usd = Some(price_usd);
        self
    }

    pub fn with_tvl_usd(mut self, tvl_usd: DecimalAmount) -> Self {
        self.tvl_usd = Some(tvl_usd);
        self
    }

    pub fn with_lp_fee_bps(mut self, lp_fee_bps: u32) -> Self {
        self.lp_fee_bps = Some(lp_fee_bps);
        self
    }
}

/// Pool record as returned by the exchange canister, amounts in fixed point.
#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub struct RawPoolRecord {
    pub key: String,
    pub token_0: String,
    pub token_1: String,
    pub reserve_0: Nat,
    pub reserve_1: Nat,
    pub price: Option<f64>,
    pub price_usd: Option<f64>,
    pub tvl_usd: Option<Nat>,
    pub lp_fee_bps: Option<u32>,
}

impl TryFrom<RawPoolRecord> for PoolRecord {
    type Error = AmountError;

    fn try_from(raw: RawPoolRecord) -> Result<Self, Self::Error> {
        let tvl_usd = raw
            .tvl_usd
            .map(|tvl| normalize(&MonetaryAmount::Nat(tvl)))
            .transpose()?;

        Ok(PoolRecord {
            key: PoolKey::new(raw.key),
            token_0: TokenId::new(raw.token_0),
            token_1: TokenId::new(raw.token_1),
            reserve_0: normalize(&MonetaryAmount::Nat(raw.reserve_0))?,
            reserve_1: normalize(&MonetaryAmount::Nat(raw.reserve_1))?,
            price: raw.price,
            price_usd: raw.price_usd,
            tvl_usd,
            lp_fee_bps: raw.lp_fee_bps,
        })
    }
}
