//! Client for the remote price aggregation service.

use super::FetchError;
use crate::actor::{decode_reply, ActorHandle};
use crate::domain::{RawTokenPrice, TokenPrice};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which aggregation query to call. The service exposes two alternative
/// methods; neither is treated as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceQuery {
    /// `get_all_token_prices`
    AllTokenPrices,
    /// `get_prices_from_ckusdc_pools`
    CkUsdcPools,
    /// `get_prices_from_ckusdc_pools_local`
    CkUsdcPoolsLocal,
}

impl PriceQuery {
    /// Candid method name on the price canister.
    pub fn method(&self) -> &'static str {
        match self {
            PriceQuery::AllTokenPrices => "get_all_token_prices",
            PriceQuery::CkUsdcPools => "get_prices_from_ckusdc_pools",
            PriceQuery::CkUsdcPoolsLocal => "get_prices_from_ckusdc_pools_local",
        }
    }
}

impl FromStr for PriceQuery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_token_prices" => Ok(PriceQuery::AllTokenPrices),
            "ckusdc_pools" => Ok(PriceQuery::CkUsdcPools),
            "ckusdc_pools_local" => Ok(PriceQuery::CkUsdcPoolsLocal),
            other => Err(format!(
                "must be all_token_prices, ckusdc_pools, or ckusdc_pools_local, got {}",
                other
            )),
        }
    }
}

impl fmt::Display for PriceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method())
    }
}

/// Read-only price queries. No arguments, no side effects, safe to retry.
#[derive(Debug, Clone)]
pub struct PriceClient {
    handle: ActorHandle,
    query: PriceQuery,
}

impl PriceClient {
    pub fn new(handle: ActorHandle, query: PriceQuery) -> Self {
        Self { handle, query }
    }

    pub fn query(&self) -> PriceQuery {
        self.query
    }

    pub async fn fetch_prices(&self) -> Result<Vec<TokenPrice>, FetchError> {
        debug!("Fetching prices via {}", self.query);
        let bytes = self.handle.query_bytes(self.query.method()).await?;
        prices_from_reply(self.query.method(), &bytes)
    }
}

fn prices_from_reply(method: &str, bytes: &[u8]) -> Result<Vec<TokenPrice>, FetchError> {
    let raw: Vec<RawTokenPrice> = decode_reply(method, bytes)?;
    Ok(raw.into_iter().map(TokenPrice::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_query_method_names() {
        assert_eq!(PriceQuery::AllTokenPrices.method(), "get_all_token_prices");
        assert_eq!(PriceQuery::CkUsdcPools.method(), "get_prices_from_ckusdc_pools");
        assert_eq!(
            PriceQuery::CkUsdcPoolsLocal.method(),
            "get_prices_from_ckusdc_pools_local"
        );
    }

    #[test]
    fn test_prices_from_reply() {
        let bytes = candid::encode_one(vec![
            ("ICP".to_string(), 8.25f64),
            ("ckBTC".to_string(), 61_000.0f64),
        ])
        .unwrap();
        let prices = prices_from_reply(PriceQuery::CkUsdcPools.method(), &bytes).unwrap();
        assert_eq!(
            prices,
            vec![TokenPrice::new("ICP", 8.25), TokenPrice::new("ckBTC", 61_000.0)]
        );
    }

    #[test]
    fn test_prices_reply_of_wrong_type_is_decode_error() {
        let bytes = candid::encode_one(vec![42u64]).unwrap();
        match prices_from_reply(PriceQuery::AllTokenPrices.method(), &bytes) {
            Err(FetchError::Decode(msg)) => assert!(msg.contains("get_all_token_prices")),
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_price_query_from_str() {
        assert_eq!(
            "all_token_prices".parse::<PriceQuery>(),
            Ok(PriceQuery::AllTokenPrices)
        );
        assert_eq!("ckusdc_pools".parse::<PriceQuery>(), Ok(PriceQuery::CkUsdcPools));
        assert!("nope".parse::<PriceQuery>().is_err());
    }
}
