//! Domain types for the exchange synchronization layer.
//!
//! This module provides:
//! - Raw fixed-point amounts and their decimal normalization
//! - Domain primitives: PoolKey, TokenId
//! - Pool, price, and fee records together with their wire forms

pub mod amount;
pub mod fees;
pub mod pool;
pub mod price;
pub mod primitives;

pub use amount::{normalize, AmountError, DecimalAmount, MonetaryAmount, DIVISOR};
pub use fees::{FeeTotals, RawFeeTotals};
pub use pool::{PoolRecord, RawPoolRecord};
pub use price::{RawTokenPrice, TokenPrice};
pub use primitives::{PoolKey, TokenId};
