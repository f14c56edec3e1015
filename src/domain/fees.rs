//! Collected fee totals, raw and normalized.

use crate::domain::amount::{normalize, AmountError, MonetaryAmount};
use crate::domain::DecimalAmount;
use serde::{Deserialize, Serialize};

/// Absolute fee totals as delivered by the exchange, in fixed point.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeeTotals {
    /// Lifetime total.
    pub total: MonetaryAmount,
    /// Collected since the last reward distribution.
    pub from_last_reward_distribution: MonetaryAmount,
}

impl RawFeeTotals {
    pub fn new(
        total: impl Into<MonetaryAmount>,
        from_last_reward_distribution: impl Into<MonetaryAmount>,
    ) -> Self {
        Self {
            total: total.into(),
            from_last_reward_distribution: from_last_reward_distribution.into(),
        }
    }
}

/// Normalized fee totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTotals {
    pub total: DecimalAmount,
    pub from_last_reward_distribution: DecimalAmount,
}

impl TryFrom<&RawFeeTotals> for FeeTotals {
    type Error = AmountError;

    fn try_from(raw: &RawFeeTotals) -> Result<Self, Self::Error> {
        Ok(FeeTotals {
            total: normalize(&raw.total)?,
            from_last_reward_distribution: normalize(&raw.from_last_reward_distribution)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_totals_json_is_camel_case() {
        let totals = FeeTotals {
            total: DecimalAmount::new(0.5),
            from_last_reward_distribution: DecimalAmount::new(0.001),
        };
        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["total"], 0.5);
        assert_eq!(json["fromLastRewardDistribution"], 0.001);
    }

    #[test]
    fn test_conversion_fails_if_either_field_invalid() {
        let raw = RawFeeTotals::new(500_000u64, "not a number");
        assert!(FeeTotals::try_from(&raw).is_err());
    }
}
