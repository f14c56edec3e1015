//! Fixed-point amounts as received from remote services, and their
//! human-scale decimal form.
//!
//! Every raw amount that reaches observable state goes through [`normalize`]
//! exactly once, always with the same [`DIVISOR`].

use candid::{Int, Nat};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Scale factor of the fixed-point representation used by the exchange
/// services (six decimals).
pub const DIVISOR: u64 = 1_000_000;

/// Error raised when a raw amount cannot be coerced to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Raw fixed-point value as transmitted by a remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum MonetaryAmount {
    /// Unbounded natural number (candid `nat`).
    Nat(Nat),
    /// Unbounded signed integer (candid `int`).
    Int(Int),
    /// Value already carried as a double on the wire.
    Float(f64),
    /// Textual number, e.g. from a JSON payload or candid text form.
    Text(String),
}

impl MonetaryAmount {
    /// Coerce the raw value to a double.
    ///
    /// Integers beyond the double range yield a lossy (possibly infinite)
    /// result rather than an error.
    pub fn to_f64(&self) -> Result<f64, AmountError> {
        match self {
            MonetaryAmount::Nat(n) => n
                .0
                .to_f64()
                .ok_or_else(|| AmountError::InvalidAmount(n.to_string())),
            MonetaryAmount::Int(i) => i
                .0
                .to_f64()
                .ok_or_else(|| AmountError::InvalidAmount(i.to_string())),
            MonetaryAmount::Float(f) if f.is_nan() => {
                Err(AmountError::InvalidAmount("NaN".to_string()))
            }
            MonetaryAmount::Float(f) => Ok(*f),
            MonetaryAmount::Text(s) => parse_text(s),
        }
    }
}

fn parse_text(s: &str) -> Result<f64, AmountError> {
    let cleaned: String = s.trim().chars().filter(|c| *c != '_').collect();
    let numeric = !cleaned.is_empty()
        && cleaned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if !numeric {
        return Err(AmountError::InvalidAmount(s.to_string()));
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| AmountError::InvalidAmount(s.to_string()))
}

impl From<Nat> for MonetaryAmount {
    fn from(value: Nat) -> Self {
        MonetaryAmount::Nat(value)
    }
}

impl From<Int> for MonetaryAmount {
    fn from(value: Int) -> Self {
        MonetaryAmount::Int(value)
    }
}

impl From<u64> for MonetaryAmount {
    fn from(value: u64) -> Self {
        MonetaryAmount::Nat(Nat::from(value))
    }
}

impl From<u128> for MonetaryAmount {
    fn from(value: u128) -> Self {
        MonetaryAmount::Nat(Nat::from(value))
    }
}

impl From<i64> for MonetaryAmount {
    fn from(value: i64) -> Self {
        MonetaryAmount::Int(Int::from(value))
    }
}

impl From<f64> for MonetaryAmount {
    fn from(value: f64) -> Self {
        MonetaryAmount::Float(value)
    }
}

impl From<&str> for MonetaryAmount {
    fn from(value: &str) -> Self {
        MonetaryAmount::Text(value.to_string())
    }
}

impl From<String> for MonetaryAmount {
    fn from(value: String) -> Self {
        MonetaryAmount::Text(value)
    }
}

impl TryFrom<&serde_json::Value> for MonetaryAmount {
    type Error = AmountError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(MonetaryAmount::from(u))
                } else if let Some(i) = n.as_i64() {
                    Ok(MonetaryAmount::from(i))
                } else {
                    n.as_f64()
                        .map(MonetaryAmount::Float)
                        .ok_or_else(|| AmountError::InvalidAmount(n.to_string()))
                }
            }
            serde_json::Value::String(s) => Ok(MonetaryAmount::Text(s.clone())),
            other => Err(AmountError::InvalidAmount(other.to_string())),
        }
    }
}

/// Human-scale amount, `raw / DIVISOR`.
///
/// Intended for display and UI-level arithmetic, not settlement.
/// Serializes as a plain JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalAmount(f64);

impl DecimalAmount {
    pub fn new(value: f64) -> Self {
        DecimalAmount(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn zero() -> Self {
        DecimalAmount(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DecimalAmount> for f64 {
    fn from(value: DecimalAmount) -> Self {
        value.0
    }
}

/// Convert a raw amount to its decimal form using [`DIVISOR`].
pub fn normalize(raw: &MonetaryAmount) -> Result<DecimalAmount, AmountError> {
    Ok(DecimalAmount(raw.to_f64()? / DIVISOR as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_integer_is_exact_division() {
        for raw in [0u64, 1, 999_999, 1_000_000, 123_456_789, 9_007_199_254_740_991] {
            let result = normalize(&MonetaryAmount::from(raw)).unwrap();
            assert_eq!(result.value(), raw as f64 / DIVISOR as f64, "raw = {}", raw);
        }
    }

    #[test]
    fn test_normalize_signed_int() {
        let result = normalize(&MonetaryAmount::from(-2_500_000i64)).unwrap();
        assert_eq!(result.value(), -2.5);
    }

    #[test]
    fn test_normalize_beyond_safe_range_is_lossy_not_error() {
        let result = normalize(&MonetaryAmount::from(u128::MAX)).unwrap();
        let expected = u128::MAX as f64 / DIVISOR as f64;
        assert!((result.value() - expected).abs() / expected < 1e-12);

        let overflow = normalize(&MonetaryAmount::from("9".repeat(400))).unwrap();
        assert!(overflow.value().is_infinite());
    }

    #[test]
    fn test_normalize_text_with_candid_separators() {
        let result = normalize(&MonetaryAmount::from("1_500_000")).unwrap();
        assert_eq!(result.value(), 1.5);
    }

    #[test]
    fn test_normalize_rejects_non_numeric_text() {
        for bad in ["", "abc", "12x", "NaN", "inf", "  "] {
            let err = normalize(&MonetaryAmount::from(bad)).unwrap_err();
            assert!(matches!(err, AmountError::InvalidAmount(_)), "input {:?}", bad);
        }
    }

    #[test]
    fn test_normalize_rejects_nan_float() {
        assert!(normalize(&MonetaryAmount::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_json_value_coercion() {
        let from_number = MonetaryAmount::try_from(&serde_json::json!(250000)).unwrap();
        assert_eq!(normalize(&from_number).unwrap().value(), 0.25);

        let from_string = MonetaryAmount::try_from(&serde_json::json!("750000")).unwrap();
        assert_eq!(normalize(&from_string).unwrap().value(), 0.75);

        assert!(MonetaryAmount::try_from(&serde_json::json!(null)).is_err());
        assert!(MonetaryAmount::try_from(&serde_json::json!({"x": 1})).is_err());
    }

    #[test]
    fn test_decimal_amount_serializes_as_number() {
        let json = serde_json::to_value(DecimalAmount::new(0.5)).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "0.5");
    }

    #[test]
    fn test_decimal_amount_display() {
        assert_eq!(DecimalAmount::new(0.001).to_string(), "0.001");
    }
}
