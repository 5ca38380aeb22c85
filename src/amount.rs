//! Amount normalization - human-entered token amounts to integer base units.
//!
//! A transfer primitive takes the smallest indivisible denomination of the
//! token (uatom-style base units), while the operator types a decimal token
//! amount. `normalize` bridges the two.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{Result, SendrError};

/// Largest decimal exponent representable in a `Decimal` multiplier.
const MAX_DECIMAL_EXPONENT: u32 = 28;

/// Convert a decimal token amount into integer base units.
///
/// Computes `floor(amount * 10^decimal_exponent)`, truncating any fractional
/// base unit rather than rounding. The exponent is a property of the
/// destination chain's token and must be supplied from configuration, never
/// guessed: a mismatched exponent silently under- or over-funds transfers,
/// which this function cannot detect.
pub fn normalize(amount: Decimal, decimal_exponent: u32) -> Result<u128> {
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(SendrError::InvalidAmount(
            "token amount must be greater than zero".to_string(),
        ));
    }

    if decimal_exponent > MAX_DECIMAL_EXPONENT {
        return Err(SendrError::InvalidAmount(format!(
            "decimal exponent {} exceeds supported maximum {}",
            decimal_exponent, MAX_DECIMAL_EXPONENT
        )));
    }

    let multiplier = Decimal::from_i128_with_scale(10_i128.pow(decimal_exponent), 0);

    let scaled = amount.checked_mul(multiplier).ok_or_else(|| {
        SendrError::InvalidAmount(format!(
            "{} * 10^{} is not representable",
            amount, decimal_exponent
        ))
    })?;

    scaled.trunc().to_u128().ok_or_else(|| {
        SendrError::InvalidAmount(format!(
            "{} * 10^{} does not fit in an unsigned integer",
            amount, decimal_exponent
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_whole_amount() {
        assert_eq!(normalize(dec("1"), 6).unwrap(), 1_000_000);
        assert_eq!(normalize(dec("25"), 6).unwrap(), 25_000_000);
    }

    #[test]
    fn test_normalize_fractional_amount() {
        assert_eq!(normalize(dec("1.5"), 6).unwrap(), 1_500_000);
        assert_eq!(normalize(dec("0.000001"), 6).unwrap(), 1);
    }

    #[test]
    fn test_normalize_truncates_sub_base_units() {
        // 0.0000015 token at 6 decimals is 1.5 base units - floor, not round
        assert_eq!(normalize(dec("0.0000015"), 6).unwrap(), 1);
        assert_eq!(normalize(dec("0.0000019"), 6).unwrap(), 1);
    }

    #[test]
    fn test_normalize_zero_exponent() {
        assert_eq!(normalize(dec("3.7"), 0).unwrap(), 3);
    }

    #[test]
    fn test_normalize_eighteen_decimals() {
        assert_eq!(
            normalize(dec("1.5"), 18).unwrap(),
            1_500_000_000_000_000_000
        );
    }

    #[test]
    fn test_normalize_zero_amount_fails() {
        let err = normalize(Decimal::ZERO, 6).unwrap_err();
        assert!(matches!(err, SendrError::InvalidAmount(_)));
    }

    #[test]
    fn test_normalize_negative_amount_fails() {
        let err = normalize(dec("-1.5"), 6).unwrap_err();
        assert!(matches!(err, SendrError::InvalidAmount(_)));
    }

    #[test]
    fn test_normalize_excessive_exponent_fails() {
        let err = normalize(dec("1"), 29).unwrap_err();
        assert!(matches!(err, SendrError::InvalidAmount(_)));
    }

    #[test]
    fn test_normalize_overflow_fails() {
        let err = normalize(dec("79228162514264337593543950335"), 28).unwrap_err();
        assert!(matches!(err, SendrError::InvalidAmount(_)));
    }

    #[test]
    fn test_normalize_is_monotonic() {
        let amounts = ["0.1", "0.5", "1", "1.000001", "2", "100.25"];
        let normalized: Vec<u128> = amounts
            .iter()
            .map(|a| normalize(dec(a), 6).unwrap())
            .collect();
        for pair in normalized.windows(2) {
            assert!(pair[0] <= pair[1], "normalize must be monotonic in amount");
        }
    }
}
