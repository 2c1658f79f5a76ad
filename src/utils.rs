use log::trace;

use crate::ErrorCode;

/// `10^decimals` as a float, the scale between smallest unit and human unit.
pub fn decimal_scale(decimals: u8) -> f64 {
    10f64.powi(i32::from(decimals))
}

/// Smallest-unit integer to human units.
pub fn to_decimal(raw_amount: u64, decimals: u8) -> f64 {
    raw_amount as f64 / decimal_scale(decimals)
}

/// Human units to smallest-unit integer, truncating. Negative and NaN
/// inputs saturate to 0, values past `u64::MAX` saturate to `u64::MAX`.
pub fn to_raw_amount(amount: f64, decimals: u8) -> u64 {
    (amount * decimal_scale(decimals)) as u64
}

/// Parse a decimal-integer string in smallest units, as returned by RPC.
pub fn parse_raw_amount(value: &str) -> Result<u64, ErrorCode> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        trace!("rejecting raw amount {:?}", value);
        return Err(ErrorCode::InvalidInput);
    }
    trimmed.parse::<u64>().map_err(|_| ErrorCode::MathOverflow)
}

/// Check a user-entered human-unit amount before handing it to the math.
pub fn validate_amount(amount: f64) -> Result<f64, ErrorCode> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ErrorCode::InvalidAmount);
    }
    Ok(amount)
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

pub fn ceil_div(token_amount: u128, fee_numerator: u128, fee_denominator: u128) -> Option<u128> {
    token_amount
        .checked_mul(fee_numerator)?
        .checked_add(fee_denominator)?
        .checked_sub(1)?
        .checked_div(fee_denominator)
}

pub fn floor_div(token_amount: u128, fee_numerator: u128, fee_denominator: u128) -> Option<u128> {
    token_amount
        .checked_mul(fee_numerator)?
        .checked_div(fee_denominator)
}

/// Integer square root, rounded down (Newton's method).
pub fn sqrt_u128(radicand: u128) -> u128 {
    if radicand < 2 {
        return radicand;
    }
    // start above the root so the sequence decreases monotonically
    let shift = (128 - radicand.leading_zeros() + 1) / 2;
    let mut x = 1u128 << shift;
    loop {
        let y = (x + radicand / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_to_decimal() {
        assert_relative_eq!(to_decimal(1_500_000_000, 9), 1.5);
        assert_relative_eq!(to_decimal(2_500_000, 6), 2.5);
        assert_eq!(to_decimal(0, 9), 0.0);
        assert_eq!(to_decimal(7, 0), 7.0);
    }

    #[test]
    fn test_to_raw_amount() {
        assert_eq!(to_raw_amount(1.5, 9), 1_500_000_000);
        assert_eq!(to_raw_amount(-1.0, 9), 0);
        assert_eq!(to_raw_amount(f64::NAN, 9), 0);
    }

    #[test]
    fn test_parse_raw_amount() {
        assert_eq!(parse_raw_amount("0").unwrap(), 0);
        assert_eq!(parse_raw_amount(" 31622776601 ").unwrap(), 31_622_776_601);
        assert!(matches!(parse_raw_amount(""), Err(ErrorCode::InvalidInput)));
        assert!(matches!(parse_raw_amount("1.5"), Err(ErrorCode::InvalidInput)));
        assert!(matches!(parse_raw_amount("1e9"), Err(ErrorCode::InvalidInput)));
        assert!(matches!(
            parse_raw_amount("99999999999999999999999"),
            Err(ErrorCode::MathOverflow)
        ));
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(0.0).unwrap(), 0.0);
        assert_eq!(validate_amount(12.5).unwrap(), 12.5);
        assert!(validate_amount(-0.1).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ceil_and_floor_div() {
        assert_eq!(ceil_div(1000, 2500, 1_000_000), Some(3));
        assert_eq!(floor_div(1000, 2500, 1_000_000), Some(2));
        assert_eq!(ceil_div(0, 2500, 1_000_000), Some(0));
        assert_eq!(floor_div(u128::MAX, 2, 1), None);
    }

    #[test]
    fn test_sqrt_small_values() {
        assert_eq!(sqrt_u128(0), 0);
        assert_eq!(sqrt_u128(1), 1);
        assert_eq!(sqrt_u128(3), 1);
        assert_eq!(sqrt_u128(4), 2);
        assert_eq!(sqrt_u128(2_000_000), 1414);
        assert_eq!(sqrt_u128(u128::MAX), u64::MAX as u128);
    }

    proptest! {
        #[test]
        fn test_sqrt_matches_spl_math(radicand in 0..u128::MAX) {
            let expected = spl_math::approximations::sqrt(radicand).unwrap();
            prop_assert_eq!(sqrt_u128(radicand), expected);
        }

        #[test]
        fn test_sqrt_is_floor(radicand in 0..(u64::MAX as u128)) {
            let root = sqrt_u128(radicand);
            prop_assert!(root * root <= radicand);
            prop_assert!((root + 1) * (root + 1) > radicand);
        }
    }
}
