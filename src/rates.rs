//! Spot rates and price helpers
//!
//! All functions here take reserves in smallest units together with their
//! decimals and return human-unit values. An empty side of the pool never
//! produces `NaN` or `Infinity`; the affected value is 0 instead.

use log::trace;

use crate::{
    state::{ExchangeRate, PoolReserves},
    utils::{safe_div, to_decimal},
    MIN_FIXED_PRICE,
};

/// Calculate the spot exchange rate between the two tokens
///
/// # Arguments
/// * `reserve_a` - Reserve of token A, smallest unit
/// * `reserve_b` - Reserve of token B, smallest unit
/// * `decimals_a` - Decimals of token A
/// * `decimals_b` - Decimals of token B
///
/// # Returns
/// `a_to_b` (B per A) and `b_to_a` (A per B), both 0 if either reserve is 0
pub fn calculate_exchange_rate(
    reserve_a: u64,
    reserve_b: u64,
    decimals_a: u8,
    decimals_b: u8,
) -> ExchangeRate {
    let reserve_a = to_decimal(reserve_a, decimals_a);
    let reserve_b = to_decimal(reserve_b, decimals_b);

    if reserve_a == 0.0 || reserve_b == 0.0 {
        trace!("empty reserve, exchange rate undefined");
        return ExchangeRate::default();
    }

    ExchangeRate {
        a_to_b: reserve_b / reserve_a,
        b_to_a: reserve_a / reserve_b,
    }
}

/// Amount of token B that matches `amount_a` at the current pool ratio.
///
/// This is the ratio used to size a liquidity deposit. It ignores the price
/// movement a swap would cause, so it is not a swap output estimate.
pub fn calculate_expected_token_b(
    amount_a: f64,
    reserve_a: u64,
    reserve_b: u64,
    decimals_a: u8,
    decimals_b: u8,
) -> f64 {
    let reserve_a = to_decimal(reserve_a, decimals_a);
    let reserve_b = to_decimal(reserve_b, decimals_b);

    if reserve_a == 0.0 || amount_a == 0.0 {
        return 0.0;
    }

    amount_a * (reserve_b / reserve_a)
}

/// Amount of token A that matches `amount_b` at the current pool ratio.
pub fn calculate_expected_token_a(
    amount_b: f64,
    reserve_a: u64,
    reserve_b: u64,
    decimals_a: u8,
    decimals_b: u8,
) -> f64 {
    let reserve_a = to_decimal(reserve_a, decimals_a);
    let reserve_b = to_decimal(reserve_b, decimals_b);

    if reserve_b == 0.0 || amount_b == 0.0 {
        return 0.0;
    }

    amount_b * (reserve_a / reserve_b)
}

/// Size of a deposit relative to the pool, in percent of the larger side.
///
/// Returns 0 when either reserve is empty.
pub fn calculate_price_impact(amount_a: f64, amount_b: f64, reserves: &PoolReserves) -> f64 {
    let reserve_a = to_decimal(reserves.token_a.reserve, reserves.token_a.decimals);
    let reserve_b = to_decimal(reserves.token_b.reserve, reserves.token_b.decimals);

    if reserve_a == 0.0 || reserve_b == 0.0 {
        return 0.0;
    }

    let impact_a = safe_div(amount_a, reserve_a) * 100.0;
    let impact_b = safe_div(amount_b, reserve_b) * 100.0;

    impact_a.max(impact_b)
}

/// Render a price for display.
///
/// Tiny prices switch to exponential notation, everything else is fixed
/// with fewer fraction digits the larger the price gets. `max_decimals`
/// only ever lowers the digit count of a tier.
pub fn format_price(price: f64, max_decimals: usize) -> String {
    if price == 0.0 {
        return "0".to_string();
    }

    if price < MIN_FIXED_PRICE {
        return format!("{:.2e}", price);
    }

    let decimals = if price < 1.0 {
        6usize.min(max_decimals)
    } else if price <= 1000.0 {
        4usize.min(max_decimals)
    } else {
        2usize.min(max_decimals)
    };

    format!("{:.*}", decimals, price)
}

impl PoolReserves {
    pub fn exchange_rate(&self) -> ExchangeRate {
        calculate_exchange_rate(
            self.token_a.reserve,
            self.token_b.reserve,
            self.token_a.decimals,
            self.token_b.decimals,
        )
    }

    pub fn expected_token_b(&self, amount_a: f64) -> f64 {
        calculate_expected_token_b(
            amount_a,
            self.token_a.reserve,
            self.token_b.reserve,
            self.token_a.decimals,
            self.token_b.decimals,
        )
    }

    pub fn expected_token_a(&self, amount_b: f64) -> f64 {
        calculate_expected_token_a(
            amount_b,
            self.token_a.reserve,
            self.token_b.reserve,
            self.token_a.decimals,
            self.token_b.decimals,
        )
    }

    pub fn price_impact(&self, amount_a: f64, amount_b: f64) -> f64 {
        calculate_price_impact(amount_a, amount_b, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::TokenReserve, DEFAULT_DECIMALS, DEFAULT_PRICE_DECIMALS};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn pool(reserve_a: u64, reserve_b: u64) -> PoolReserves {
        PoolReserves::new(
            TokenReserve::new("mintA", reserve_a, 9),
            TokenReserve::new("mintB", reserve_b, 9),
            0,
        )
    }

    #[test]
    fn test_exchange_rate_1000_to_1() {
        let rate = calculate_exchange_rate(1_000_000_000_000, 1_000_000_000, 9, 9);
        assert_relative_eq!(rate.a_to_b, 0.001);
        assert_relative_eq!(rate.b_to_a, 1000.0);
    }

    #[test]
    fn test_exchange_rate_mixed_decimals() {
        // 10 SOL against 1500 USDC
        let rate = calculate_exchange_rate(10_000_000_000, 1_500_000_000, 9, 6);
        assert_relative_eq!(rate.a_to_b, 150.0);
        assert_relative_eq!(rate.b_to_a, 1.0 / 150.0);
    }

    #[test]
    fn test_exchange_rate_empty_pool() {
        assert_eq!(calculate_exchange_rate(0, 1_000, 9, 9), ExchangeRate::default());
        assert_eq!(calculate_exchange_rate(1_000, 0, 9, 9), ExchangeRate::default());
        assert_eq!(calculate_exchange_rate(0, 0, 9, 9), ExchangeRate::default());
    }

    #[test]
    fn test_expected_tokens() {
        let reserves = pool(1_000_000_000_000, 1_000_000_000);
        assert_relative_eq!(reserves.expected_token_b(100.0), 0.1);
        assert_relative_eq!(reserves.expected_token_a(0.1), 100.0, max_relative = 1e-12);
        assert_eq!(reserves.expected_token_b(0.0), 0.0);
        assert_eq!(reserves.expected_token_a(0.0), 0.0);
    }

    #[test]
    fn test_expected_tokens_zero_reserve() {
        assert_eq!(calculate_expected_token_b(5.0, 0, 1_000, 9, 9), 0.0);
        assert_eq!(calculate_expected_token_a(5.0, 1_000, 0, 9, 9), 0.0);
        // the other reserve being empty is a valid ratio of 0
        assert_eq!(calculate_expected_token_b(5.0, 1_000, 0, 9, 9), 0.0);
    }

    #[test]
    fn test_price_impact() {
        let reserves = pool(1_000_000_000_000, 1_000_000_000);
        assert_relative_eq!(reserves.price_impact(100.0, 0.1), 10.0, max_relative = 1e-12);
        assert_relative_eq!(reserves.price_impact(10.0, 0.5), 50.0, max_relative = 1e-12);
        assert_eq!(pool(0, 1_000_000_000).price_impact(1.0, 1.0), 0.0);
        assert_eq!(pool(1_000_000_000, 0).price_impact(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_format_price_tiers() {
        assert_eq!(format_price(0.0, DEFAULT_PRICE_DECIMALS), "0");
        assert_eq!(format_price(0.0000005, DEFAULT_PRICE_DECIMALS), "5.00e-7");
        assert_eq!(format_price(0.0000001, DEFAULT_PRICE_DECIMALS), "1.00e-7");
        assert_eq!(format_price(0.001, DEFAULT_PRICE_DECIMALS), "0.001000");
        assert_eq!(format_price(1.0, DEFAULT_PRICE_DECIMALS), "1.0000");
        assert_eq!(format_price(1000.0, DEFAULT_PRICE_DECIMALS), "1000.0000");
        assert_eq!(format_price(12345.6789, DEFAULT_PRICE_DECIMALS), "12345.68");
    }

    #[test]
    fn test_format_price_max_decimals_caps_tier() {
        assert_eq!(format_price(0.123456, 2), "0.12");
        assert_eq!(format_price(3.14159, 1), "3.1");
        assert_eq!(format_price(12345.6789, 0), "12346");
        // a larger cap does not add digits
        assert_eq!(format_price(3.14159, 10), "3.1416");
    }

    proptest! {
        #[test]
        fn test_exchange_rate_inverse(
            reserve_a in 1..u64::MAX,
            reserve_b in 1..u64::MAX,
            decimals_a in 0..=DEFAULT_DECIMALS,
            decimals_b in 0..=DEFAULT_DECIMALS,
        ) {
            let rate = calculate_exchange_rate(reserve_a, reserve_b, decimals_a, decimals_b);
            prop_assert!((rate.a_to_b * rate.b_to_a - 1.0).abs() < 1e-9);
        }

        #[test]
        fn test_expected_amount_round_trip(
            amount in 1e-6f64..1e9,
            reserve_a in 1_000u64..u64::MAX,
            reserve_b in 1_000u64..u64::MAX,
        ) {
            let reserves = pool(reserve_a, reserve_b);
            let amount_a = reserves.expected_token_a(amount);
            let back = reserves.expected_token_b(amount_a);
            prop_assert!((back - amount).abs() <= amount * 1e-9);
        }

        #[test]
        fn test_zero_reserve_never_produces_non_finite(
            amount_a in 0f64..1e12,
            amount_b in 0f64..1e12,
            reserve in 0u64..u64::MAX,
        ) {
            for reserves in [pool(0, reserve), pool(reserve, 0)] {
                let rate = reserves.exchange_rate();
                prop_assert!(rate.a_to_b.is_finite() && rate.b_to_a.is_finite());
                prop_assert!(reserves.expected_token_a(amount_b).is_finite());
                prop_assert!(reserves.expected_token_b(amount_a).is_finite());
                prop_assert_eq!(reserves.price_impact(amount_a, amount_b), 0.0);
            }
        }
    }
}
