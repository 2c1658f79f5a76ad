use crate::{
    state::{PoolReserves, SlippageValidation},
    utils::to_decimal,
    ErrorCode, BPS_PER_PERCENT, HIGH_IMPACT_SLIPPAGE, HIGH_IMPACT_THRESHOLD,
    IMPACT_SLIPPAGE_MULTIPLIER, LOW_IMPACT_SLIPPAGE, LOW_IMPACT_THRESHOLD, MAX_SLIPPAGE_PERCENT,
    MEDIUM_IMPACT_SLIPPAGE, MEDIUM_IMPACT_THRESHOLD,
};

fn deviation_percent(provided: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        return 0.0;
    }
    (provided - expected).abs() / expected * 100.0
}

/// Check a deposit against the amounts implied by the pool ratio.
///
/// Both sides have to be within `slippage_percent` for the deposit to pass.
pub fn validate_slippage(
    provided_amount_a: f64,
    provided_amount_b: f64,
    expected_amount_a: f64,
    expected_amount_b: f64,
    slippage_percent: f64,
) -> SlippageValidation {
    let deviation_a = deviation_percent(provided_amount_a, expected_amount_a);
    let deviation_b = deviation_percent(provided_amount_b, expected_amount_b);

    SlippageValidation {
        is_valid: deviation_a <= slippage_percent && deviation_b <= slippage_percent,
        deviation_a,
        deviation_b,
    }
}

impl SlippageValidation {
    /// `Err(SlippageExceeded)` unless both sides passed.
    pub fn check(&self) -> Result<(), ErrorCode> {
        if !self.is_valid {
            return Err(ErrorCode::SlippageExceeded);
        }
        Ok(())
    }
}

/// Slippage tolerance to suggest for a trade that moves `impact_percent` of
/// the reserves. Liquidity and swap quotes share this table.
pub fn recommended_slippage(impact_percent: f64) -> f64 {
    if impact_percent < LOW_IMPACT_THRESHOLD {
        LOW_IMPACT_SLIPPAGE
    } else if impact_percent < MEDIUM_IMPACT_THRESHOLD {
        MEDIUM_IMPACT_SLIPPAGE
    } else if impact_percent < HIGH_IMPACT_THRESHOLD {
        HIGH_IMPACT_SLIPPAGE
    } else {
        (impact_percent * IMPACT_SLIPPAGE_MULTIPLIER).min(MAX_SLIPPAGE_PERCENT)
    }
}

// Percent of `reserve` moved by `amount`; `None` when a non-zero amount
// meets an empty reserve.
fn side_impact(amount: f64, reserve: f64) -> Option<f64> {
    if amount == 0.0 {
        return Some(0.0);
    }
    if reserve == 0.0 {
        return None;
    }
    Some(amount / reserve * 100.0)
}

/// Suggested slippage for depositing `amount_a`/`amount_b` (human units).
///
/// Putting a non-zero amount against an empty reserve gets the cap, since
/// the price on that side is unbounded.
pub fn get_optimal_slippage(reserves: &PoolReserves, amount_a: f64, amount_b: f64) -> f64 {
    let reserve_a = to_decimal(reserves.token_a.reserve, reserves.token_a.decimals);
    let reserve_b = to_decimal(reserves.token_b.reserve, reserves.token_b.decimals);

    match (
        side_impact(amount_a, reserve_a),
        side_impact(amount_b, reserve_b),
    ) {
        (Some(impact_a), Some(impact_b)) => recommended_slippage(impact_a.max(impact_b)),
        _ => MAX_SLIPPAGE_PERCENT,
    }
}

/// Apply a slippage percentage to an amount, downwards for a minimum
/// receive and upwards for a maximum spend.
pub fn calculate_slippage_amount(amount: f64, slippage: f64, is_minimum: bool) -> f64 {
    if is_minimum {
        amount * (1.0 - slippage / 100.0)
    } else {
        amount * (1.0 + slippage / 100.0)
    }
}

pub fn bps_to_percent(bps: u32) -> f64 {
    f64::from(bps) / BPS_PER_PERCENT
}

/// Rounded to the nearest basis point. Negative input saturates to 0.
pub fn percent_to_bps(percent: f64) -> u32 {
    (percent * BPS_PER_PERCENT).round() as u32
}
