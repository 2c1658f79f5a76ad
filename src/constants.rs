/// Decimals assumed for a token when the caller has nothing better.
pub const DEFAULT_DECIMALS: u8 = 9;

/// Decimals of the LP mint unless the pool says otherwise.
pub const DEFAULT_LP_DECIMALS: u8 = 9;

pub const DEFAULT_SLIPPAGE_PERCENT: f64 = 0.5;

pub const DEFAULT_PRICE_DECIMALS: usize = 6;

// 10^6 = 100%
pub const MAX_PERCENTAGE: u64 = 1_000_000;

pub const BPS_PER_PERCENT: f64 = 100.0;

// Slippage suggestion tiers, in percent of reserve moved by the trade.
pub const LOW_IMPACT_THRESHOLD: f64 = 0.1;
pub const MEDIUM_IMPACT_THRESHOLD: f64 = 1.0;
pub const HIGH_IMPACT_THRESHOLD: f64 = 3.0;

pub const LOW_IMPACT_SLIPPAGE: f64 = 0.1;
pub const MEDIUM_IMPACT_SLIPPAGE: f64 = 0.5;
pub const HIGH_IMPACT_SLIPPAGE: f64 = 1.0;

pub const IMPACT_SLIPPAGE_MULTIPLIER: f64 = 1.5;

/// Hard cap on any suggested slippage, in percent.
pub const MAX_SLIPPAGE_PERCENT: f64 = 20.0;

/// Smallest price rendered in fixed notation by `format_price`.
pub const MIN_FIXED_PRICE: f64 = 0.000001;
