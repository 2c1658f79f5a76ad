//! Liquidity Math Library
//!
//! Estimation and validation math for constant-product liquidity pools:
//! exchange rates, co-deposit sizing, LP token issuance, pool share,
//! slippage and price impact.
//!
//! The floating-point functions work in human units and are meant for
//! quoting and validating user input only. Amounts that are actually minted
//! or transferred must come from the integer helpers (`deposit_lp`,
//! `withdraw_lp`, `swap`) or from the transaction-building layer.

pub mod constants;
pub mod errors;
pub mod liquidity;
pub mod rates;
pub mod slippage;
pub mod state;
pub mod swap;
pub mod utils;

// Re-export functions for convenience
pub use constants::*;
pub use errors::ErrorCode;
pub use liquidity::{
    calculate_liquidity_operation, calculate_lp_tokens_to_receive, calculate_pool_share,
    calculate_remove_liquidity, deposit_lp, withdraw_lp,
};
pub use rates::{
    calculate_exchange_rate, calculate_expected_token_a, calculate_expected_token_b,
    calculate_price_impact, format_price,
};
pub use slippage::{
    bps_to_percent, calculate_slippage_amount, get_optimal_slippage, percent_to_bps,
    recommended_slippage, validate_slippage,
};
pub use state::{
    AmmConfig, ExchangeRate, LiquidityCalculation, PoolReserves, RemoveLiquidityCalculation,
    SlippageValidation, SwapQuote, SwapResult, TokenReserve,
};
pub use swap::quote_swap;
pub use utils::*;
