//! Swap operations
//!
//! Exact-input constant-product swaps over smallest units. Unlike the
//! deposit-sizing helpers in `rates`, these move the price: the output
//! follows `x * y = k` after the trade fee is taken from the input.

use anchor_lang::{err, Result};
use log::debug;

use crate::{
    slippage::{calculate_slippage_amount, recommended_slippage},
    state::{AmmConfig, PoolReserves, SwapQuote, SwapResult},
    utils::{ceil_div, floor_div},
    ErrorCode, MAX_PERCENTAGE,
};

pub fn get_trade_fee(amount: u128, trade_fee_rate: u64) -> Option<u128> {
    ceil_div(
        amount,
        u128::from(trade_fee_rate),
        u128::from(MAX_PERCENTAGE),
    )
}

pub fn get_protocol_fee(amount: u128, protocol_fee_rate: u64) -> Option<u128> {
    floor_div(
        amount,
        u128::from(protocol_fee_rate),
        u128::from(MAX_PERCENTAGE),
    )
}

pub fn swap_base_input_without_fees(
    source_amount: u128,
    swap_source_amount: u128,
    swap_destination_amount: u128,
) -> Option<u128> {
    // (x + delta_x) * (y - delta_y) = x * y
    // delta_y = (delta_x * y) / (x + delta_x)
    let numerator = source_amount.checked_mul(swap_destination_amount)?;
    let denominator = swap_source_amount.checked_add(source_amount)?;
    numerator.checked_div(denominator)
}

/// Trade fee is rounded up and the output rounded down, so the pool
/// invariant never decreases.
pub fn swap(
    source_amount: u128,
    pool_source_amount: u128,
    pool_destination_amount: u128,
    trade_fee_rate: u64,
    protocol_fee_rate: u64,
) -> Option<SwapResult> {
    let trade_fee = get_trade_fee(source_amount, trade_fee_rate)?;
    let protocol_fee = get_protocol_fee(trade_fee, protocol_fee_rate)?;

    let source_amount_post_fees = source_amount.checked_sub(trade_fee)?;

    let destination_amount_swapped = swap_base_input_without_fees(
        source_amount_post_fees,
        pool_source_amount,
        pool_destination_amount,
    )?;

    Some(SwapResult {
        from_amount: u64::try_from(source_amount_post_fees).ok()?,
        to_amount: u64::try_from(destination_amount_swapped).ok()?,
        trade_fee: u64::try_from(trade_fee).ok()?,
        protocol_fee: u64::try_from(protocol_fee).ok()?,
    })
}

/// Quote an exact-input swap against a pool snapshot
///
/// # Arguments
/// * `amount_in` - Input amount, smallest unit of the source token
/// * `is_swap_a_to_b` - Direction of the swap
/// * `reserves` - Current pool snapshot
/// * `amm_config` - Fee rates
/// * `slippage_percent` - Tolerance used for `min_amount_out`
///
/// # Returns
/// The quote, with a suggested slippage taken from the same tiers as
/// deposits use
pub fn quote_swap(
    amount_in: u64,
    is_swap_a_to_b: bool,
    reserves: &PoolReserves,
    amm_config: &AmmConfig,
    slippage_percent: f64,
) -> Result<SwapQuote> {
    if amm_config.trade_fee_rate > MAX_PERCENTAGE || amm_config.protocol_fee_rate > MAX_PERCENTAGE {
        return err!(ErrorCode::InvalidFeeConfig);
    }

    if amount_in == 0 {
        return err!(ErrorCode::InputAmountTooSmall);
    }

    let (source_reserve, destination_reserve) = if is_swap_a_to_b {
        (reserves.token_a.reserve, reserves.token_b.reserve)
    } else {
        (reserves.token_b.reserve, reserves.token_a.reserve)
    };

    if source_reserve == 0 || destination_reserve == 0 {
        return err!(ErrorCode::LiquidityTooLow);
    }

    let result = swap(
        u128::from(amount_in),
        u128::from(source_reserve),
        u128::from(destination_reserve),
        amm_config.trade_fee_rate,
        amm_config.protocol_fee_rate,
    )
    .ok_or(ErrorCode::MathOverflow)?;

    if result.to_amount == 0 {
        return err!(ErrorCode::OutputIsZero);
    }

    // how far the execution price falls short of spot:
    // 1 - (dy / dx) / (y / x) = dx / (x + dx)
    let from_amount = result.from_amount as f64;
    let price_impact = from_amount / (source_reserve as f64 + from_amount) * 100.0;

    let min_amount_out =
        calculate_slippage_amount(result.to_amount as f64, slippage_percent, true) as u64;

    let quote = SwapQuote {
        amount_in,
        amount_out: result.to_amount,
        min_amount_out: min_amount_out.min(result.to_amount),
        trade_fee: result.trade_fee,
        protocol_fee: result.protocol_fee,
        price_impact,
        suggested_slippage: recommended_slippage(price_impact),
    };

    debug!(
        "swap {} -> {}: {} in, {} out (min {}), impact {:.4}%",
        if is_swap_a_to_b { &reserves.token_a.mint } else { &reserves.token_b.mint },
        if is_swap_a_to_b { &reserves.token_b.mint } else { &reserves.token_a.mint },
        quote.amount_in,
        quote.amount_out,
        quote.min_amount_out,
        quote.price_impact
    );

    Ok(quote)
}
