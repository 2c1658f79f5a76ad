//! Liquidity operations
//!
//! LP token issuance, pool share and withdrawal estimates. The `f64`
//! functions work in human units for quoting; `deposit_lp` and
//! `withdraw_lp` are the checked integer versions over smallest units.

use log::debug;

use crate::{
    slippage::calculate_slippage_amount,
    state::{LiquidityCalculation, PoolReserves, RemoveLiquidityCalculation},
    utils::{floor_div, safe_div, sqrt_u128, to_decimal},
    ErrorCode,
};

/// Calculate the LP tokens a deposit of `amount_a`/`amount_b` would mint
///
/// # Arguments
/// * `amount_a` - Amount of token A being deposited, human units
/// * `amount_b` - Amount of token B being deposited, human units
/// * `reserves` - Current pool snapshot
///
/// # Returns
/// LP tokens in human units. The first deposit into an empty pool gets
/// `sqrt(amount_a * amount_b)`; later deposits get the smaller of the two
/// proportional amounts so an off-ratio deposit cannot dilute existing LPs.
pub fn calculate_lp_tokens_to_receive(
    amount_a: f64,
    amount_b: f64,
    reserves: &PoolReserves,
) -> f64 {
    if reserves.lp_supply == 0 {
        return (amount_a * amount_b).sqrt();
    }

    let lp_supply = to_decimal(reserves.lp_supply, reserves.lp_decimals);
    let reserve_a = to_decimal(reserves.token_a.reserve, reserves.token_a.decimals);
    let reserve_b = to_decimal(reserves.token_b.reserve, reserves.token_b.decimals);

    let lp_from_a = safe_div(amount_a * lp_supply, reserve_a);
    let lp_from_b = safe_div(amount_b * lp_supply, reserve_b);

    lp_from_a.min(lp_from_b)
}

/// Percent of the pool (0..=100) held by `lp_tokens_to_receive` once they
/// are added to `current_lp_supply`.
pub fn calculate_pool_share(
    lp_tokens_to_receive: f64,
    current_lp_supply: u64,
    lp_decimals: u8,
) -> f64 {
    let new_supply = to_decimal(current_lp_supply, lp_decimals) + lp_tokens_to_receive;
    if new_supply == 0.0 {
        return 0.0;
    }
    (lp_tokens_to_receive / new_supply) * 100.0
}

/// Quote a deposit in one call.
///
/// Slippage is not enforced here. `slippage_percent` only sets
/// `min_lp_tokens_to_receive`; pass the expected amounts to
/// `validate_slippage` to accept or reject the deposit.
pub fn calculate_liquidity_operation(
    amount_a: f64,
    amount_b: f64,
    reserves: &PoolReserves,
    slippage_percent: f64,
) -> LiquidityCalculation {
    let rate = reserves.exchange_rate();
    let lp_tokens_to_receive = calculate_lp_tokens_to_receive(amount_a, amount_b, reserves);
    let share_of_pool =
        calculate_pool_share(lp_tokens_to_receive, reserves.lp_supply, reserves.lp_decimals);

    let calculation = LiquidityCalculation {
        expected_amount_b: reserves.expected_token_b(amount_a),
        expected_amount_a: reserves.expected_token_a(amount_b),
        lp_tokens_to_receive,
        min_lp_tokens_to_receive: calculate_slippage_amount(
            lp_tokens_to_receive,
            slippage_percent,
            true,
        ),
        price_a_to_b: rate.a_to_b,
        price_b_to_a: rate.b_to_a,
        share_of_pool,
        price_impact: reserves.price_impact(amount_a, amount_b),
    };

    debug!(
        "liquidity {}/{}: deposit {} + {} -> {} LP ({:.4}% of pool)",
        reserves.token_a.mint,
        reserves.token_b.mint,
        amount_a,
        amount_b,
        calculation.lp_tokens_to_receive,
        calculation.share_of_pool
    );

    calculation
}

/// Tokens returned for burning `lp_tokens` (human units).
///
/// Burning more than the outstanding supply is treated as burning all of it.
pub fn calculate_remove_liquidity(
    lp_tokens: f64,
    reserves: &PoolReserves,
) -> RemoveLiquidityCalculation {
    let lp_supply = to_decimal(reserves.lp_supply, reserves.lp_decimals);
    if lp_supply == 0.0 {
        return RemoveLiquidityCalculation::default();
    }

    let share = lp_tokens.min(lp_supply) / lp_supply;
    RemoveLiquidityCalculation {
        amount_a: to_decimal(reserves.token_a.reserve, reserves.token_a.decimals) * share,
        amount_b: to_decimal(reserves.token_b.reserve, reserves.token_b.decimals) * share,
        share_of_pool: share * 100.0,
    }
}

/// Calculate the amount of LP tokens to mint for a deposit
///
/// # Arguments
/// * `token_a_amount` - Amount of token A being deposited
/// * `token_b_amount` - Amount of token B being deposited
/// * `total_lp_supply` - Current total supply of LP tokens
/// * `token_a_reserve` - Current reserve of token A in the pool
/// * `token_b_reserve` - Current reserve of token B in the pool
///
/// # Returns
/// The amount of LP tokens to mint, rounded down. All values are smallest
/// units.
pub fn deposit_lp(
    token_a_amount: u64,
    token_b_amount: u64,
    total_lp_supply: u64,
    token_a_reserve: u64,
    token_b_reserve: u64,
) -> Result<u64, ErrorCode> {
    if total_lp_supply == 0 {
        // Initial liquidity provision
        // LP tokens = sqrt(token_a * token_b)
        let product = u128::from(token_a_amount) * u128::from(token_b_amount);
        return u64::try_from(sqrt_u128(product)).map_err(|_| ErrorCode::MathOverflow);
    }

    if token_a_reserve == 0 || token_b_reserve == 0 {
        return Err(ErrorCode::LiquidityTooLow);
    }

    let token_a_lp = floor_div(
        u128::from(token_a_amount),
        u128::from(total_lp_supply),
        u128::from(token_a_reserve),
    )
    .ok_or(ErrorCode::MathOverflow)?;
    let token_b_lp = floor_div(
        u128::from(token_b_amount),
        u128::from(total_lp_supply),
        u128::from(token_b_reserve),
    )
    .ok_or(ErrorCode::MathOverflow)?;

    // Return the minimum to maintain pool balance
    u64::try_from(token_a_lp.min(token_b_lp)).map_err(|_| ErrorCode::MathOverflow)
}

/// Calculate the amount of tokens to return for a withdrawal
///
/// # Arguments
/// * `lp_tokens` - Amount of LP tokens being burned
/// * `total_lp_supply` - Current total supply of LP tokens
/// * `token_a_reserve` - Current reserve of token A in the pool
/// * `token_b_reserve` - Current reserve of token B in the pool
///
/// # Returns
/// `(token_a_amount, token_b_amount)`, rounded down
pub fn withdraw_lp(
    lp_tokens: u64,
    total_lp_supply: u64,
    token_a_reserve: u64,
    token_b_reserve: u64,
) -> Result<(u64, u64), ErrorCode> {
    if total_lp_supply == 0 {
        return Ok((0, 0));
    }
    if lp_tokens > total_lp_supply {
        return Err(ErrorCode::InvalidInput);
    }

    let token_a_amount = floor_div(
        u128::from(lp_tokens),
        u128::from(token_a_reserve),
        u128::from(total_lp_supply),
    )
    .ok_or(ErrorCode::MathOverflow)?;
    let token_b_amount = floor_div(
        u128::from(lp_tokens),
        u128::from(token_b_reserve),
        u128::from(total_lp_supply),
    )
    .ok_or(ErrorCode::MathOverflow)?;

    // lp_tokens <= total_lp_supply keeps both within their reserve
    Ok((token_a_amount as u64, token_b_amount as u64))
}
