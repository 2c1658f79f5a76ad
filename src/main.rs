use liquidity_math::{
    calculate_liquidity_operation, format_price, get_optimal_slippage, quote_swap, to_raw_amount,
    validate_slippage, AmmConfig, PoolReserves, DEFAULT_PRICE_DECIMALS, DEFAULT_SLIPPAGE_PERCENT,
};
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1000:1 pool, both sides 9 decimals
    let reserves = match PoolReserves::from_raw(
        "TokenA",
        "1000000000000",
        9,
        "TokenB",
        "1000000000",
        9,
        "31622776601",
    ) {
        Ok(reserves) => reserves,
        Err(e) => {
            error!("Invalid pool snapshot: {}", e);
            return;
        }
    };

    // Example 1: Quote a deposit
    let (amount_a, amount_b) = (100.0, 0.1);
    let calc = calculate_liquidity_operation(amount_a, amount_b, &reserves, DEFAULT_SLIPPAGE_PERCENT);
    info!(
        "Deposit {} A + {} B: price A->B {}, B->A {}",
        amount_a,
        amount_b,
        format_price(calc.price_a_to_b, DEFAULT_PRICE_DECIMALS),
        format_price(calc.price_b_to_a, DEFAULT_PRICE_DECIMALS)
    );
    info!(
        "Expected A {}, expected B {}, LP {} (min {}), share {:.4}%",
        calc.expected_amount_a,
        calc.expected_amount_b,
        calc.lp_tokens_to_receive,
        calc.min_lp_tokens_to_receive,
        calc.share_of_pool
    );

    // Example 2: Validate it against the pool ratio
    let slippage = get_optimal_slippage(&reserves, amount_a, amount_b);
    let verdict = validate_slippage(
        amount_a,
        amount_b,
        calc.expected_amount_a,
        calc.expected_amount_b,
        slippage,
    );
    info!(
        "Suggested slippage {}%, deposit valid: {} (deviation A {:.4}%, B {:.4}%)",
        slippage, verdict.is_valid, verdict.deviation_a, verdict.deviation_b
    );

    // Example 3: Quote a swap of 1 A
    let config = AmmConfig {
        trade_fee_rate: 2_500,
        protocol_fee_rate: 200_000,
    };
    let swap_amount = 1.0;
    let amount_in = to_raw_amount(swap_amount, reserves.token_a.decimals);
    match quote_swap(amount_in, true, &reserves, &config, slippage) {
        Ok(quote) => info!(
            "Swap {} A -> {} B base units (min {}), impact {:.4}%, suggested slippage {}%",
            swap_amount,
            quote.amount_out,
            quote.min_amount_out,
            quote.price_impact,
            quote.suggested_slippage
        ),
        Err(e) => error!("Swap quote failed: {}", e),
    }
}
