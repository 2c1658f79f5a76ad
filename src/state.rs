use borsh::{BorshDeserialize, BorshSerialize};

use crate::{utils::parse_raw_amount, ErrorCode, DEFAULT_LP_DECIMALS};

/// One side of a pool as read from chain. `reserve` is in the token's
/// smallest unit.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenReserve {
    pub mint: String,
    pub reserve: u64,
    pub decimals: u8,
}

impl TokenReserve {
    pub fn new(mint: impl Into<String>, reserve: u64, decimals: u8) -> Self {
        Self {
            mint: mint.into(),
            reserve,
            decimals,
        }
    }
}

/// Snapshot of a pool's reserves and LP supply at call time.
///
/// Nothing in this crate checks the snapshot for staleness; whoever reads it
/// from the pool account owns that.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolReserves {
    pub token_a: TokenReserve,
    pub token_b: TokenReserve,
    /// Total LP tokens outstanding, smallest unit
    pub lp_supply: u64,
    pub lp_decimals: u8,
}

impl PoolReserves {
    pub fn new(token_a: TokenReserve, token_b: TokenReserve, lp_supply: u64) -> Self {
        Self::with_lp_decimals(token_a, token_b, lp_supply, DEFAULT_LP_DECIMALS)
    }

    pub fn with_lp_decimals(
        token_a: TokenReserve,
        token_b: TokenReserve,
        lp_supply: u64,
        lp_decimals: u8,
    ) -> Self {
        Self {
            token_a,
            token_b,
            lp_supply,
            lp_decimals,
        }
    }

    /// Build a snapshot from decimal-integer strings, the way reserves come
    /// back from RPC. Fails on anything that is not a plain unsigned integer.
    pub fn from_raw(
        mint_a: &str,
        reserve_a: &str,
        decimals_a: u8,
        mint_b: &str,
        reserve_b: &str,
        decimals_b: u8,
        lp_supply: &str,
    ) -> Result<Self, ErrorCode> {
        Ok(Self::new(
            TokenReserve::new(mint_a, parse_raw_amount(reserve_a)?, decimals_a),
            TokenReserve::new(mint_b, parse_raw_amount(reserve_b)?, decimals_b),
            parse_raw_amount(lp_supply)?,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.lp_supply == 0
    }
}

/// Fee settings for swap quotes.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmmConfig {
    pub trade_fee_rate: u64,    // 10^6 = 100%
    pub protocol_fee_rate: u64, // 10^6 = 100% (percentage of trade fee)
}

/// Spot prices implied by the reserves. Both are 0 when either side of the
/// pool is empty, which means "undefined", not "worthless".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExchangeRate {
    pub a_to_b: f64,
    pub b_to_a: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LiquidityCalculation {
    pub expected_amount_b: f64,
    pub expected_amount_a: f64,
    pub lp_tokens_to_receive: f64,
    /// `lp_tokens_to_receive` reduced by the requested slippage
    pub min_lp_tokens_to_receive: f64,
    pub price_a_to_b: f64,
    pub price_b_to_a: f64,
    /// Percent of the pool owned by the deposit after it lands, 0..=100
    pub share_of_pool: f64,
    pub price_impact: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RemoveLiquidityCalculation {
    pub amount_a: f64,
    pub amount_b: f64,
    pub share_of_pool: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlippageValidation {
    pub is_valid: bool,
    pub deviation_a: f64,
    pub deviation_b: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    /// Amount of source token swapped, after the trade fee
    pub from_amount: u64,
    /// Amount of destination token swapped
    pub to_amount: u64,

    pub trade_fee: u64,
    pub protocol_fee: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwapQuote {
    // base units
    pub amount_in: u64,
    pub amount_out: u64,
    pub min_amount_out: u64,
    pub trade_fee: u64,
    pub protocol_fee: u64,

    // percent
    pub price_impact: f64,
    pub suggested_slippage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use borsh::BorshDeserialize;

    #[test]
    fn test_from_raw_parses_snapshot() {
        let reserves = PoolReserves::from_raw(
            "mintA",
            "1000000000000",
            9,
            "mintB",
            "1000000000",
            9,
            "0",
        )
        .unwrap();
        assert_eq!(reserves.token_a.reserve, 1_000_000_000_000);
        assert_eq!(reserves.token_b.reserve, 1_000_000_000);
        assert_eq!(reserves.lp_decimals, DEFAULT_LP_DECIMALS);
        assert!(reserves.is_empty());
    }

    #[test]
    fn test_from_raw_rejects_malformed_reserve() {
        let result = PoolReserves::from_raw("mintA", "abc", 9, "mintB", "1", 9, "0");
        assert!(matches!(result, Err(ErrorCode::InvalidInput)));

        let result = PoolReserves::from_raw("mintA", "1", 9, "mintB", "-5", 9, "0");
        assert!(matches!(result, Err(ErrorCode::InvalidInput)));
    }

    #[test]
    fn test_decode_account_snapshot() {
        let reserves = PoolReserves::with_lp_decimals(
            TokenReserve::new("So11111111111111111111111111111111111111112", 5_000, 9),
            TokenReserve::new("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 7_000, 6),
            42,
            6,
        );
        let bytes = reserves.try_to_vec().unwrap();
        let decoded = PoolReserves::try_from_slice(&bytes).unwrap();
        assert_eq!(decoded, reserves);
    }
}
