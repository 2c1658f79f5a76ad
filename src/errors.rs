use anchor_lang::prelude::error_code;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid input")]
    InvalidInput,
    #[msg("Invalid amount, must be a finite non-negative number")]
    InvalidAmount,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Liquidity too low")]
    LiquidityTooLow,
    #[msg("Input amount too small")]
    InputAmountTooSmall,
    #[msg("Output is zero")]
    OutputIsZero,
    #[msg("Invalid fee configuration")]
    InvalidFeeConfig,
}
