//! Pricing of pool positions in wrapped-native units.
//!
//! A balanced AMM pool carries equal value on both sides, so doubling the
//! reserve of the side we can price values the whole position. Base pools
//! are priced directly from their wrapped-native reserve; emission pools go
//! through the reference pair's exchange rate, carried as a 10^18
//! fixed-point integer with truncating division throughout.

#![allow(clippy::arithmetic_side_effects)]

use {
    crate::error::LiquidityManagerError,
    lmv1_core::{constants::RATE_SCALE, pair::PairDirectory},
    solana_pubkey::Pubkey,
};

/// Position value of a pool holding the wrapped-native token:
/// `2 × native_reserve`.
pub fn base_liquidity(
    pairs: &PairDirectory,
    pool: &Pubkey,
    wrapped_native: &Pubkey,
) -> Result<u64, LiquidityManagerError> {
    let reserve = pairs.reserve_of(pool, wrapped_native)?;
    reserve
        .checked_mul(2)
        .ok_or(LiquidityManagerError::ArithmeticOverflow)
}

/// Wrapped-native per reward-token exchange rate from the reference pair,
/// scaled by 10^18: `native_reserve × RATE_SCALE / reward_reserve`.
pub fn reference_rate(
    pairs: &PairDirectory,
    reference_pair: &Pubkey,
    wrapped_native: &Pubkey,
    reward_mint: &Pubkey,
) -> Result<u128, LiquidityManagerError> {
    let native_reserve = pairs.reserve_of(reference_pair, wrapped_native)?;
    let reward_reserve = pairs.reserve_of(reference_pair, reward_mint)?;
    if native_reserve == 0 || reward_reserve == 0 {
        return Err(LiquidityManagerError::EmptyReserves);
    }
    let scaled = u128::from(native_reserve)
        .checked_mul(RATE_SCALE)
        .ok_or(LiquidityManagerError::ArithmeticOverflow)?;
    Ok(scaled / u128::from(reward_reserve))
}

/// Position value of a pool holding the reward token, via `rate`:
/// `2 × reward_reserve × rate / RATE_SCALE`.
pub fn emission_liquidity(
    pairs: &PairDirectory,
    pool: &Pubkey,
    reward_mint: &Pubkey,
    rate: u128,
) -> Result<u64, LiquidityManagerError> {
    let reserve = pairs.reserve_of(pool, reward_mint)?;
    let value = u128::from(reserve)
        .checked_mul(2)
        .ok_or(LiquidityManagerError::ArithmeticOverflow)?
        .checked_mul(rate)
        .ok_or(LiquidityManagerError::ArithmeticOverflow)?
        / RATE_SCALE;
    u64::try_from(value).map_err(|_| LiquidityManagerError::ArithmeticOverflow)
}
