//! Vesting-schedule constants.
//!
//! Amounts are in base units (10^9 per token).

use lmv1_core::constants::SECONDS_PER_DAY;

/// Backing balance the vester must hold, exactly, before vesting can start:
/// 512,000,000 tokens.
pub const STARTING_BALANCE: u64 = 512_000_000_000_000_000;

/// First release amount: 175,342.465 tokens. Chosen so that one halving
/// period of daily releases pays out half of the backing balance.
pub const INITIAL_VESTING_AMOUNT: u64 = 175_342_465_000_000;

/// Number of successful releases between halvings (~4 years of daily claims).
pub const HALVING_PERIOD: u32 = 1_460;

/// Minimum seconds between releases.
pub const VESTING_CLIFF: i64 = SECONDS_PER_DAY;

/// Treasury diversion for the first claims: 1,000 tokens.
pub const BASE_DIVERSION: u64 = 1_000_000_000_000;

/// Number of claims per diversion step; the diversion grows by
/// [`BASE_DIVERSION`] once per step.
pub const DIVERSION_STEP: u64 = 30;
