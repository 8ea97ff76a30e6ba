//! Economic constants shared by the LMv1 programs.

/// Base units per whole token. All balances and reserves are carried in
/// base units; 1 token = 10^9 base units.
pub const UNITS_PER_TOKEN: u64 = 1_000_000_000;

/// Fixed-point scale for exchange rates. Rates are `u128` values carrying
/// 10^18 fractional precision; every rate division truncates.
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Denominator for the category split percentages (whole percents).
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Seconds per day, used for vesting-cliff calculations.
pub const SECONDS_PER_DAY: i64 = 86_400;
