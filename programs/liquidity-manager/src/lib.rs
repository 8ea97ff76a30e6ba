//! LMv1 Liquidity Manager Program
//!
//! Splits each vested emission across a whitelist of AMM pool positions.
//! Every position is priced in wrapped-native units from its pair reserves,
//! weighted by an administrator-assigned factor, and paid out to its
//! dedicated stake distributor.
//!
//! A distribution round is a three-step cycle:
//!
//! 1. `VestAllocation` — pull newly released tokens from the upstream
//!    emission source into the unallocated balance.
//! 2. `CalculateReturns` — freeze the whitelist and fix the allocation
//!    table (`owed` per pool) from weights × measured liquidity, optionally
//!    split into independent base/emission budgets.
//! 3. `DistributeTokens` / `DistributeSinglePool` — pay the table down in
//!    as many calls as needed; each entry settles independently, so a round
//!    survives being advanced across any number of separate transactions.

pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;
pub mod valuator;
