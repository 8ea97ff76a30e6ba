//! LMv1 Core
//!
//! Shared plumbing for the LMv1 liquidity-mining programs:
//!
//! - [`ledger::TokenLedger`] — the fungible ledger of the reward token
//! - [`pair::PairDirectory`] — read-only reserve source for AMM trading pairs
//! - [`traits::EmissionSource`] — the upstream `claim()` contract between the
//!   distribution engine and the treasury vester (or its diversion proxy)
//!
//! The programs never touch balances or reserves directly; everything flows
//! through these narrow interfaces so that the engine can be driven against
//! real state or against the deterministic test harness interchangeably.

pub mod constants;
pub mod error;
pub mod ledger;
pub mod pair;
pub mod traits;

pub use {
    error::{EmissionError, LedgerError, PairError},
    ledger::TokenLedger,
    pair::{PairDirectory, TradingPair},
    traits::EmissionSource,
};
