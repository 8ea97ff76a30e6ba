//! LMv1 Integration Tests
//!
//! Cross-program test suite for the liquidity-mining engine.
//!
//! # Subsystems Tested
//!
//! 1. **Whitelist** — pool registration/removal/re-weighting invariants,
//!    classification determinism, the mid-round registry freeze
//! 2. **Valuation** — reference-rate plumbing exercised through full
//!    calculation rounds (token order, unset pair, empty reserves)
//! 3. **Distribution** — proportional allocation, floor rounding and
//!    residue carry-over, resumable single-pool payouts
//! 4. **Split distribution** — independent base/emission budgets,
//!    per-category rounding confinement
//! 5. **Treasury vester** — exact-balance activation, cliff gating,
//!    halving countdown
//! 6. **Diversion proxy** — init wiring, diversion step schedule,
//!    remainder forwarding
//! 7. **End-to-end** — whole cycles through the real vester and proxy
//!
//! The harness does not spin up any runtime; the suites exercise the
//! program logic directly against the crate APIs, with a deterministic
//! ledger, pair directory, and manually advanced clock.

#![allow(clippy::arithmetic_side_effects)]

pub mod harness;




#[cfg(test)]
mod split_distribution_tests;


#[cfg(test)]
mod vester_proxy_tests;
