//! LMv1 Treasury Vester Program
//!
//! Releases the mining emission on a decaying schedule and, through the
//! diversion proxy, skims a growing fraction of each release to the
//! community treasury before the remainder funds the distribution engine.
//!
//! ## Schedule
//!
//! | Parameter          | Value                           |
//! |--------------------|---------------------------------|
//! | Backing balance    | 512,000,000 tokens, exact       |
//! | Initial release    | 175,342.465 tokens              |
//! | Release interval   | ≥ 86,400 s between claims       |
//! | Halving            | every 1,460 successful releases |
//! | Diversion base     | 1,000 tokens                    |
//! | Diversion step     | +1 × base every 30 claims       |
//!
//! Only the configured recipient may claim from the vester itself; the
//! proxy claims on anyone's behalf because the wrapped vester still
//! enforces the time lock.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;
