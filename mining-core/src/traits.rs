//! Contracts between the distribution engine and its upstream collaborators.

use {
    crate::{error::EmissionError, ledger::TokenLedger},
    solana_clock::Clock,
    solana_pubkey::Pubkey,
};

/// Upstream source of vested emission.
///
/// Implemented by the treasury vester (releases directly to its recipient)
/// and by the diversion proxy (skims the treasury cut, forwards the rest).
/// The distribution engine pulls from whichever source it is wired to and
/// only ever sees the amount that reached its own funding account.
pub trait EmissionSource {
    /// Releases any newly vested tokens, crediting the configured
    /// downstream account on `ledger`.
    ///
    /// `caller` is the key driving the claim; sources that restrict claiming
    /// to their recipient check it. Returns the amount made available to the
    /// downstream account.
    fn claim(
        &mut self,
        caller: &Pubkey,
        ledger: &mut TokenLedger,
        clock: &Clock,
    ) -> Result<u64, EmissionError>;
}
