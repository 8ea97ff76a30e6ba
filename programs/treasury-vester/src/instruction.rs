//! Instruction definitions for the Treasury Vester program.
//!
//! Instructions are serialised / deserialised via `bincode`, matching the
//! wire format of the other LMv1 programs.

use {
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Instructions accepted by the treasury vester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VesterInstruction {
    /// Point future releases at a new recipient.
    ///
    /// Authority only. The recipient is the only key allowed to `Claim`;
    /// when the diversion proxy is in use this is the proxy's account.
    SetRecipient { recipient: Pubkey },

    /// One-way switch enabling claims.
    ///
    /// Authority only. Fails unless the vester account holds exactly the
    /// configured starting balance.
    StartVesting,

    /// Release the current vesting amount to the recipient.
    ///
    /// Recipient only; gated by the vesting cliff. Halves the release
    /// amount whenever the halving countdown has run out.
    Claim,
}

/// Instructions accepted by the diversion proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyInstruction {
    /// Verify the wiring (the wrapped vester must already release to the
    /// proxy account) and enable `ClaimAndDistribute`.
    Init,

    /// Claim from the wrapped vester, divert the treasury cut, and forward
    /// the remainder to the beneficiary. Callable by anyone; the wrapped
    /// vester enforces the time lock.
    ClaimAndDistribute,
}
