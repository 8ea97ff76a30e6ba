//! Failure types for the core ledger, pair, and emission interfaces.

use {solana_pubkey::Pubkey, thiserror::Error};

/// Failures raised by [`crate::ledger::TokenLedger`].
///
/// Every ledger operation is all-or-nothing: a returned error means no
/// balance changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} does not exist on the ledger")]
    UnknownAccount(Pubkey),

    #[error("account {account} holds {balance} base units, {required} required")]
    InsufficientFunds {
        account: Pubkey,
        balance: u64,
        required: u64,
    },

    #[error("token amount overflowed")]
    ArithmeticOverflow,
}

/// Failures raised by [`crate::pair::PairDirectory`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error("pair {0} is not registered with the reserve source")]
    UnknownPair(Pubkey),

    #[error("pair {pair} does not hold token {token}")]
    MissingToken { pair: Pubkey, token: Pubkey },

    #[error("pair {0} has an empty reserve")]
    EmptyReserves(Pubkey),
}

/// Failures raised by an [`crate::traits::EmissionSource`] claim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmissionError {
    #[error("vesting has not been started")]
    NotStarted,

    #[error("the vesting cliff has not passed since the last release")]
    CliffNotReached,

    #[error("caller is not the configured recipient")]
    UnauthorizedCaller,

    #[error("emission source has not been initialized")]
    NotInitialized,

    #[error("emission source cannot cover the release")]
    Depleted,

    #[error("release could not be settled: {0}")]
    Ledger(#[from] LedgerError),
}
