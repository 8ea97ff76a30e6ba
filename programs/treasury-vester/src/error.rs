//! Custom errors for the Treasury Vester program.

use {
    lmv1_core::error::LedgerError,
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum VesterError {
    #[error("Recipient cannot be the zero address")]
    ZeroRecipientAddress = 0,

    #[error("Vesting has already been started")]
    VestingAlreadyStarted,

    #[error("Backing balance does not match the configured starting balance")]
    IncorrectStartingBalance,

    #[error("Vesting has not been started")]
    VestingNotStarted,

    #[error("Only the configured recipient can claim")]
    UnauthorizedRecipient,

    #[error("The vesting cliff has not passed since the last release")]
    CliffNotReached,

    #[error("Caller is not the vester authority")]
    UnauthorizedAuthority,

    #[error("Vester account does not hold enough tokens for the release")]
    InsufficientBacking,

    #[error("Arithmetic overflow in vesting calculation")]
    ArithmeticOverflow,

    #[error("Vester account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Proxy has not been initialized")]
    ProxyNotInitialized,

    #[error("Proxy is already initialized")]
    ProxyAlreadyInitialized,

    #[error("Vester recipient must be the proxy account before init")]
    InvalidVesterRecipient,
}

impl From<LedgerError> for VesterError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownAccount(_) | LedgerError::InsufficientFunds { .. } => {
                Self::InsufficientBacking
            }
            LedgerError::ArithmeticOverflow => Self::ArithmeticOverflow,
        }
    }
}
