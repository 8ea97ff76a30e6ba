//! Custom errors for the Liquidity Manager program.

use {
    lmv1_core::error::{EmissionError, LedgerError, PairError},
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum LiquidityManagerError {
    #[error("Address cannot be the zero address")]
    ZeroAddress = 0,

    #[error("Pool is already whitelisted")]
    AlreadyWhitelisted,

    #[error("Pool is not whitelisted")]
    NotWhitelisted,

    #[error("Pair sides cannot be identical tokens")]
    IdenticalTokens,

    #[error("Pair holds neither the wrapped-native token nor the reward token")]
    MissingBaseOrEmissionToken,

    #[error("Weight cannot be zero")]
    ZeroWeight,

    #[error("Whitelist cannot change between calculating and distributing returns")]
    RegistryFrozen,

    #[error("Split percentages must sum to exactly 100")]
    InvalidSplitTotal,

    #[error("Neither split percentage may be zero")]
    ZeroSplitShare,

    #[error("Split is not active")]
    SplitNotActive,

    #[error("Reference pair is not set")]
    ReferencePairNotSet,

    #[error("Pair is not registered with the reserve source")]
    UnknownPair,

    #[error("Requested token is absent from the pair's reserves")]
    MissingToken,

    #[error("Pair reserve is empty")]
    EmptyReserves,

    #[error("No tokens to allocate; call vest first")]
    NothingToAllocate,

    #[error("Returns already calculated; finish distributing first")]
    DistributionInProgress,

    #[error("Returns not calculated; call calculate first")]
    NothingCalculated,

    #[error("Allocation index out of bounds")]
    IndexOutOfBounds,

    #[error("Previous round still has unpaid allocations")]
    UnallocatedTokensRemain,

    #[error("Upstream claim failed")]
    UpstreamClaimFailed,

    #[error("Upstream source released nothing")]
    NothingClaimed,

    #[error("Funding account does not back the recorded allocation")]
    InsufficientBacking,

    #[error("Caller is not the manager authority")]
    UnauthorizedAuthority,

    #[error("Arithmetic overflow in allocation calculation")]
    ArithmeticOverflow,

    #[error("Manager state data is invalid or corrupted")]
    InvalidAccountData,
}

impl From<LedgerError> for LiquidityManagerError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownAccount(_) | LedgerError::InsufficientFunds { .. } => {
                Self::InsufficientBacking
            }
            LedgerError::ArithmeticOverflow => Self::ArithmeticOverflow,
        }
    }
}

impl From<PairError> for LiquidityManagerError {
    fn from(err: PairError) -> Self {
        match err {
            PairError::UnknownPair(_) => Self::UnknownPair,
            PairError::MissingToken { .. } => Self::MissingToken,
            PairError::EmptyReserves(_) => Self::EmptyReserves,
        }
    }
}

impl From<EmissionError> for LiquidityManagerError {
    fn from(_err: EmissionError) -> Self {
        Self::UpstreamClaimFailed
    }
}
