//! Instruction definitions for the Liquidity Manager program.
//!
//! Instructions are serialised / deserialised via `bincode`, matching the
//! wire format of the other LMv1 programs. Vesting is not listed here: it
//! is generic over the upstream emission source and enters through
//! [`crate::processor::process_vest_allocation`] directly.

use {
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Instructions accepted by the liquidity manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerInstruction {
    /// Whitelist a pool for reward distribution.
    ///
    /// Authority only; rejected while a round is in flight. The pair must
    /// already be known to the reserve source and must hold the
    /// wrapped-native token or the reward token (the latter wins the
    /// classification when both are present). `payee` is the pool's
    /// dedicated stake distributor, fixed for the pool's lifetime.
    AddWhitelistedPool {
        pool: Pubkey,
        payee: Pubkey,
        weight: u64,
    },

    /// Drop a pool from the whitelist.
    ///
    /// Authority only; rejected while a round is in flight. Removal uses
    /// swap-with-last-and-pop, so enumeration order shifts.
    RemoveWhitelistedPool { pool: Pubkey },

    /// Re-weight a pool. Zero is rejected — remove the pool instead.
    ///
    /// Authority only. Permitted mid-round; the in-flight allocation table
    /// is already fixed and unaffected.
    ChangeWeight { pool: Pubkey, weight: u64 },

    /// Set the wrapped-native / reward-token pair used for the reference
    /// rate. Authority only.
    SetReferencePair { pair: Pubkey },

    /// Reserve fixed percentages of each round for the two pool
    /// categories. The percentages must sum to exactly 100 and neither may
    /// be zero. Authority only; may be re-issued to change an active split.
    ActivateSplit {
        base_percent: u64,
        emission_percent: u64,
    },

    /// Return to pooled (unsplit) budgeting. Fails when no split is
    /// active. Authority only.
    DeactivateSplit,

    /// Price every whitelisted pool, fix the allocation table for the
    /// current unallocated balance, and freeze the whitelist.
    CalculateReturns,

    /// Pay every outstanding allocation entry. Completes the round when the
    /// last entry settles; floor residue stays for the next cycle.
    DistributeTokens,

    /// Pay exactly one allocation entry by table index. A settled entry is
    /// a no-op. Completes the round when it pays the last outstanding
    /// entry.
    DistributeSinglePool { index: u64 },
}
