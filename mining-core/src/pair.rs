//! Read-only reserve source for AMM trading pairs.
//!
//! The valuator prices a pool from its reserves; this directory is the
//! boundary it reads through. A [`TradingPair`] record carries both reserves
//! and the last-update timestamp, so a single [`PairDirectory::get_reserves`]
//! call observes all three fields from one snapshot.

use {
    crate::error::PairError,
    borsh::{BorshDeserialize, BorshSerialize},
    solana_pubkey::Pubkey,
    std::collections::HashMap,
};

/// Reserve snapshot of one trading pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TradingPair {
    /// First side of the pair.
    pub token0: Pubkey,
    /// Second side of the pair.
    pub token1: Pubkey,
    /// Reserve of `token0`, in base units.
    pub reserve0: u64,
    /// Reserve of `token1`, in base units.
    pub reserve1: u64,
    /// Unix timestamp of the last reserve update. Snapshotted together with
    /// the reserves but not used in pricing.
    pub last_update: i64,
}

/// Directory of registered trading pairs, keyed by pair address.
#[derive(Debug, Clone, Default)]
pub struct PairDirectory {
    pairs: HashMap<Pubkey, TradingPair>,
}

impl PairDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the record for `pair`.
    pub fn register_pair(&mut self, pair: Pubkey, record: TradingPair) {
        self.pairs.insert(pair, record);
    }

    /// Overwrites the reserve snapshot of an already-registered pair.
    pub fn set_reserves(
        &mut self,
        pair: &Pubkey,
        reserve0: u64,
        reserve1: u64,
        last_update: i64,
    ) -> Result<(), PairError> {
        let record = self
            .pairs
            .get_mut(pair)
            .ok_or(PairError::UnknownPair(*pair))?;
        record.reserve0 = reserve0;
        record.reserve1 = reserve1;
        record.last_update = last_update;
        Ok(())
    }

    pub fn contains(&self, pair: &Pubkey) -> bool {
        self.pairs.contains_key(pair)
    }

    pub fn token0(&self, pair: &Pubkey) -> Result<Pubkey, PairError> {
        self.record(pair).map(|record| record.token0)
    }

    pub fn token1(&self, pair: &Pubkey) -> Result<Pubkey, PairError> {
        self.record(pair).map(|record| record.token1)
    }

    /// Returns `(reserve0, reserve1, last_update)` from one snapshot.
    pub fn get_reserves(&self, pair: &Pubkey) -> Result<(u64, u64, i64), PairError> {
        self.record(pair)
            .map(|record| (record.reserve0, record.reserve1, record.last_update))
    }

    /// Returns true when `pair` holds `token` on either side.
    pub fn holds_token(&self, pair: &Pubkey, token: &Pubkey) -> Result<bool, PairError> {
        let record = self.record(pair)?;
        Ok(record.token0 == *token || record.token1 == *token)
    }

    /// Reserve of `token` inside `pair`, whichever side it sits on.
    pub fn reserve_of(&self, pair: &Pubkey, token: &Pubkey) -> Result<u64, PairError> {
        let record = self.record(pair)?;
        if record.token0 == *token {
            Ok(record.reserve0)
        } else if record.token1 == *token {
            Ok(record.reserve1)
        } else {
            Err(PairError::MissingToken {
                pair: *pair,
                token: *token,
            })
        }
    }

    fn record(&self, pair: &Pubkey) -> Result<&TradingPair, PairError> {
        self.pairs.get(pair).ok_or(PairError::UnknownPair(*pair))
    }
}
