//! Program state for the Liquidity Manager: the pool whitelist, the
//! distribution round, and the split configuration.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    solana_pubkey::Pubkey,
    std::{collections::HashMap, io},
};

/// Discriminator byte written at the start of every manager state record.
pub const MANAGER_STATE_DISCRIMINATOR: u8 = 1;

/// Classification bucket of a whitelisted pool.
///
/// A pool holding the reward token is `Emission` regardless of its other
/// side, so the reference pair itself classifies as `Emission`; a pool
/// holding only the wrapped-native token is `Base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum PoolCategory {
    Base,
    Emission,
}

/// One whitelisted pool position.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct WhitelistedPool {
    /// Pair address; unique key of the position.
    pub pool: Pubkey,

    /// Dedicated stake distributor receiving this pool's reward share.
    /// Assigned at registration, immutable for the position's lifetime.
    pub payee: Pubkey,

    /// Administrator-assigned weight, always ≥ 1.
    pub weight: u64,

    /// Classification determined at registration.
    pub category: PoolCategory,
}

/// Index-stable arena of whitelisted pools.
///
/// Removal swaps the last slot into the freed position and truncates, so
/// enumeration order is NOT stable across removals. This is intentional;
/// nothing in the engine depends on slot order, and allocation tables are
/// snapshotted per round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRegistry {
    slots: Vec<WhitelistedPool>,
    index: HashMap<Pubkey, usize>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, pool: &Pubkey) -> bool {
        self.index.contains_key(pool)
    }

    pub fn get(&self, pool: &Pubkey) -> Option<&WhitelistedPool> {
        self.index.get(pool).map(|&i| &self.slots[i])
    }

    pub fn get_mut(&mut self, pool: &Pubkey) -> Option<&mut WhitelistedPool> {
        let i = *self.index.get(pool)?;
        self.slots.get_mut(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WhitelistedPool> {
        self.slots.iter()
    }

    /// Inserts a new pool. Returns false (and changes nothing) when the
    /// pool is already registered.
    pub fn insert(&mut self, entry: WhitelistedPool) -> bool {
        if self.index.contains_key(&entry.pool) {
            return false;
        }
        self.index.insert(entry.pool, self.slots.len());
        self.slots.push(entry);
        true
    }

    /// Removes a pool with swap-with-last-and-pop semantics.
    pub fn remove(&mut self, pool: &Pubkey) -> Option<WhitelistedPool> {
        let i = self.index.remove(pool)?;
        let removed = self.slots.swap_remove(i);
        if let Some(moved) = self.slots.get(i) {
            self.index.insert(moved.pool, i);
        }
        Some(removed)
    }
}

impl BorshSerialize for PoolRegistry {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        // The index is derived state; only the slots travel.
        self.slots.serialize(writer)
    }
}

impl BorshDeserialize for PoolRegistry {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let slots = Vec::<WhitelistedPool>::deserialize_reader(reader)?;
        let mut index = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            if index.insert(slot.pool, i).is_some() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "duplicate pool in registry slots",
                ));
            }
        }
        Ok(Self { slots, index })
    }
}

/// One entry of the allocation table.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Allocation {
    pub pool: Pubkey,
    pub payee: Pubkey,
    /// Remaining amount owed to `payee`; decremented to zero as the payout
    /// executes. Entries settle independently.
    pub owed: u64,
}

/// The singleton distribution round.
///
/// The allocation table is the durable checkpoint of the round: it is fixed
/// by `calculate`, each entry is zeroed independently as it is paid, and the
/// round resets only when every entry has reached zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DistributionRound {
    /// Tokens available to distribute; monotonically decreasing while the
    /// round is paid down. Floor residue survives into the next cycle.
    pub unallocated: u64,

    /// True from `calculate` until the last payout; whitelist mutations are
    /// rejected while set.
    pub calculating: bool,

    /// Fixed per-pool allocation, empty while idle.
    pub allocations: Vec<Allocation>,
}

impl DistributionRound {
    pub fn in_progress(&self) -> bool {
        self.calculating
    }

    pub fn fully_paid(&self) -> bool {
        self.allocations.iter().all(|entry| entry.owed == 0)
    }

    /// Returns the round to idle, keeping the unallocated residue.
    pub fn reset(&mut self) {
        self.calculating = false;
        self.allocations.clear();
    }
}

/// Optional category split of the unallocated budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SplitConfig {
    pub active: bool,
    /// Whole percent reserved for `Base` pools while active.
    pub base_percent: u64,
    /// Whole percent reserved for `Emission` pools while active.
    pub emission_percent: u64,
}

/// Top-level state of the liquidity manager.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ManagerState {
    /// Key allowed to mutate the whitelist and configuration.
    pub authority: Pubkey,

    /// The manager's own ledger account holding undistributed tokens.
    pub funding_account: Pubkey,

    /// Wrapped-native token mint (the base asset of all pricing).
    pub wrapped_native: Pubkey,

    /// Reward token mint (the emission being distributed).
    pub reward_mint: Pubkey,

    /// Wrapped-native / reward-token pair used for the reference rate.
    pub reference_pair: Option<Pubkey>,

    pub registry: PoolRegistry,
    pub round: DistributionRound,
    pub split: SplitConfig,
}

impl ManagerState {
    pub fn new(
        authority: Pubkey,
        funding_account: Pubkey,
        wrapped_native: Pubkey,
        reward_mint: Pubkey,
    ) -> Self {
        Self {
            authority,
            funding_account,
            wrapped_native,
            reward_mint,
            reference_pair: None,
            registry: PoolRegistry::new(),
            round: DistributionRound::default(),
            split: SplitConfig::default(),
        }
    }

    // ── Pure queries ────────────────────────────────────────────────────

    pub fn is_whitelisted(&self, pool: &Pubkey) -> bool {
        self.registry.contains(pool)
    }

    pub fn category_of(&self, pool: &Pubkey) -> Option<PoolCategory> {
        self.registry.get(pool).map(|entry| entry.category)
    }

    pub fn weight_of(&self, pool: &Pubkey) -> Option<u64> {
        self.registry.get(pool).map(|entry| entry.weight)
    }

    pub fn pool_count(&self) -> usize {
        self.registry.len()
    }

    pub fn unallocated(&self) -> u64 {
        self.round.unallocated
    }

    pub fn distribution_in_progress(&self) -> bool {
        self.round.in_progress()
    }

    // ── Serialization ───────────────────────────────────────────────────

    /// Serialise to a fresh buffer (discriminator + borsh payload).
    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        let mut data = vec![MANAGER_STATE_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }

    /// Deserialise from raw record data (expects the leading discriminator).
    pub fn from_bytes(data: &[u8]) -> Result<Self, io::Error> {
        if data.is_empty() || data[0] != MANAGER_STATE_DISCRIMINATOR {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "missing or invalid manager state discriminator",
            ));
        }
        let mut cursor = &data[1..];
        Self::deserialize_reader(&mut cursor)
    }
}
