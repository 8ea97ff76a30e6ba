//! Account state types for the Treasury Vester program.

use {
    crate::constants::{
        HALVING_PERIOD, INITIAL_VESTING_AMOUNT, STARTING_BALANCE, VESTING_CLIFF,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    solana_pubkey::Pubkey,
};

/// Discriminator byte written at the start of every vester state record.
pub const VESTER_STATE_DISCRIMINATOR: u8 = 1;

/// Discriminator byte written at the start of every proxy state record.
pub const PROXY_STATE_DISCRIMINATOR: u8 = 2;

/// Schedule and accounting state of the treasury vester.
///
/// Serialised with Borsh; the first byte of the record is the discriminator.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VesterState {
    /// Key allowed to set the recipient and start vesting.
    pub authority: Pubkey,

    /// The vester's own ledger account, holding the unreleased backing.
    pub vester_account: Pubkey,

    /// Account credited by each release. `Pubkey::default()` until set.
    pub recipient: Pubkey,

    /// Amount released per claim; halves when the countdown reaches zero.
    pub vesting_amount: u64,

    /// Number of releases between halvings.
    pub halving_period: u32,

    /// Releases remaining until the next halving. Counts down from
    /// `halving_period`; when a claim finds it at zero the release amount
    /// halves and the countdown resets.
    pub next_halving: u32,

    /// Minimum seconds between releases.
    pub vesting_cliff: i64,

    /// Backing balance required, exactly, for `start_vesting`.
    pub starting_balance: u64,

    /// Unix timestamp of the last release; zero before the first claim.
    pub last_update: i64,

    /// Set once by `start_vesting`.
    pub vesting_enabled: bool,
}

impl VesterState {
    /// Layout:
    ///   discriminator     (1)
    ///   authority         (32)
    ///   vester_account    (32)
    ///   recipient         (32)
    ///   vesting_amount    (8)
    ///   halving_period    (4)
    ///   next_halving      (4)
    ///   vesting_cliff     (8)
    ///   starting_balance  (8)
    ///   last_update       (8)
    ///   vesting_enabled   (1)
    ///   = 138 bytes
    pub const SERIALIZED_SIZE: usize = 1 + 32 + 32 + 32 + 8 + 4 + 4 + 8 + 8 + 8 + 1;

    /// Fresh vester with the default production schedule.
    pub fn new(authority: Pubkey, vester_account: Pubkey) -> Self {
        Self {
            authority,
            vester_account,
            recipient: Pubkey::default(),
            vesting_amount: INITIAL_VESTING_AMOUNT,
            halving_period: HALVING_PERIOD,
            next_halving: HALVING_PERIOD,
            vesting_cliff: VESTING_CLIFF,
            starting_balance: STARTING_BALANCE,
            last_update: 0,
            vesting_enabled: false,
        }
    }

    /// Deserialise from raw record data (expects the leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        read_with_discriminator(data, VESTER_STATE_DISCRIMINATOR)
    }

    /// Serialise into raw record data (prepends the discriminator).
    pub fn serialize_into(&self, data: &mut [u8]) -> Result<(), std::io::Error> {
        write_with_discriminator(self, data, Self::SERIALIZED_SIZE, VESTER_STATE_DISCRIMINATOR)
    }
}

/// State of the diversion proxy sitting between the vester and the engine.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProxyState {
    /// The proxy's own ledger account; the vester's recipient once wired up.
    pub proxy_account: Pubkey,

    /// Community treasury credited with the diversion.
    pub treasury: Pubkey,

    /// Funding account of the distribution engine; receives the remainder.
    pub beneficiary: Pubkey,

    /// Number of completed claim-and-distribute cycles.
    pub claim_count: u64,

    /// Set once by `init` after the recipient wiring is verified.
    pub initialized: bool,
}

impl ProxyState {
    /// discriminator (1) + 3 × Pubkey (96) + claim_count (8) + initialized (1)
    pub const SERIALIZED_SIZE: usize = 1 + 32 + 32 + 32 + 8 + 1;

    pub fn new(proxy_account: Pubkey, treasury: Pubkey, beneficiary: Pubkey) -> Self {
        Self {
            proxy_account,
            treasury,
            beneficiary,
            claim_count: 0,
            initialized: false,
        }
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        read_with_discriminator(data, PROXY_STATE_DISCRIMINATOR)
    }

    pub fn serialize_into(&self, data: &mut [u8]) -> Result<(), std::io::Error> {
        write_with_discriminator(self, data, Self::SERIALIZED_SIZE, PROXY_STATE_DISCRIMINATOR)
    }
}

/// The diversion proxy together with the vester it wraps.
///
/// The proxy owns the vester: every release flows through the proxy account
/// and is split between the treasury and the engine's funding account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiversionProxy {
    pub vester: VesterState,
    pub state: ProxyState,
}

impl DiversionProxy {
    pub fn new(vester: VesterState, state: ProxyState) -> Self {
        Self { vester, state }
    }
}

fn read_with_discriminator<T: BorshDeserialize>(
    data: &[u8],
    discriminator: u8,
) -> Result<T, std::io::Error> {
    if data.is_empty() || data[0] != discriminator {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "missing or invalid state discriminator",
        ));
    }
    let mut cursor = &data[1..];
    T::deserialize_reader(&mut cursor)
}

fn write_with_discriminator<T: BorshSerialize>(
    value: &T,
    data: &mut [u8],
    serialized_size: usize,
    discriminator: u8,
) -> Result<(), std::io::Error> {
    if data.len() < serialized_size {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "state buffer too small",
        ));
    }
    data[0] = discriminator;
    let mut cursor = &mut data[1..];
    BorshSerialize::serialize(value, &mut cursor)
}
