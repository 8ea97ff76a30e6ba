//! LMv1 Test Harness
//!
//! Provides a deterministic environment for integration-testing the LMv1
//! programs: an in-memory token ledger, a pair directory playing the role
//! of the on-chain reserve source, a manually advanced clock, and a funded
//! authority. No runtime is spun up — the suites drive the program crate
//! APIs directly.

use {
    lmv1_core::{
        error::EmissionError,
        ledger::TokenLedger,
        pair::{PairDirectory, TradingPair},
        traits::EmissionSource,
    },
    lmv1_liquidity_manager_program::{
        error::LiquidityManagerError,
        instruction::ManagerInstruction,
        processor::{process_instruction, process_vest_allocation, ExecutionContext},
        state::ManagerState,
    },
    lmv1_treasury_vester_program::{
        error::VesterError,
        processor::process_claim,
        state::VesterState,
    },
    solana_clock::Clock,
    solana_keypair::Keypair,
    solana_pubkey::Pubkey,
    solana_signer::Signer,
};

// ─── Constants ───────────────────────────────────────────────────────────────

/// One whole token in base units.
pub const TOKEN: u64 = 1_000_000_000;

/// Harness start time (~Nov 2023), safely past every cliff at epoch zero.
pub const START_TIME: i64 = 1_700_000_000;

// ─── Mock emission source ────────────────────────────────────────────────────

/// Scriptable stand-in for the treasury vester.
///
/// `amount` is what `claim` reports as released; with `deliver` unset the
/// report is a lie (nothing is credited), which is exactly what the
/// starvation tests need.
pub struct MockEmissionSource {
    pub amount: u64,
    pub deliver: bool,
}

impl MockEmissionSource {
    pub fn delivering(amount: u64) -> Self {
        Self {
            amount,
            deliver: true,
        }
    }

    pub fn reporting_only(amount: u64) -> Self {
        Self {
            amount,
            deliver: false,
        }
    }
}

impl EmissionSource for MockEmissionSource {
    fn claim(
        &mut self,
        caller: &Pubkey,
        ledger: &mut TokenLedger,
        _clock: &Clock,
    ) -> Result<u64, EmissionError> {
        if self.deliver && self.amount > 0 {
            ledger.credit(caller, self.amount)?;
        }
        Ok(self.amount)
    }
}

// ─── Test harness ────────────────────────────────────────────────────────────

/// Top-level harness owning every collaborator the programs touch.
pub struct MiningTestHarness {
    pub ledger: TokenLedger,
    pub pairs: PairDirectory,
    /// Administrator of the manager and the vester.
    pub authority: Keypair,
    /// Wrapped-native token mint (the pricing base).
    pub wrapped_native: Pubkey,
    /// Reward token mint (the emission).
    pub reward_mint: Pubkey,
    /// Current simulated slot.
    pub current_slot: u64,
    /// Current simulated epoch.
    pub current_epoch: u64,
    /// Current simulated unix timestamp.
    pub current_unix_timestamp: i64,
}

impl Default for MiningTestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl MiningTestHarness {
    pub fn new() -> Self {
        let reward_mint = Pubkey::new_unique();
        Self {
            ledger: TokenLedger::new(reward_mint),
            pairs: PairDirectory::new(),
            authority: Keypair::new(),
            wrapped_native: Pubkey::new_unique(),
            reward_mint,
            current_slot: 0,
            current_epoch: 0,
            current_unix_timestamp: START_TIME,
        }
    }

    /// Snapshot of the simulated clock.
    pub fn clock(&self) -> Clock {
        Clock {
            slot: self.current_slot,
            epoch: self.current_epoch,
            unix_timestamp: self.current_unix_timestamp,
            ..Clock::default()
        }
    }

    /// Advance simulated time without advancing epochs.
    pub fn advance_seconds(&mut self, seconds: i64) {
        self.current_unix_timestamp += seconds;
        // ~400ms per slot.
        self.current_slot += (seconds as u64) * 5 / 2;
    }

    /// Advance simulated time by whole days (one epoch ≈ one day).
    pub fn advance_days(&mut self, days: i64) {
        self.advance_seconds(days * 86_400);
        self.current_epoch += days as u64;
    }

    // ── Ledger helpers ──────────────────────────────────────────────────

    pub fn fund(&mut self, account: &Pubkey, amount: u64) {
        self.ledger
            .credit(account, amount)
            .expect("funding a test account");
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.ledger.balance_of(account)
    }

    // ── Pair builders ───────────────────────────────────────────────────

    /// Registers an arbitrary pair and returns its address.
    pub fn register_pair(
        &mut self,
        token0: Pubkey,
        token1: Pubkey,
        reserve0: u64,
        reserve1: u64,
    ) -> Pubkey {
        let pair = Pubkey::new_unique();
        self.pairs.register_pair(
            pair,
            TradingPair {
                token0,
                token1,
                reserve0,
                reserve1,
                last_update: self.current_unix_timestamp,
            },
        );
        pair
    }

    /// Wrapped-native / <fresh token> pair (base category).
    pub fn base_pair(&mut self, native_reserve: u64, other_reserve: u64) -> Pubkey {
        let other = Pubkey::new_unique();
        self.register_pair(self.wrapped_native, other, native_reserve, other_reserve)
    }

    /// Reward / <fresh token> pair (emission category), reward on side 0.
    pub fn emission_pair(&mut self, reward_reserve: u64, other_reserve: u64) -> Pubkey {
        let other = Pubkey::new_unique();
        self.register_pair(self.reward_mint, other, reward_reserve, other_reserve)
    }

    /// Wrapped-native / reward pair used as the reference rate source.
    pub fn reference_pair(&mut self, native_reserve: u64, reward_reserve: u64) -> Pubkey {
        self.register_pair(
            self.wrapped_native,
            self.reward_mint,
            native_reserve,
            reward_reserve,
        )
    }

    // ── Manager helpers ─────────────────────────────────────────────────

    /// Fresh manager administered by the harness authority.
    pub fn new_manager(&self) -> ManagerState {
        ManagerState::new(
            self.authority.pubkey(),
            Pubkey::new_unique(),
            self.wrapped_native,
            self.reward_mint,
        )
    }

    /// Dispatches an instruction signed by the harness authority.
    pub fn execute(
        &mut self,
        state: &mut ManagerState,
        instruction: ManagerInstruction,
    ) -> Result<(), LiquidityManagerError> {
        let caller = self.authority.pubkey();
        self.execute_as(caller, state, instruction)
    }

    /// Dispatches an instruction signed by an arbitrary caller.
    pub fn execute_as(
        &mut self,
        caller: Pubkey,
        state: &mut ManagerState,
        instruction: ManagerInstruction,
    ) -> Result<(), LiquidityManagerError> {
        let mut ctx = ExecutionContext {
            caller,
            ledger: &mut self.ledger,
            pairs: &self.pairs,
        };
        process_instruction(state, &mut ctx, instruction)
    }

    /// Whitelists `pool` with a fresh payee and returns the payee address.
    pub fn whitelist(
        &mut self,
        state: &mut ManagerState,
        pool: Pubkey,
        weight: u64,
    ) -> Result<Pubkey, LiquidityManagerError> {
        let payee = Pubkey::new_unique();
        self.execute(
            state,
            ManagerInstruction::AddWhitelistedPool { pool, payee, weight },
        )?;
        Ok(payee)
    }

    /// Pulls from `source` into the manager's unallocated balance.
    pub fn vest<S: EmissionSource>(
        &mut self,
        state: &mut ManagerState,
        source: &mut S,
    ) -> Result<u64, LiquidityManagerError> {
        let clock = self.clock();
        process_vest_allocation(state, source, &mut self.ledger, &clock)
    }

    // ── Vester helpers ──────────────────────────────────────────────────

    /// Fresh vester with the production schedule, administered by the
    /// harness authority.
    pub fn new_vester(&self) -> VesterState {
        VesterState::new(self.authority.pubkey(), Pubkey::new_unique())
    }

    /// Credits the vester account with exactly its configured backing.
    pub fn fund_vester(&mut self, vester: &VesterState) {
        let (account, backing) = (vester.vester_account, vester.starting_balance);
        self.fund(&account, backing);
    }

    /// Claims from the vester as `caller` at the current simulated time.
    pub fn claim_as(
        &mut self,
        vester: &mut VesterState,
        caller: &Pubkey,
    ) -> Result<u64, VesterError> {
        let clock = self.clock();
        process_claim(vester, caller, &mut self.ledger, &clock)
    }
}
