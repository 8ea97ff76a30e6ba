//! In-memory fungible ledger of the reward token.
//!
//! Balances are held in [`AccountSharedData`] records keyed by address, with
//! the amount carried in the account's lamport field. The ledger exposes the
//! narrow `balance_of` / `transfer` contract the programs depend on, plus
//! `credit` / `debit` for the mint-side runtime.

use {
    crate::error::LedgerError,
    solana_account::{AccountSharedData, ReadableAccount, WritableAccount},
    solana_pubkey::Pubkey,
    std::collections::HashMap,
};

/// The fungible ledger of the reward token.
///
/// Accounts are created implicitly on first credit and are never deleted.
/// Every mutating operation either applies fully or leaves the ledger
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    /// Mint address of the tracked token; recorded as the owner of every
    /// account the ledger creates.
    mint: Pubkey,
    accounts: HashMap<Pubkey, AccountSharedData>,
}

impl TokenLedger {
    pub fn new(mint: Pubkey) -> Self {
        Self {
            mint,
            accounts: HashMap::new(),
        }
    }

    /// Mint address of the tracked token.
    pub fn mint(&self) -> &Pubkey {
        &self.mint
    }

    /// Balance of `account` in base units. Unknown accounts read as zero.
    pub fn balance_of(&self, account: &Pubkey) -> u64 {
        self.accounts
            .get(account)
            .map(|account| account.lamports())
            .unwrap_or(0)
    }

    /// Returns true once `account` has received at least one credit.
    pub fn contains(&self, account: &Pubkey) -> bool {
        self.accounts.contains_key(account)
    }

    /// Credits `amount` base units to `account`, creating it if needed.
    pub fn credit(&mut self, account: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let record = self
            .accounts
            .entry(*account)
            .or_insert_with(|| AccountSharedData::new(0, 0, &self.mint));
        let raised = record
            .lamports()
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        record.set_lamports(raised);
        Ok(())
    }

    /// Debits `amount` base units from `account`.
    pub fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let record = self
            .accounts
            .get_mut(account)
            .ok_or(LedgerError::UnknownAccount(*account))?;
        let balance = record.lamports();
        let lowered = balance.checked_sub(amount).ok_or({
            LedgerError::InsufficientFunds {
                account: *account,
                balance,
                required: amount,
            }
        })?;
        record.set_lamports(lowered);
        Ok(())
    }

    /// Moves `amount` base units from `from` to `to`.
    ///
    /// All checks run before either balance changes, so a failed transfer
    /// never leaves a half-applied state.
    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        if from == to {
            // A self-transfer still requires the balance to exist.
            let balance = self.balance_of(from);
            if balance < amount {
                return Err(LedgerError::InsufficientFunds {
                    account: *from,
                    balance,
                    required: amount,
                });
            }
            return Ok(());
        }

        let balance = self
            .accounts
            .get(from)
            .map(|record| record.lamports())
            .ok_or(LedgerError::UnknownAccount(*from))?;
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: *from,
                balance,
                required: amount,
            });
        }
        self.balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.debit(from, amount)?;
        self.credit(to, amount)?;
        Ok(())
    }
}
