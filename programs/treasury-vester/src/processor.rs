//! Instruction processing logic for the Treasury Vester program.

#![allow(clippy::arithmetic_side_effects)]

use {
    crate::{
        constants::{BASE_DIVERSION, DIVERSION_STEP},
        error::VesterError,
        instruction::{ProxyInstruction, VesterInstruction},
        state::{DiversionProxy, VesterState},
    },
    lmv1_core::{error::EmissionError, ledger::TokenLedger, traits::EmissionSource},
    log::{debug, warn},
    solana_clock::Clock,
    solana_pubkey::Pubkey,
};

/// Dispatches one vester instruction on behalf of `caller`.
pub fn process_instruction(
    state: &mut VesterState,
    caller: &Pubkey,
    ledger: &mut TokenLedger,
    clock: &Clock,
    instruction: VesterInstruction,
) -> Result<(), VesterError> {
    match instruction {
        VesterInstruction::SetRecipient { recipient } => {
            process_set_recipient(state, caller, recipient)
        }
        VesterInstruction::StartVesting => process_start_vesting(state, caller, ledger),
        VesterInstruction::Claim => process_claim(state, caller, ledger, clock).map(|_| ()),
    }
}

/// Dispatches one proxy instruction on behalf of `caller`.
pub fn process_proxy_instruction(
    proxy: &mut DiversionProxy,
    caller: &Pubkey,
    ledger: &mut TokenLedger,
    clock: &Clock,
    instruction: ProxyInstruction,
) -> Result<(), VesterError> {
    match instruction {
        ProxyInstruction::Init => process_init_proxy(proxy, caller),
        ProxyInstruction::ClaimAndDistribute => {
            process_claim_and_distribute(proxy, ledger, clock).map(|_| ())
        }
    }
}

/// `SetRecipient { recipient }`
pub fn process_set_recipient(
    state: &mut VesterState,
    caller: &Pubkey,
    recipient: Pubkey,
) -> Result<(), VesterError> {
    if *caller != state.authority {
        return Err(VesterError::UnauthorizedAuthority);
    }
    if recipient == Pubkey::default() {
        return Err(VesterError::ZeroRecipientAddress);
    }
    debug!("SetRecipient: {} -> {}", state.recipient, recipient);
    state.recipient = recipient;
    Ok(())
}

/// `StartVesting`
///
/// The backing balance must equal the configured starting balance exactly:
/// a short vester would renege on the schedule, an over-funded one hints at
/// a mis-deployment.
pub fn process_start_vesting(
    state: &mut VesterState,
    caller: &Pubkey,
    ledger: &TokenLedger,
) -> Result<(), VesterError> {
    if *caller != state.authority {
        return Err(VesterError::UnauthorizedAuthority);
    }
    if state.vesting_enabled {
        return Err(VesterError::VestingAlreadyStarted);
    }
    let backing = ledger.balance_of(&state.vester_account);
    if backing != state.starting_balance {
        warn!(
            "StartVesting: backing balance {} != configured {}",
            backing, state.starting_balance
        );
        return Err(VesterError::IncorrectStartingBalance);
    }
    state.vesting_enabled = true;
    debug!("StartVesting: enabled with backing {}", backing);
    Ok(())
}

/// `Claim`
///
/// Releases the current vesting amount to the recipient and advances the
/// halving countdown. State is only written after the transfer settles, so
/// a failed release leaves the schedule untouched.
pub fn process_claim(
    state: &mut VesterState,
    caller: &Pubkey,
    ledger: &mut TokenLedger,
    clock: &Clock,
) -> Result<u64, VesterError> {
    if !state.vesting_enabled {
        return Err(VesterError::VestingNotStarted);
    }
    if state.recipient == Pubkey::default() || *caller != state.recipient {
        return Err(VesterError::UnauthorizedRecipient);
    }
    let unlock_at = state
        .last_update
        .checked_add(state.vesting_cliff)
        .ok_or(VesterError::ArithmeticOverflow)?;
    if clock.unix_timestamp < unlock_at {
        return Err(VesterError::CliffNotReached);
    }

    // A countdown that ran out on the previous claim halves the release now.
    let (release, countdown) = if state.next_halving == 0 {
        (state.vesting_amount / 2, state.halving_period)
    } else {
        (state.vesting_amount, state.next_halving)
    };

    ledger.transfer(&state.vester_account, &state.recipient, release)?;

    state.vesting_amount = release;
    state.next_halving = countdown.saturating_sub(1);
    state.last_update = clock.unix_timestamp;

    debug!(
        "Claim: released {} to {}, {} claims until halving",
        release, state.recipient, state.next_halving
    );
    Ok(release)
}

/// `Init`
///
/// The proxy only arms itself once the vester actually releases to the
/// proxy account; initializing with any other recipient would strand every
/// claim.
pub fn process_init_proxy(proxy: &mut DiversionProxy, _caller: &Pubkey) -> Result<(), VesterError> {
    if proxy.state.initialized {
        return Err(VesterError::ProxyAlreadyInitialized);
    }
    if proxy.vester.recipient != proxy.state.proxy_account {
        return Err(VesterError::InvalidVesterRecipient);
    }
    proxy.state.initialized = true;
    debug!(
        "InitProxy: treasury {}, beneficiary {}",
        proxy.state.treasury, proxy.state.beneficiary
    );
    Ok(())
}

/// `ClaimAndDistribute`
///
/// Claims from the wrapped vester, forwards the diversion to the treasury
/// and the remainder to the beneficiary. Returns `(diverted, forwarded)`.
pub fn process_claim_and_distribute(
    proxy: &mut DiversionProxy,
    ledger: &mut TokenLedger,
    clock: &Clock,
) -> Result<(u64, u64), VesterError> {
    if !proxy.state.initialized {
        return Err(VesterError::ProxyNotInitialized);
    }

    let proxy_account = proxy.state.proxy_account;
    let claimed = process_claim(&mut proxy.vester, &proxy_account, ledger, clock)?;

    let diversion = current_diversion(proxy.state.claim_count)?.min(claimed);
    let remainder = claimed - diversion;

    // Both credits must be representable before either transfer runs.
    ledger
        .balance_of(&proxy.state.treasury)
        .checked_add(diversion)
        .ok_or(VesterError::ArithmeticOverflow)?;
    ledger
        .balance_of(&proxy.state.beneficiary)
        .checked_add(remainder)
        .ok_or(VesterError::ArithmeticOverflow)?;

    ledger.transfer(&proxy_account, &proxy.state.treasury, diversion)?;
    ledger.transfer(&proxy_account, &proxy.state.beneficiary, remainder)?;

    proxy.state.claim_count = proxy
        .state
        .claim_count
        .checked_add(1)
        .ok_or(VesterError::ArithmeticOverflow)?;

    debug!(
        "ClaimAndDistribute: {} diverted to treasury, {} forwarded (claim #{})",
        diversion, remainder, proxy.state.claim_count
    );
    Ok((diversion, remainder))
}

/// Diversion owed on the claim with the given zero-based count:
/// `BASE_DIVERSION × (1 + count / DIVERSION_STEP)`.
pub fn current_diversion(claim_count: u64) -> Result<u64, VesterError> {
    let steps = claim_count / DIVERSION_STEP;
    let multiplier = steps.checked_add(1).ok_or(VesterError::ArithmeticOverflow)?;
    BASE_DIVERSION
        .checked_mul(multiplier)
        .ok_or(VesterError::ArithmeticOverflow)
}

impl EmissionSource for VesterState {
    fn claim(
        &mut self,
        caller: &Pubkey,
        ledger: &mut TokenLedger,
        clock: &Clock,
    ) -> Result<u64, EmissionError> {
        process_claim(self, caller, ledger, clock).map_err(into_emission_error)
    }
}

impl EmissionSource for DiversionProxy {
    /// Anyone may drive the proxy; only the forwarded remainder counts as
    /// emission reaching the engine.
    fn claim(
        &mut self,
        _caller: &Pubkey,
        ledger: &mut TokenLedger,
        clock: &Clock,
    ) -> Result<u64, EmissionError> {
        process_claim_and_distribute(self, ledger, clock)
            .map(|(_, forwarded)| forwarded)
            .map_err(into_emission_error)
    }
}

fn into_emission_error(err: VesterError) -> EmissionError {
    match err {
        VesterError::VestingNotStarted => EmissionError::NotStarted,
        VesterError::CliffNotReached => EmissionError::CliffNotReached,
        VesterError::UnauthorizedRecipient => EmissionError::UnauthorizedCaller,
        VesterError::ProxyNotInitialized => EmissionError::NotInitialized,
        VesterError::ArithmeticOverflow => {
            EmissionError::Ledger(lmv1_core::error::LedgerError::ArithmeticOverflow)
        }
        _ => EmissionError::Depleted,
    }
}
