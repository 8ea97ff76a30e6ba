//! Instruction processing logic for the Liquidity Manager program.
//!
//! Every handler checks all of its preconditions before touching state, so
//! a rejected call never leaves a partial mutation behind. The payout
//! handlers are the one deliberate exception to "one call, one effect":
//! they advance a resumable batch whose durable checkpoint is the
//! allocation table, and each settled entry is final on its own.

#![allow(clippy::arithmetic_side_effects)]

use {
    crate::{
        error::LiquidityManagerError,
        instruction::ManagerInstruction,
        state::{Allocation, ManagerState, PoolCategory, WhitelistedPool},
        valuator,
    },
    lmv1_core::{
        constants::PERCENT_DENOMINATOR, ledger::TokenLedger, pair::PairDirectory,
        traits::EmissionSource,
    },
    log::{debug, warn},
    solana_clock::Clock,
    solana_pubkey::Pubkey,
};

/// Collaborators every dispatched instruction runs against.
pub struct ExecutionContext<'a> {
    /// Key driving the call; checked against the stored authority for
    /// administrative instructions.
    pub caller: Pubkey,
    pub ledger: &'a mut TokenLedger,
    pub pairs: &'a PairDirectory,
}

/// Dispatches one manager instruction.
pub fn process_instruction(
    state: &mut ManagerState,
    ctx: &mut ExecutionContext,
    instruction: ManagerInstruction,
) -> Result<(), LiquidityManagerError> {
    match instruction {
        ManagerInstruction::AddWhitelistedPool { pool, payee, weight } => {
            process_add_whitelisted_pool(state, ctx, pool, payee, weight)
        }
        ManagerInstruction::RemoveWhitelistedPool { pool } => {
            process_remove_whitelisted_pool(state, ctx, pool)
        }
        ManagerInstruction::ChangeWeight { pool, weight } => {
            process_change_weight(state, ctx, pool, weight)
        }
        ManagerInstruction::SetReferencePair { pair } => {
            process_set_reference_pair(state, ctx, pair)
        }
        ManagerInstruction::ActivateSplit {
            base_percent,
            emission_percent,
        } => process_activate_split(state, ctx, base_percent, emission_percent),
        ManagerInstruction::DeactivateSplit => process_deactivate_split(state, ctx),
        ManagerInstruction::CalculateReturns => process_calculate_returns(state, ctx),
        ManagerInstruction::DistributeTokens => process_distribute_tokens(state, ctx),
        ManagerInstruction::DistributeSinglePool { index } => {
            let index =
                usize::try_from(index).map_err(|_| LiquidityManagerError::IndexOutOfBounds)?;
            process_distribute_single_pool(state, ctx, index)
        }
    }
}

// ---------------------------------------------------------------------------
// Whitelist administration
// ---------------------------------------------------------------------------

/// `AddWhitelistedPool { pool, payee, weight }`
pub fn process_add_whitelisted_pool(
    state: &mut ManagerState,
    ctx: &ExecutionContext,
    pool: Pubkey,
    payee: Pubkey,
    weight: u64,
) -> Result<(), LiquidityManagerError> {
    require_authority(state, ctx)?;
    if pool == Pubkey::default() {
        return Err(LiquidityManagerError::ZeroAddress);
    }
    if state.round.in_progress() {
        warn!("AddWhitelistedPool: rejected while a round is in flight");
        return Err(LiquidityManagerError::RegistryFrozen);
    }
    if state.registry.contains(&pool) {
        return Err(LiquidityManagerError::AlreadyWhitelisted);
    }
    if weight == 0 {
        return Err(LiquidityManagerError::ZeroWeight);
    }

    let token0 = ctx.pairs.token0(&pool)?;
    let token1 = ctx.pairs.token1(&pool)?;
    if token0 == token1 {
        return Err(LiquidityManagerError::IdenticalTokens);
    }
    // The reward token wins the classification even when the pair also
    // carries the wrapped-native token, so the reference pair itself lands
    // in the emission bucket.
    let category = if token0 == state.reward_mint || token1 == state.reward_mint {
        PoolCategory::Emission
    } else if token0 == state.wrapped_native || token1 == state.wrapped_native {
        PoolCategory::Base
    } else {
        return Err(LiquidityManagerError::MissingBaseOrEmissionToken);
    };

    state.registry.insert(WhitelistedPool {
        pool,
        payee,
        weight,
        category,
    });
    debug!("AddWhitelistedPool: {pool} ({category:?}, weight {weight}) -> payee {payee}");
    Ok(())
}

/// `RemoveWhitelistedPool { pool }`
pub fn process_remove_whitelisted_pool(
    state: &mut ManagerState,
    ctx: &ExecutionContext,
    pool: Pubkey,
) -> Result<(), LiquidityManagerError> {
    require_authority(state, ctx)?;
    if state.round.in_progress() {
        warn!("RemoveWhitelistedPool: rejected while a round is in flight");
        return Err(LiquidityManagerError::RegistryFrozen);
    }
    state
        .registry
        .remove(&pool)
        .ok_or(LiquidityManagerError::NotWhitelisted)?;
    debug!("RemoveWhitelistedPool: {pool}");
    Ok(())
}

/// `ChangeWeight { pool, weight }`
///
/// Allowed mid-round: the in-flight allocation table was fixed by
/// `calculate` and is unaffected.
pub fn process_change_weight(
    state: &mut ManagerState,
    ctx: &ExecutionContext,
    pool: Pubkey,
    weight: u64,
) -> Result<(), LiquidityManagerError> {
    require_authority(state, ctx)?;
    if weight == 0 {
        return Err(LiquidityManagerError::ZeroWeight);
    }
    let entry = state
        .registry
        .get_mut(&pool)
        .ok_or(LiquidityManagerError::NotWhitelisted)?;
    debug!("ChangeWeight: {pool} {} -> {weight}", entry.weight);
    entry.weight = weight;
    Ok(())
}

/// `SetReferencePair { pair }`
pub fn process_set_reference_pair(
    state: &mut ManagerState,
    ctx: &ExecutionContext,
    pair: Pubkey,
) -> Result<(), LiquidityManagerError> {
    require_authority(state, ctx)?;
    if pair == Pubkey::default() {
        return Err(LiquidityManagerError::ZeroAddress);
    }
    debug!("SetReferencePair: {pair}");
    state.reference_pair = Some(pair);
    Ok(())
}

/// `ActivateSplit { base_percent, emission_percent }`
pub fn process_activate_split(
    state: &mut ManagerState,
    ctx: &ExecutionContext,
    base_percent: u64,
    emission_percent: u64,
) -> Result<(), LiquidityManagerError> {
    require_authority(state, ctx)?;
    if base_percent
        .checked_add(emission_percent)
        .map_or(true, |total| total != PERCENT_DENOMINATOR)
    {
        return Err(LiquidityManagerError::InvalidSplitTotal);
    }
    if base_percent == 0 || emission_percent == 0 {
        return Err(LiquidityManagerError::ZeroSplitShare);
    }
    state.split.active = true;
    state.split.base_percent = base_percent;
    state.split.emission_percent = emission_percent;
    debug!("ActivateSplit: {base_percent}/{emission_percent}");
    Ok(())
}

/// `DeactivateSplit`
pub fn process_deactivate_split(
    state: &mut ManagerState,
    ctx: &ExecutionContext,
) -> Result<(), LiquidityManagerError> {
    require_authority(state, ctx)?;
    if !state.split.active {
        return Err(LiquidityManagerError::SplitNotActive);
    }
    state.split.active = false;
    state.split.base_percent = 0;
    state.split.emission_percent = 0;
    debug!("DeactivateSplit");
    Ok(())
}

// ---------------------------------------------------------------------------
// Round lifecycle
// ---------------------------------------------------------------------------

/// Pulls newly released tokens from the upstream emission source into the
/// unallocated balance.
///
/// On success the whole funding balance becomes the unallocated amount;
/// that is how the previous round's floor residue (and any donations) roll
/// into the next cycle instead of stranding.
pub fn process_vest_allocation<S: EmissionSource>(
    state: &mut ManagerState,
    source: &mut S,
    ledger: &mut TokenLedger,
    clock: &Clock,
) -> Result<u64, LiquidityManagerError> {
    if state.round.in_progress() {
        return Err(LiquidityManagerError::UnallocatedTokensRemain);
    }
    let funding = state.funding_account;
    let claimed = source.claim(&funding, ledger, clock).map_err(|err| {
        warn!("VestAllocation: upstream claim failed: {err}");
        LiquidityManagerError::from(err)
    })?;
    if claimed == 0 {
        return Err(LiquidityManagerError::NothingClaimed);
    }
    let balance = ledger.balance_of(&funding);
    let required = state
        .round
        .unallocated
        .checked_add(claimed)
        .ok_or(LiquidityManagerError::ArithmeticOverflow)?;
    if balance < required {
        warn!("VestAllocation: funding balance {balance} < recorded {required}");
        return Err(LiquidityManagerError::InsufficientBacking);
    }
    state.round.unallocated = balance;
    debug!("VestAllocation: claimed {claimed}, unallocated now {balance}");
    Ok(claimed)
}

/// `CalculateReturns`
///
/// Prices every whitelisted pool, fixes the allocation table, and freezes
/// the whitelist until the table is fully paid.
pub fn process_calculate_returns(
    state: &mut ManagerState,
    ctx: &mut ExecutionContext,
) -> Result<(), LiquidityManagerError> {
    if state.round.in_progress() {
        return Err(LiquidityManagerError::DistributionInProgress);
    }
    if state.round.unallocated == 0 {
        return Err(LiquidityManagerError::NothingToAllocate);
    }

    // The reference rate is read once per round, and only when an
    // emission-category pool actually needs it.
    let needs_rate = state
        .registry
        .iter()
        .any(|entry| entry.category == PoolCategory::Emission);
    let rate = if needs_rate {
        let reference_pair = state
            .reference_pair
            .ok_or(LiquidityManagerError::ReferencePairNotSet)?;
        valuator::reference_rate(
            ctx.pairs,
            &reference_pair,
            &state.wrapped_native,
            &state.reward_mint,
        )?
    } else {
        0
    };

    struct Scored {
        pool: Pubkey,
        payee: Pubkey,
        category: PoolCategory,
        score: u128,
    }

    let mut scored = Vec::with_capacity(state.registry.len());
    let mut base_sum: u128 = 0;
    let mut emission_sum: u128 = 0;
    for entry in state.registry.iter() {
        let liquidity = match entry.category {
            PoolCategory::Base => {
                valuator::base_liquidity(ctx.pairs, &entry.pool, &state.wrapped_native)?
            }
            PoolCategory::Emission => {
                valuator::emission_liquidity(ctx.pairs, &entry.pool, &state.reward_mint, rate)?
            }
        };
        let score = u128::from(liquidity)
            .checked_mul(u128::from(entry.weight))
            .ok_or(LiquidityManagerError::ArithmeticOverflow)?;
        match entry.category {
            PoolCategory::Base => {
                base_sum = base_sum
                    .checked_add(score)
                    .ok_or(LiquidityManagerError::ArithmeticOverflow)?;
            }
            PoolCategory::Emission => {
                emission_sum = emission_sum
                    .checked_add(score)
                    .ok_or(LiquidityManagerError::ArithmeticOverflow)?;
            }
        }
        scored.push(Scored {
            pool: entry.pool,
            payee: entry.payee,
            category: entry.category,
            score,
        });
    }

    let unallocated = u128::from(state.round.unallocated);
    let percent = u128::from(PERCENT_DENOMINATOR);
    let (base_budget, emission_budget) = if state.split.active {
        (
            unallocated
                .checked_mul(u128::from(state.split.base_percent))
                .ok_or(LiquidityManagerError::ArithmeticOverflow)?
                / percent,
            unallocated
                .checked_mul(u128::from(state.split.emission_percent))
                .ok_or(LiquidityManagerError::ArithmeticOverflow)?
                / percent,
        )
    } else {
        // Without an active split both categories draw from one pooled
        // budget against the combined score sum.
        (unallocated, unallocated)
    };
    let (base_sum, emission_sum) = if state.split.active {
        (base_sum, emission_sum)
    } else {
        let combined = base_sum
            .checked_add(emission_sum)
            .ok_or(LiquidityManagerError::ArithmeticOverflow)?;
        (combined, combined)
    };

    let mut allocations = Vec::with_capacity(scored.len());
    for entry in &scored {
        let (budget, sum) = match entry.category {
            PoolCategory::Base => (base_budget, base_sum),
            PoolCategory::Emission => (emission_budget, emission_sum),
        };
        let owed = if sum == 0 {
            0
        } else {
            let share = budget
                .checked_mul(entry.score)
                .ok_or(LiquidityManagerError::ArithmeticOverflow)?
                / sum;
            u64::try_from(share).map_err(|_| LiquidityManagerError::ArithmeticOverflow)?
        };
        allocations.push(Allocation {
            pool: entry.pool,
            payee: entry.payee,
            owed,
        });
    }

    let owed_total: u64 = allocations.iter().map(|entry| entry.owed).sum();
    state.round.allocations = allocations;
    state.round.calculating = true;
    debug!(
        "CalculateReturns: {} pools, {} owed of {} unallocated",
        state.round.allocations.len(),
        owed_total,
        state.round.unallocated
    );
    Ok(())
}

/// `DistributeTokens`
///
/// Pays every outstanding entry and completes the round. Entries already
/// settled by `DistributeSinglePool` are skipped.
pub fn process_distribute_tokens(
    state: &mut ManagerState,
    ctx: &mut ExecutionContext,
) -> Result<(), LiquidityManagerError> {
    if !state.round.in_progress() {
        return Err(LiquidityManagerError::NothingCalculated);
    }
    for index in 0..state.round.allocations.len() {
        settle_entry(state, ctx.ledger, index)?;
    }
    state.round.reset();
    debug!(
        "DistributeTokens: round complete, {} residue carried forward",
        state.round.unallocated
    );
    Ok(())
}

/// `DistributeSinglePool { index }`
///
/// Pays exactly one entry. Settling the last outstanding entry completes
/// the round, no matter how the earlier entries were paid.
pub fn process_distribute_single_pool(
    state: &mut ManagerState,
    ctx: &mut ExecutionContext,
    index: usize,
) -> Result<(), LiquidityManagerError> {
    if !state.round.in_progress() {
        return Err(LiquidityManagerError::NothingCalculated);
    }
    if index >= state.round.allocations.len() {
        return Err(LiquidityManagerError::IndexOutOfBounds);
    }
    settle_entry(state, ctx.ledger, index)?;
    if state.round.fully_paid() {
        state.round.reset();
        debug!(
            "DistributeSinglePool: round complete, {} residue carried forward",
            state.round.unallocated
        );
    }
    Ok(())
}

/// Pays one allocation entry and zeroes it. A settled entry is a no-op.
///
/// The new unallocated figure is computed before the transfer so the entry
/// settles atomically: either the payee is paid and the books move
/// together, or nothing changes.
fn settle_entry(
    state: &mut ManagerState,
    ledger: &mut TokenLedger,
    index: usize,
) -> Result<u64, LiquidityManagerError> {
    let (payee, owed) = {
        let entry = &state.round.allocations[index];
        (entry.payee, entry.owed)
    };
    if owed == 0 {
        return Ok(0);
    }
    let remaining = state
        .round
        .unallocated
        .checked_sub(owed)
        .ok_or(LiquidityManagerError::InsufficientBacking)?;
    ledger.transfer(&state.funding_account, &payee, owed)?;
    state.round.allocations[index].owed = 0;
    state.round.unallocated = remaining;
    debug!("settled allocation {index}: {owed} -> {payee}");
    Ok(owed)
}

fn require_authority(
    state: &ManagerState,
    ctx: &ExecutionContext,
) -> Result<(), LiquidityManagerError> {
    if ctx.caller != state.authority {
        return Err(LiquidityManagerError::UnauthorizedAuthority);
    }
    Ok(())
}
