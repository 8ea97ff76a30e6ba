//! Integration tests for category-split budgeting: independent base and
//! emission budgets with rounding confined to each category.

use {
    crate::harness::{MiningTestHarness, MockEmissionSource, TOKEN},
    lmv1_liquidity_manager_program::{instruction::ManagerInstruction, state::ManagerState},
};

fn vest(harness: &mut MiningTestHarness, manager: &mut ManagerState, amount: u64) {
    let mut source = MockEmissionSource::delivering(amount);
    harness.vest(manager, &mut source).unwrap();
}

fn activate_split(
    harness: &mut MiningTestHarness,
    manager: &mut ManagerState,
    base_percent: u64,
    emission_percent: u64,
) {
    harness
        .execute(
            manager,
            ManagerInstruction::ActivateSplit {
                base_percent,
                emission_percent,
            },
        )
        .unwrap();
}

fn run_round(harness: &mut MiningTestHarness, manager: &mut ManagerState) {
    harness
        .execute(manager, ManagerInstruction::CalculateReturns)
        .unwrap();
    harness
        .execute(manager, ManagerInstruction::DistributeTokens)
        .unwrap();
}

#[test]
fn sixty_six_thirty_four_split() {
    // One base pool worth 1000 and one emission pool worth 200 in native
    // units: with the 66/34 split the liquidity difference is irrelevant,
    // each category owns its whole budget.
    let mut harness = MiningTestHarness::new();
    let mut manager = harness.new_manager();

    let base_pool = harness.base_pair(500 * TOKEN, 1_000 * TOKEN);
    let base_payee = harness.whitelist(&mut manager, base_pool, 1).unwrap();
    let emission_pool = harness.emission_pair(100 * TOKEN, 1_000 * TOKEN);
    let emission_payee = harness.whitelist(&mut manager, emission_pool, 1).unwrap();
    let pair = harness.reference_pair(1_000 * TOKEN, 1_000 * TOKEN);
    harness
        .execute(&mut manager, ManagerInstruction::SetReferencePair { pair })
        .unwrap();

    activate_split(&mut harness, &mut manager, 66, 34);
    vest(&mut harness, &mut manager, 1_000);
    run_round(&mut harness, &mut manager);

    assert_eq!(harness.balance(&base_payee), 660);
    assert_eq!(harness.balance(&emission_payee), 340);
    assert_eq!(manager.unallocated(), 0);
}

#[test]
fn split_budgets_divide_within_each_category() {
    let mut harness = MiningTestHarness::new();
    let mut manager = harness.new_manager();

    // Two equal base pools share the base budget; one emission pool takes
    // the whole emission budget.
    let base_a = harness.base_pair(100 * TOKEN, 500 * TOKEN);
    let base_b = harness.base_pair(100 * TOKEN, 500 * TOKEN);
    let payee_a = harness.whitelist(&mut manager, base_a, 1).unwrap();
    let payee_b = harness.whitelist(&mut manager, base_b, 1).unwrap();
    let emission_pool = harness.emission_pair(100 * TOKEN, 500 * TOKEN);
    let emission_payee = harness.whitelist(&mut manager, emission_pool, 1).unwrap();
    let pair = harness.reference_pair(1_000 * TOKEN, 1_000 * TOKEN);
    harness
        .execute(&mut manager, ManagerInstruction::SetReferencePair { pair })
        .unwrap();

    activate_split(&mut harness, &mut manager, 50, 50);
    vest(&mut harness, &mut manager, 1_000);
    run_round(&mut harness, &mut manager);

    assert_eq!(harness.balance(&payee_a), 250);
    assert_eq!(harness.balance(&payee_b), 250);
    assert_eq!(harness.balance(&emission_payee), 500);
}

#[test]
fn rounding_loss_is_confined_to_its_category() {
    let mut harness = MiningTestHarness::new();
    let mut manager = harness.new_manager();

    // Three equal base pools force floor rounding inside the base budget;
    // the emission side stays exact.
    let mut base_payees = Vec::new();
    for _ in 0..3 {
        let pool = harness.base_pair(100 * TOKEN, 500 * TOKEN);
        base_payees.push(harness.whitelist(&mut manager, pool, 1).unwrap());
    }
    let emission_pool = harness.emission_pair(100 * TOKEN, 500 * TOKEN);
    let emission_payee = harness.whitelist(&mut manager, emission_pool, 1).unwrap();
    let pair = harness.reference_pair(1_000 * TOKEN, 1_000 * TOKEN);
    harness
        .execute(&mut manager, ManagerInstruction::SetReferencePair { pair })
        .unwrap();

    activate_split(&mut harness, &mut manager, 50, 50);
    vest(&mut harness, &mut manager, 1_000);
    run_round(&mut harness, &mut manager);

    // Base budget 500 → 166 each, 2 lost to rounding. Emission budget 500
    // → paid in full.
    let base_paid: u64 = base_payees
        .iter()
        .map(|payee| harness.balance(payee))
        .sum();
    assert_eq!(base_paid, 498);
    for payee in &base_payees {
        assert_eq!(harness.balance(payee), 166);
    }
    assert_eq!(harness.balance(&emission_payee), 500);
    assert_eq!(manager.unallocated(), 2);
}

#[test]
fn split_weights_apply_within_category() {
    let mut harness = MiningTestHarness::new();
    let mut manager = harness.new_manager();

    let base_a = harness.base_pair(100 * TOKEN, 500 * TOKEN);
    let base_b = harness.base_pair(100 * TOKEN, 500 * TOKEN);
    let payee_a = harness.whitelist(&mut manager, base_a, 3).unwrap();
    let payee_b = harness.whitelist(&mut manager, base_b, 1).unwrap();
    let emission_pool = harness.emission_pair(100 * TOKEN, 500 * TOKEN);
    let emission_payee = harness.whitelist(&mut manager, emission_pool, 1).unwrap();
    let pair = harness.reference_pair(1_000 * TOKEN, 1_000 * TOKEN);
    harness
        .execute(&mut manager, ManagerInstruction::SetReferencePair { pair })
        .unwrap();

    activate_split(&mut harness, &mut manager, 80, 20);
    vest(&mut harness, &mut manager, 1_000);
    run_round(&mut harness, &mut manager);

    // Base budget 800 split 3:1; emission budget 200.
    assert_eq!(harness.balance(&payee_a), 600);
    assert_eq!(harness.balance(&payee_b), 200);
    assert_eq!(harness.balance(&emission_payee), 200);
}

#[test]
fn empty_emission_category_strands_its_budget_for_next_round() {
    // With a split active but no emission pools whitelisted, the emission
    // budget has a zero score sum: nothing is owed from it and it stays
    // unallocated. No reference pair is needed either.
    let mut harness = MiningTestHarness::new();
    let mut manager = harness.new_manager();
    let base_pool = harness.base_pair(100 * TOKEN, 500 * TOKEN);
    let base_payee = harness.whitelist(&mut manager, base_pool, 1).unwrap();

    activate_split(&mut harness, &mut manager, 66, 34);
    vest(&mut harness, &mut manager, 1_000);
    run_round(&mut harness, &mut manager);

    assert_eq!(harness.balance(&base_payee), 660);
    assert_eq!(manager.unallocated(), 340);
    assert!(!manager.distribution_in_progress());
}

#[test]
fn deactivated_split_returns_to_pooled_budgeting() {
    let mut harness = MiningTestHarness::new();
    let mut manager = harness.new_manager();

    let base_pool = harness.base_pair(100 * TOKEN, 500 * TOKEN);
    let base_payee = harness.whitelist(&mut manager, base_pool, 1).unwrap();
    let emission_pool = harness.emission_pair(100 * TOKEN, 500 * TOKEN);
    let emission_payee = harness.whitelist(&mut manager, emission_pool, 1).unwrap();
    let pair = harness.reference_pair(1_000 * TOKEN, 1_000 * TOKEN);
    harness
        .execute(&mut manager, ManagerInstruction::SetReferencePair { pair })
        .unwrap();

    activate_split(&mut harness, &mut manager, 80, 20);
    vest(&mut harness, &mut manager, 1_000);
    run_round(&mut harness, &mut manager);
    assert_eq!(harness.balance(&base_payee), 800);
    assert_eq!(harness.balance(&emission_payee), 200);

    harness
        .execute(&mut manager, ManagerInstruction::DeactivateSplit)
        .unwrap();
    vest(&mut harness, &mut manager, 1_000);
    run_round(&mut harness, &mut manager);

    // Equal liquidity, pooled sum: even split this time.
    assert_eq!(harness.balance(&base_payee), 800 + 500);
    assert_eq!(harness.balance(&emission_payee), 200 + 500);
}
