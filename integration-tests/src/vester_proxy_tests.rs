//! Integration tests for the diversion proxy: init wiring, the diversion
//! step schedule, and remainder forwarding.

use {
    crate::harness::{MiningTestHarness, TOKEN},
    lmv1_core::traits::EmissionSource,
    lmv1_treasury_vester_program::{
        constants::{BASE_DIVERSION, INITIAL_VESTING_AMOUNT, VESTING_CLIFF},
        error::VesterError,
        instruction::ProxyInstruction,
        processor::{
            current_diversion, process_claim_and_distribute, process_init_proxy,
            process_proxy_instruction, process_set_recipient, process_start_vesting,
        },
        state::{DiversionProxy, ProxyState},
    },
    solana_pubkey::Pubkey,
    solana_signer::Signer,
};

struct ProxySetup {
    proxy: DiversionProxy,
    treasury: Pubkey,
    beneficiary: Pubkey,
}

fn wired_proxy(harness: &mut MiningTestHarness) -> ProxySetup {
    let authority = harness.authority.pubkey();
    let proxy_account = Pubkey::new_unique();
    let treasury = Pubkey::new_unique();
    let beneficiary = Pubkey::new_unique();

    let mut vester = harness.new_vester();
    process_set_recipient(&mut vester, &authority, proxy_account).unwrap();
    harness.fund_vester(&vester);
    process_start_vesting(&mut vester, &authority, &harness.ledger).unwrap();

    let mut proxy = DiversionProxy::new(
        vester,
        ProxyState::new(proxy_account, treasury, beneficiary),
    );
    process_init_proxy(&mut proxy, &authority).unwrap();
    ProxySetup {
        proxy,
        treasury,
        beneficiary,
    }
}

fn claim(harness: &mut MiningTestHarness, proxy: &mut DiversionProxy) -> (u64, u64) {
    let clock = harness.clock();
    process_claim_and_distribute(proxy, &mut harness.ledger, &clock).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
//  1. Init
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn init_requires_proxy_to_be_vester_recipient() {
    let harness = MiningTestHarness::new();
    let vester = harness.new_vester();
    let mut proxy = DiversionProxy::new(
        vester,
        ProxyState::new(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()),
    );

    assert_eq!(
        process_init_proxy(&mut proxy, &harness.authority.pubkey()),
        Err(VesterError::InvalidVesterRecipient)
    );
    assert!(!proxy.state.initialized);
}

#[test]
fn init_twice_rejected() {
    let mut harness = MiningTestHarness::new();
    let ProxySetup { mut proxy, .. } = wired_proxy(&mut harness);
    assert_eq!(
        process_init_proxy(&mut proxy, &harness.authority.pubkey()),
        Err(VesterError::ProxyAlreadyInitialized)
    );
}

#[test]
fn claim_requires_init() {
    let mut harness = MiningTestHarness::new();
    let authority = harness.authority.pubkey();
    let proxy_account = Pubkey::new_unique();
    let mut vester = harness.new_vester();
    process_set_recipient(&mut vester, &authority, proxy_account).unwrap();
    harness.fund_vester(&vester);
    process_start_vesting(&mut vester, &authority, &harness.ledger).unwrap();
    let mut proxy = DiversionProxy::new(
        vester,
        ProxyState::new(proxy_account, Pubkey::new_unique(), Pubkey::new_unique()),
    );

    let clock = harness.clock();
    assert_eq!(
        process_claim_and_distribute(&mut proxy, &mut harness.ledger, &clock),
        Err(VesterError::ProxyNotInitialized)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  2. Diversion schedule
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn diversion_step_function() {
    // claim_count → diversion: 1× base for the first 30 claims, then one
    // more base unit every 30 claims.
    assert_eq!(current_diversion(0), Ok(BASE_DIVERSION));
    assert_eq!(current_diversion(29), Ok(BASE_DIVERSION));
    assert_eq!(current_diversion(30), Ok(2 * BASE_DIVERSION));
    assert_eq!(current_diversion(59), Ok(2 * BASE_DIVERSION));
    assert_eq!(current_diversion(60), Ok(3 * BASE_DIVERSION));
    assert_eq!(current_diversion(300), Ok(11 * BASE_DIVERSION));
}

#[test]
fn first_claim_diverts_base_amount() {
    let mut harness = MiningTestHarness::new();
    let ProxySetup {
        mut proxy,
        treasury,
        beneficiary,
    } = wired_proxy(&mut harness);

    let (diverted, forwarded) = claim(&mut harness, &mut proxy);
    assert_eq!(diverted, BASE_DIVERSION);
    assert_eq!(forwarded, INITIAL_VESTING_AMOUNT - BASE_DIVERSION);
    assert_eq!(harness.balance(&treasury), BASE_DIVERSION);
    assert_eq!(
        harness.balance(&beneficiary),
        INITIAL_VESTING_AMOUNT - BASE_DIVERSION
    );
    // Nothing sticks to the proxy account.
    assert_eq!(harness.balance(&proxy.state.proxy_account), 0);
    assert_eq!(proxy.state.claim_count, 1);
}

#[test]
fn thirty_first_claim_raises_diversion() {
    let mut harness = MiningTestHarness::new();
    let ProxySetup {
        mut proxy,
        treasury,
        beneficiary,
    } = wired_proxy(&mut harness);

    for _ in 0..30 {
        claim(&mut harness, &mut proxy);
        harness.advance_seconds(VESTING_CLIFF);
    }
    let treasury_before = harness.balance(&treasury);
    let beneficiary_before = harness.balance(&beneficiary);

    let (diverted, forwarded) = claim(&mut harness, &mut proxy);
    assert_eq!(diverted, 2 * BASE_DIVERSION);
    assert_eq!(forwarded, INITIAL_VESTING_AMOUNT - 2 * BASE_DIVERSION);
    assert_eq!(
        harness.balance(&treasury),
        treasury_before + 2 * BASE_DIVERSION
    );
    assert_eq!(
        harness.balance(&beneficiary),
        beneficiary_before + INITIAL_VESTING_AMOUNT - 2 * BASE_DIVERSION
    );
}

#[test]
fn sixty_first_claim_raises_diversion_again() {
    let mut harness = MiningTestHarness::new();
    let ProxySetup {
        mut proxy,
        treasury,
        ..
    } = wired_proxy(&mut harness);

    for _ in 0..60 {
        claim(&mut harness, &mut proxy);
        harness.advance_seconds(VESTING_CLIFF);
    }
    let treasury_before = harness.balance(&treasury);

    let (diverted, _) = claim(&mut harness, &mut proxy);
    assert_eq!(diverted, 3 * BASE_DIVERSION);
    assert_eq!(harness.balance(&treasury), treasury_before + 3 * BASE_DIVERSION);
}

#[test]
fn three_hundred_first_claim_follows_step_schedule() {
    let mut harness = MiningTestHarness::new();
    let ProxySetup {
        mut proxy,
        treasury,
        ..
    } = wired_proxy(&mut harness);

    for _ in 0..300 {
        claim(&mut harness, &mut proxy);
        harness.advance_seconds(VESTING_CLIFF);
    }
    let treasury_before = harness.balance(&treasury);

    let (diverted, _) = claim(&mut harness, &mut proxy);
    assert_eq!(diverted, 11 * BASE_DIVERSION);
    assert_eq!(
        harness.balance(&treasury),
        treasury_before + 11 * BASE_DIVERSION
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  3. Gating & edge cases
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn cannot_claim_twice_within_cliff() {
    let mut harness = MiningTestHarness::new();
    let ProxySetup { mut proxy, .. } = wired_proxy(&mut harness);

    claim(&mut harness, &mut proxy);
    harness.advance_seconds(VESTING_CLIFF - 2);
    let clock = harness.clock();
    assert_eq!(
        process_claim_and_distribute(&mut proxy, &mut harness.ledger, &clock),
        Err(VesterError::CliffNotReached)
    );
    assert_eq!(proxy.state.claim_count, 1);
}

#[test]
fn anyone_may_drive_the_proxy() {
    // The trait caller is irrelevant; the wrapped vester sees the proxy
    // account as the claimant either way.
    let mut harness = MiningTestHarness::new();
    let ProxySetup {
        mut proxy,
        beneficiary,
        ..
    } = wired_proxy(&mut harness);

    let stranger = Pubkey::new_unique();
    let clock = harness.clock();
    let forwarded = proxy
        .claim(&stranger, &mut harness.ledger, &clock)
        .unwrap();
    assert_eq!(forwarded, INITIAL_VESTING_AMOUNT - BASE_DIVERSION);
    assert_eq!(harness.balance(&beneficiary), forwarded);
}

#[test]
fn claim_via_instruction_dispatch() {
    let mut harness = MiningTestHarness::new();
    let ProxySetup {
        mut proxy,
        treasury,
        beneficiary,
    } = wired_proxy(&mut harness);

    let stranger = Pubkey::new_unique();
    let clock = harness.clock();
    process_proxy_instruction(
        &mut proxy,
        &stranger,
        &mut harness.ledger,
        &clock,
        ProxyInstruction::ClaimAndDistribute,
    )
    .unwrap();
    assert_eq!(harness.balance(&treasury), BASE_DIVERSION);
    assert_eq!(
        harness.balance(&beneficiary),
        INITIAL_VESTING_AMOUNT - BASE_DIVERSION
    );
}

#[test]
fn diversion_clamped_to_released_amount() {
    // A release smaller than the scheduled diversion goes entirely to the
    // treasury; the beneficiary gets nothing rather than the books going
    // negative.
    let mut harness = MiningTestHarness::new();
    let authority = harness.authority.pubkey();
    let proxy_account = Pubkey::new_unique();
    let treasury = Pubkey::new_unique();
    let beneficiary = Pubkey::new_unique();

    let mut vester = harness.new_vester();
    process_set_recipient(&mut vester, &authority, proxy_account).unwrap();
    vester.vesting_amount = BASE_DIVERSION / 2;
    vester.starting_balance = 10_000 * TOKEN;
    let account = vester.vester_account;
    harness.fund(&account, 10_000 * TOKEN);
    process_start_vesting(&mut vester, &authority, &harness.ledger).unwrap();

    let mut proxy = DiversionProxy::new(
        vester,
        ProxyState::new(proxy_account, treasury, beneficiary),
    );
    process_init_proxy(&mut proxy, &authority).unwrap();

    let (diverted, forwarded) = claim(&mut harness, &mut proxy);
    assert_eq!(diverted, BASE_DIVERSION / 2);
    assert_eq!(forwarded, 0);
    assert_eq!(harness.balance(&treasury), BASE_DIVERSION / 2);
    assert_eq!(harness.balance(&beneficiary), 0);
}
