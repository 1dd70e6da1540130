//! Validator lifecycle tests against an in-memory L1.

use alloy_primitives::{address, bytes, Address, Bytes, U256};
use rollup_l1::{ForwarderDeployment, TEST_NETWORK_PROPOSER_BALANCE};
use rollup_node_manager::{
    FastForwardOutcome, ManagerConfig, ManagerError, PruneOutcome, ValidatorSetManager,
};
use rollup_node_providers::{test_utils::MockL1, L1ProviderError};

const FORWARDER_CODE: Bytes = bytes!("6080604052348015600e575f5ffd5b50603e80601a5f395ff3fe");
const ATTESTER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
const PROPOSER: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

fn manager(l1: &MockL1) -> ValidatorSetManager<MockL1> {
    let config = ManagerConfig::default().with_forwarder(ForwarderDeployment::new(FORWARDER_CODE));
    ValidatorSetManager::new(l1.clone(), config)
}

#[tokio::test]
async fn test_admit_validator_on_test_network() {
    let l1 = MockL1::default();
    let manager = manager(&l1);

    let admission = manager.admit(ATTESTER, PROPOSER, l1.handler_address()).await.unwrap();

    let expected_forwarder = ForwarderDeployment::new(FORWARDER_CODE).address_for(PROPOSER);
    let state = l1.state();
    assert_eq!(admission.rollup, l1.rollup_address());
    assert_eq!(admission.forwarder, expected_forwarder);
    assert_eq!(state.attesters, vec![ATTESTER]);
    assert_eq!(state.proposers.get(&ATTESTER), Some(&expected_forwarder));
    assert_eq!(state.balances.get(&PROPOSER), Some(&TEST_NETWORK_PROPOSER_BALANCE));
    assert_eq!(state.receipts.get(&admission.tx_hash), Some(&true));
    assert_eq!(admission.proposer_balance, None);
}

#[tokio::test]
async fn test_admission_is_deterministic() {
    let first = MockL1::default();
    let second = MockL1::default();

    let a = manager(&first).admit(ATTESTER, PROPOSER, first.handler_address()).await.unwrap();
    let b = manager(&second).admit(ATTESTER, PROPOSER, second.handler_address()).await.unwrap();

    assert_eq!(a.forwarder, b.forwarder);
}

#[tokio::test]
async fn test_admit_on_live_network_does_not_fund() {
    let l1 = MockL1::with_chain_id(1);
    let manager = manager(&l1);
    l1.state_mut().balances.insert(PROPOSER, U256::from(5));

    let admission = manager.admit(ATTESTER, PROPOSER, l1.handler_address()).await.unwrap();

    let state = l1.state();
    assert_eq!(state.attesters, vec![ATTESTER]);
    assert_eq!(state.balances.get(&PROPOSER), Some(&U256::from(5)));
    assert_eq!(admission.proposer_balance, Some(U256::from(5)));
}

#[tokio::test]
async fn test_admit_on_live_network_reports_empty_balance() {
    let l1 = MockL1::with_chain_id(1);
    let manager = manager(&l1);

    let admission = manager.admit(ATTESTER, PROPOSER, l1.handler_address()).await.unwrap();

    assert_eq!(admission.proposer_balance, Some(U256::ZERO));
    assert!(!l1.state().balances.contains_key(&PROPOSER));
}

#[tokio::test]
async fn test_admit_without_forwarder_code() {
    let l1 = MockL1::default();
    let manager = ValidatorSetManager::new(l1.clone(), ManagerConfig::default());

    let err = manager.admit(ATTESTER, PROPOSER, l1.handler_address()).await.unwrap_err();

    assert!(matches!(err, ManagerError::MissingForwarderCode));
    assert_eq!(l1.state().requests, 0);
}

#[tokio::test]
async fn test_initiate_withdraw() {
    let l1 = MockL1::default();
    let manager = manager(&l1);
    manager.admit(ATTESTER, PROPOSER, l1.handler_address()).await.unwrap();

    manager.initiate_withdraw(ATTESTER, l1.rollup_address()).await.unwrap();

    let state = l1.state();
    assert!(state.attesters.is_empty());
    assert_eq!(state.withdrawals, vec![(ATTESTER, ATTESTER)]);
}

#[tokio::test]
async fn test_prune() {
    let l1 = MockL1::default();
    let manager = manager(&l1);

    let outcome = manager.prune(l1.rollup_address()).await.unwrap();
    assert_eq!(outcome, PruneOutcome::NoOp);

    {
        let mut state = l1.state_mut();
        state.pending_block_number = 10;
        state.proven_block_number = 7;
    }
    let outcome = manager.prune(l1.rollup_address()).await.unwrap();
    assert!(matches!(outcome, PruneOutcome::Pruned { .. }));
    assert_eq!(l1.state().pending_block_number, 7);
}

#[tokio::test]
async fn test_prune_reverted_after_inclusion_is_noop() {
    let l1 = MockL1::default();
    l1.state_mut().skip_simulation = true;
    let manager = manager(&l1);

    let outcome = manager.prune(l1.rollup_address()).await.unwrap();

    assert_eq!(outcome, PruneOutcome::NoOp);
    assert_eq!(l1.state().receipts.values().collect::<Vec<_>>(), vec![&false]);
}

#[tokio::test]
async fn test_reverted_withdrawal_carries_tx_hash() {
    let l1 = MockL1::default();
    l1.state_mut().skip_simulation = true;
    let manager = manager(&l1);

    let err = manager.initiate_withdraw(ATTESTER, Address::repeat_byte(0xcc)).await.unwrap_err();

    let Some(L1ProviderError::Revert { tx_hash: Some(tx_hash), reason: None }) =
        err.as_provider_error()
    else {
        panic!("expected a mined revert, got {err:?}")
    };
    assert_eq!(l1.state().receipts.get(tx_hash), Some(&false));
}

#[tokio::test]
async fn test_confirmation_timeout_carries_tx_hash() {
    let l1 = MockL1::default();
    l1.state_mut().stall_confirmations = true;
    let manager = manager(&l1);

    let err = manager.initiate_withdraw(ATTESTER, l1.rollup_address()).await.unwrap_err();

    let Some(L1ProviderError::ConfirmationTimeout { tx_hash }) = err.as_provider_error() else {
        panic!("expected a confirmation timeout, got {err:?}")
    };
    assert!(l1.state().receipts.contains_key(tx_hash));
}

#[tokio::test]
async fn test_fast_forward_epochs() {
    let l1 = MockL1::default();
    let manager = manager(&l1);
    let rollup = manager.rollup(l1.rollup_address());

    let epoch_before = rollup.current_epoch().await.unwrap();
    let slot_before = rollup.current_slot().await.unwrap();
    let clock = rollup.epoch_clock().await.unwrap();

    let outcome = manager.fast_forward(2, l1.rollup_address()).await.unwrap();

    let target_slot = slot_before + 2 * clock.epoch_duration();
    let target_timestamp = clock.timestamp_for_slot(target_slot).unwrap();
    assert_eq!(outcome, FastForwardOutcome::Advanced { target_timestamp });
    assert_eq!(l1.state().block_timestamp, target_timestamp);
    assert_eq!(rollup.current_slot().await.unwrap(), target_slot);
    assert!(rollup.current_epoch().await.unwrap() >= epoch_before + 2);
}

#[tokio::test]
async fn test_fast_forward_already_advanced() {
    let l1 = MockL1::default();
    let manager = manager(&l1);
    manager.fast_forward(1, l1.rollup_address()).await.unwrap();

    // the head sits exactly at the start of the current slot.
    let outcome = manager.fast_forward(0, l1.rollup_address()).await.unwrap();

    assert!(matches!(outcome, FastForwardOutcome::AlreadyAdvanced { .. }));
}

#[tokio::test]
async fn test_fast_forward_overtaken_during_warp() {
    let l1 = MockL1::default();
    let manager = manager(&l1);
    let rollup = manager.rollup(l1.rollup_address());
    let clock = rollup.epoch_clock().await.unwrap();
    let target_slot = rollup.current_slot().await.unwrap() + clock.epoch_duration();
    let target_timestamp = clock.timestamp_for_slot(target_slot).unwrap();
    l1.state_mut().competing_warp = Some(target_timestamp + 5);

    let outcome = manager.fast_forward(1, l1.rollup_address()).await.unwrap();

    assert_eq!(
        outcome,
        FastForwardOutcome::AlreadyAdvanced { target_timestamp, head_timestamp: target_timestamp + 5 }
    );
    assert_eq!(l1.state().block_timestamp, target_timestamp + 5);
}

#[tokio::test]
async fn test_fast_forward_propagates_warp_failure() {
    let l1 = MockL1::default();
    l1.state_mut().warp_error = Some("method not found".to_string());
    let manager = manager(&l1);
    let head_before = l1.state().block_timestamp;

    let err = manager.fast_forward(1, l1.rollup_address()).await.unwrap_err();

    assert!(matches!(err, ManagerError::L1Provider(L1ProviderError::Rpc(_))));
    assert_eq!(l1.state().block_timestamp, head_before);
}

#[tokio::test]
async fn test_fast_forward_requires_test_network() {
    let l1 = MockL1::with_chain_id(1);
    let manager = manager(&l1);

    let err = manager.fast_forward(1, l1.rollup_address()).await.unwrap_err();
    assert!(matches!(err, ManagerError::NotTestNetwork { chain_id: 1 }));
    assert_eq!(l1.state().block_timestamp, MockL1::default().state().block_timestamp);
}

#[tokio::test]
async fn test_admit_sets_test_network_balance() {
    let l1 = MockL1::default();
    let manager = manager(&l1);
    l1.state_mut().balances.insert(PROPOSER, U256::from(1));

    manager.admit(ATTESTER, PROPOSER, l1.handler_address()).await.unwrap();

    assert_eq!(l1.state().balances.get(&PROPOSER), Some(&TEST_NETWORK_PROPOSER_BALANCE));
}
