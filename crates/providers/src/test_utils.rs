//! Test utils for providers.

use crate::{CheatCodesProvider, L1ChainProvider, L1ProviderError};
use std::{collections::HashMap, sync::Arc, time::Duration};

use alloy_json_rpc::ErrorPayload;
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{SolInterface, SolValue};
use alloy_transport::RpcError;
use parking_lot::{Mutex, MutexGuard};
use rollup_l1::{
    IRollup::IRollupCalls, IStakingAssetHandler::IStakingAssetHandlerCalls, RevertReason,
    ANVIL_CHAIN_ID,
};
use rollup_node_primitives::EpochClock;

/// The address of the mocked rollup contract.
pub const MOCK_ROLLUP_ADDRESS: Address = Address::repeat_byte(0xaa);

/// The address of the mocked staking asset handler.
pub const MOCK_HANDLER_ADDRESS: Address = Address::repeat_byte(0xbb);

/// The state of the [`MockL1`] chain.
#[derive(Debug, Clone)]
pub struct MockL1State {
    /// The chain id.
    pub chain_id: u64,
    /// The timestamp of the latest block.
    pub block_timestamp: u64,
    /// The timestamp of the next mined block, if set.
    pub next_block_timestamp: Option<u64>,
    /// Account balances.
    pub balances: HashMap<Address, U256>,
    /// The registered attesters, in registration order.
    pub attesters: Vec<Address>,
    /// The proposer registered for each attester.
    pub proposers: HashMap<Address, Address>,
    /// The withdrawals initiated, as `(attester, recipient)`.
    pub withdrawals: Vec<(Address, Address)>,
    /// The latest pending block.
    pub pending_block_number: u64,
    /// The latest proven block.
    pub proven_block_number: u64,
    /// The archive root.
    pub archive: B256,
    /// The rollup genesis time.
    pub genesis_time: u64,
    /// The rollup slot duration.
    pub slot_duration: u64,
    /// The number of slots in an epoch.
    pub epoch_duration: u64,
    /// The submitted transactions and whether they succeeded.
    pub receipts: HashMap<B256, bool>,
    /// When set, confirmations never arrive.
    pub stall_confirmations: bool,
    /// When set, transactions are mined without simulation and a failing call reverts on chain.
    pub skip_simulation: bool,
    /// A block another actor mines at this timestamp right before the next warp.
    pub competing_warp: Option<u64>,
    /// An error message returned by the next warp.
    pub warp_error: Option<String>,
    /// The number of requests served.
    pub requests: usize,
}

impl Default for MockL1State {
    fn default() -> Self {
        let genesis_time = 1_700_000_000;
        Self {
            chain_id: ANVIL_CHAIN_ID,
            block_timestamp: genesis_time + 1_000,
            next_block_timestamp: None,
            balances: HashMap::new(),
            attesters: Vec::new(),
            proposers: HashMap::new(),
            withdrawals: Vec::new(),
            pending_block_number: 0,
            proven_block_number: 0,
            archive: B256::ZERO,
            genesis_time,
            slot_duration: 24,
            epoch_duration: 16,
            receipts: HashMap::new(),
            stall_confirmations: false,
            skip_simulation: false,
            competing_warp: None,
            warp_error: None,
            requests: 0,
        }
    }
}

impl MockL1State {
    fn clock(&self) -> EpochClock {
        EpochClock::new(self.genesis_time, self.slot_duration, self.epoch_duration)
            .expect("valid mock clock")
    }

    fn proposer_at(&self, timestamp: u64) -> Address {
        let Ok(slot) = self.clock().slot_at(timestamp) else { return Address::ZERO };
        if self.attesters.is_empty() {
            return Address::ZERO
        }
        self.attesters[(slot % self.attesters.len() as u64) as usize]
    }

    fn next_tx_hash(&self) -> B256 {
        keccak256((self.receipts.len() as u64).to_be_bytes())
    }
}

/// An in-memory L1 chain hosting a rollup contract and a staking asset handler.
///
/// Calls are decoded by selector and applied to the shared [`MockL1State`].
#[derive(Debug, Clone, Default)]
pub struct MockL1 {
    state: Arc<Mutex<MockL1State>>,
}

impl MockL1 {
    /// Returns a new mock chain with the provided chain id.
    pub fn with_chain_id(chain_id: u64) -> Self {
        let l1 = Self::default();
        l1.state_mut().chain_id = chain_id;
        l1
    }

    /// Returns the address of the rollup contract.
    pub const fn rollup_address(&self) -> Address {
        MOCK_ROLLUP_ADDRESS
    }

    /// Returns the address of the staking asset handler.
    pub const fn handler_address(&self) -> Address {
        MOCK_HANDLER_ADDRESS
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> MockL1State {
        self.state.lock().clone()
    }

    /// Returns a guard to mutate the state.
    pub fn state_mut(&self) -> MutexGuard<'_, MockL1State> {
        self.state.lock()
    }

    fn rollup_call(state: &MockL1State, call: IRollupCalls) -> Result<Bytes, L1ProviderError> {
        let clock = state.clock();
        let slot = clock.slot_at(state.block_timestamp)?;
        let output = match call {
            IRollupCalls::getPendingBlockNumber(_) => {
                U256::from(state.pending_block_number).abi_encode()
            }
            IRollupCalls::getProvenBlockNumber(_) => {
                U256::from(state.proven_block_number).abi_encode()
            }
            IRollupCalls::getAttesters(_) | IRollupCalls::getCurrentEpochCommittee(_) => {
                state.attesters.abi_encode()
            }
            IRollupCalls::archive(_) => state.archive.abi_encode(),
            IRollupCalls::getCurrentEpoch(_) => U256::from(clock.epoch_for_slot(slot)).abi_encode(),
            IRollupCalls::getCurrentSlot(_) => U256::from(slot).abi_encode(),
            IRollupCalls::getCurrentProposer(_) => {
                state.proposer_at(state.block_timestamp).abi_encode()
            }
            IRollupCalls::getProposerAt(call) => {
                state.proposer_at(call.ts.saturating_to()).abi_encode()
            }
            IRollupCalls::getEpochDuration(_) => U256::from(state.epoch_duration).abi_encode(),
            IRollupCalls::getSlotDuration(_) => U256::from(state.slot_duration).abi_encode(),
            IRollupCalls::getGenesisTime(_) => U256::from(state.genesis_time).abi_encode(),
            IRollupCalls::getTimestampForSlot(call) => {
                U256::from(clock.timestamp_for_slot(call.slotNumber.saturating_to())?).abi_encode()
            }
            IRollupCalls::prune(_) => {
                if state.pending_block_number == state.proven_block_number {
                    return Err(L1ProviderError::Revert {
                        tx_hash: None,
                        reason: Some(RevertReason::NothingToPrune),
                    })
                }
                Vec::new()
            }
            IRollupCalls::initiateWithdraw(_) => {
                return Err(L1ProviderError::Other("mutating call through eth_call"))
            }
        };
        Ok(output.into())
    }

    fn execute(state: &mut MockL1State, to: Address, input: &[u8]) -> Result<(), L1ProviderError> {
        let unknown = || L1ProviderError::Revert {
            tx_hash: None,
            reason: Some(RevertReason::Unknown(Bytes::copy_from_slice(input))),
        };
        if to == MOCK_HANDLER_ADDRESS {
            let Ok(IStakingAssetHandlerCalls::addValidator(call)) =
                IStakingAssetHandlerCalls::abi_decode(input)
            else {
                return Err(unknown())
            };
            state.attesters.push(call.attester);
            state.proposers.insert(call.attester, call.proposer);
            return Ok(())
        }
        if to != MOCK_ROLLUP_ADDRESS {
            return Err(unknown())
        }
        match IRollupCalls::abi_decode(input) {
            Ok(IRollupCalls::initiateWithdraw(call)) => {
                state.attesters.retain(|attester| *attester != call.attester);
                state.withdrawals.push((call.attester, call.recipient));
                Ok(())
            }
            Ok(IRollupCalls::prune(_)) => {
                if state.pending_block_number == state.proven_block_number {
                    return Err(L1ProviderError::Revert {
                        tx_hash: None,
                        reason: Some(RevertReason::NothingToPrune),
                    })
                }
                state.pending_block_number = state.proven_block_number;
                Ok(())
            }
            _ => Err(unknown()),
        }
    }
}

#[async_trait::async_trait]
impl L1ChainProvider for MockL1 {
    async fn l1_chain_id(&self) -> Result<u64, L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        Ok(state.chain_id)
    }

    async fn call_contract(&self, to: Address, input: Bytes) -> Result<Bytes, L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        if to == MOCK_ROLLUP_ADDRESS {
            return Self::rollup_call(&state, IRollupCalls::abi_decode(&input)?)
        }
        if to == MOCK_HANDLER_ADDRESS {
            return match IStakingAssetHandlerCalls::abi_decode(&input)? {
                IStakingAssetHandlerCalls::getRollup(_) => {
                    Ok(MOCK_ROLLUP_ADDRESS.abi_encode().into())
                }
                IStakingAssetHandlerCalls::addValidator(_) => {
                    Err(L1ProviderError::Other("mutating call through eth_call"))
                }
            }
        }
        Ok(Bytes::new())
    }

    async fn submit_call(&self, to: Address, input: Bytes) -> Result<B256, L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        let succeeded = match Self::execute(&mut state, to, &input) {
            Ok(()) => true,
            Err(err) if !state.skip_simulation => return Err(err),
            Err(_) => false,
        };
        let tx_hash = state.next_tx_hash();
        state.receipts.insert(tx_hash, succeeded);
        Ok(tx_hash)
    }

    async fn await_confirmation(
        &self,
        tx_hash: B256,
        _timeout: Duration,
    ) -> Result<(), L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        if state.stall_confirmations {
            return Err(L1ProviderError::ConfirmationTimeout { tx_hash })
        }
        match state.receipts.get(&tx_hash) {
            Some(true) => Ok(()),
            Some(false) => Err(L1ProviderError::Revert { tx_hash: Some(tx_hash), reason: None }),
            None => Err(L1ProviderError::Other("unknown transaction")),
        }
    }

    async fn balance_of(&self, address: Address) -> Result<U256, L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        Ok(state.balances.get(&address).copied().unwrap_or_default())
    }

    async fn latest_block_timestamp(&self) -> Result<u64, L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        Ok(state.block_timestamp)
    }
}

#[async_trait::async_trait]
impl CheatCodesProvider for MockL1 {
    async fn set_balance(&self, address: Address, balance: U256) -> Result<(), L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        state.balances.insert(address, balance);
        Ok(())
    }

    async fn set_next_block_timestamp(&self, timestamp: u64) -> Result<(), L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        if let Some(message) = state.warp_error.take() {
            return Err(RpcError::ErrorResp(ErrorPayload {
                code: -32603,
                message: message.into(),
                data: None,
            })
            .into())
        }
        if let Some(competing) = state.competing_warp.take() {
            state.block_timestamp = competing;
        }
        if timestamp <= state.block_timestamp {
            let message = format!(
                "Timestamp error: {timestamp} is lower than or equal to previous block's timestamp"
            );
            return Err(RpcError::ErrorResp(ErrorPayload {
                code: -32602,
                message: message.into(),
                data: None,
            })
            .into())
        }
        state.next_block_timestamp = Some(timestamp);
        Ok(())
    }

    async fn mine(&self) -> Result<(), L1ProviderError> {
        let mut state = self.state.lock();
        state.requests += 1;
        let next = state.next_block_timestamp.take().unwrap_or(state.block_timestamp + 12);
        state.block_timestamp = next;
        Ok(())
    }
}
