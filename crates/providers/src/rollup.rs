use crate::{call_sol, L1ChainProvider, L1ProviderError};
use std::fmt;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use rollup_l1::IRollup;
use rollup_node_primitives::EpochClock;

/// Read access to the rollup contract: the chain tips, the validator set and who may propose
/// when.
///
/// Every query goes to the chain, nothing is cached.
#[derive(Debug, Clone)]
pub struct RollupContract<P> {
    /// The address of the rollup contract.
    address: Address,
    /// The L1 provider.
    provider: P,
}

impl<P: L1ChainProvider> RollupContract<P> {
    /// Returns a new instance of [`RollupContract`].
    pub const fn new(address: Address, provider: P) -> Self {
        Self { address, provider }
    }

    /// Returns the address of the rollup contract.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns a reference to the L1 provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Calls the rollup contract and decodes the return value.
    pub async fn call<C: SolCall>(&self, call: C) -> Result<C::Return, L1ProviderError> {
        call_sol(&self.provider, self.address, call).await
    }

    /// Returns the number of the latest pending L2 block.
    pub async fn pending_block_number(&self) -> Result<u64, L1ProviderError> {
        Ok(self.call(IRollup::getPendingBlockNumberCall {}).await?.saturating_to())
    }

    /// Returns the number of the latest proven L2 block.
    pub async fn proven_block_number(&self) -> Result<u64, L1ProviderError> {
        Ok(self.call(IRollup::getProvenBlockNumberCall {}).await?.saturating_to())
    }

    /// Returns all registered attesters.
    pub async fn attesters(&self) -> Result<Vec<Address>, L1ProviderError> {
        self.call(IRollup::getAttestersCall {}).await
    }

    /// Returns the committee of the current epoch.
    pub async fn current_epoch_committee(&self) -> Result<Vec<Address>, L1ProviderError> {
        self.call(IRollup::getCurrentEpochCommitteeCall {}).await
    }

    /// Returns the archive root of the latest pending block.
    pub async fn archive(&self) -> Result<B256, L1ProviderError> {
        self.call(IRollup::archiveCall {}).await
    }

    /// Returns the current epoch.
    pub async fn current_epoch(&self) -> Result<u64, L1ProviderError> {
        Ok(self.call(IRollup::getCurrentEpochCall {}).await?.saturating_to())
    }

    /// Returns the current slot.
    pub async fn current_slot(&self) -> Result<u64, L1ProviderError> {
        Ok(self.call(IRollup::getCurrentSlotCall {}).await?.saturating_to())
    }

    /// Returns the proposer of the current slot.
    pub async fn current_proposer(&self) -> Result<Address, L1ProviderError> {
        self.call(IRollup::getCurrentProposerCall {}).await
    }

    /// Returns the proposer of the slot containing the timestamp.
    pub async fn proposer_at(&self, timestamp: u64) -> Result<Address, L1ProviderError> {
        self.call(IRollup::getProposerAtCall { ts: U256::from(timestamp) }).await
    }

    /// Returns the proposer for the next L1 block, assumed to be `l1_slot_duration` seconds after
    /// the latest one.
    pub async fn next_proposer(&self, l1_slot_duration: u64) -> Result<Address, L1ProviderError> {
        let latest = self.provider.latest_block_timestamp().await?;
        self.proposer_at(latest.saturating_add(l1_slot_duration)).await
    }

    /// Returns the timestamp at which the slot starts.
    pub async fn timestamp_for_slot(&self, slot: u64) -> Result<u64, L1ProviderError> {
        let call = IRollup::getTimestampForSlotCall { slotNumber: U256::from(slot) };
        Ok(self.call(call).await?.saturating_to())
    }

    /// Returns the clock of the rollup, built from its genesis time, slot duration and epoch
    /// duration.
    pub async fn epoch_clock(&self) -> Result<EpochClock, L1ProviderError> {
        let genesis = self.call(IRollup::getGenesisTimeCall {}).await?;
        let slot_duration = self.call(IRollup::getSlotDurationCall {}).await?;
        let epoch_duration = self.call(IRollup::getEpochDurationCall {}).await?;
        Ok(EpochClock::new(
            genesis.saturating_to(),
            slot_duration.saturating_to(),
            epoch_duration.saturating_to(),
        )?)
    }

    /// Returns a snapshot of the rollup state for inspection.
    pub async fn debug_state(
        &self,
        l1_slot_duration: u64,
    ) -> Result<RollupDebugState, L1ProviderError> {
        Ok(RollupDebugState {
            pending_block_number: self.pending_block_number().await?,
            proven_block_number: self.proven_block_number().await?,
            attesters: self.attesters().await?,
            committee: self.current_epoch_committee().await?,
            archive: self.archive().await?,
            epoch: self.current_epoch().await?,
            slot: self.current_slot().await?,
            current_proposer: self.current_proposer().await?,
            next_proposer: self.next_proposer(l1_slot_duration).await?,
        })
    }
}

/// A snapshot of the rollup state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupDebugState {
    /// The number of the latest pending block.
    pub pending_block_number: u64,
    /// The number of the latest proven block.
    pub proven_block_number: u64,
    /// The registered attesters.
    pub attesters: Vec<Address>,
    /// The committee of the current epoch.
    pub committee: Vec<Address>,
    /// The archive root of the latest pending block.
    pub archive: B256,
    /// The current epoch.
    pub epoch: u64,
    /// The current slot.
    pub slot: u64,
    /// The proposer during the latest L1 block.
    pub current_proposer: Address,
    /// The proposer for the next L1 block.
    pub next_proposer: Address,
}

impl fmt::Display for RollupDebugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pending block num: {}", self.pending_block_number)?;
        writeln!(f, "Proven block num: {}", self.proven_block_number)?;
        writeln!(f, "Validators: {}", join_addresses(&self.attesters))?;
        writeln!(f, "Committee: {}", join_addresses(&self.committee))?;
        writeln!(f, "Archive: {}", self.archive)?;
        writeln!(f, "Epoch: {}", self.epoch)?;
        writeln!(f, "Slot: {}", self.slot)?;
        writeln!(f, "Proposer: {}", self.current_proposer)?;
        write!(f, "Next proposer: {}", self.next_proposer)
    }
}

fn join_addresses(addresses: &[Address]) -> String {
    addresses.iter().map(Address::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockL1;

    #[tokio::test]
    async fn test_epoch_clock_from_chain() {
        let l1 = MockL1::default();
        let rollup = RollupContract::new(l1.rollup_address(), l1.clone());

        let clock = rollup.epoch_clock().await.unwrap();
        let state = l1.state();
        assert_eq!(clock.genesis_timestamp(), state.genesis_time);
        assert_eq!(clock.slot_duration(), state.slot_duration);
        assert_eq!(clock.epoch_duration(), state.epoch_duration);
    }

    #[tokio::test]
    async fn test_proposer_rotates_over_attesters() {
        let l1 = MockL1::default();
        let attesters = vec![Address::repeat_byte(1), Address::repeat_byte(2)];
        l1.state_mut().attesters = attesters.clone();
        let rollup = RollupContract::new(l1.rollup_address(), l1.clone());
        let clock = rollup.epoch_clock().await.unwrap();

        let slot = rollup.current_slot().await.unwrap();
        let next_slot_ts = clock.timestamp_for_slot(slot + 1).unwrap();
        assert_eq!(rollup.current_proposer().await.unwrap(), attesters[(slot % 2) as usize]);
        assert_eq!(
            rollup.proposer_at(next_slot_ts).await.unwrap(),
            attesters[((slot + 1) % 2) as usize]
        );
    }

    #[tokio::test]
    async fn test_debug_state() {
        let l1 = MockL1::default();
        {
            let mut state = l1.state_mut();
            state.attesters = vec![Address::repeat_byte(7), Address::repeat_byte(8)];
            state.pending_block_number = 12;
            state.proven_block_number = 10;
        }
        let rollup = RollupContract::new(l1.rollup_address(), l1.clone());

        let debug = rollup.debug_state(12).await.unwrap();
        assert_eq!(debug.pending_block_number, 12);
        assert_eq!(debug.proven_block_number, 10);
        assert_eq!(debug.committee, vec![Address::repeat_byte(7), Address::repeat_byte(8)]);
        assert!(debug.committee.contains(&debug.next_proposer));

        let output = debug.to_string();
        let joined = format!("{}, {}", Address::repeat_byte(7), Address::repeat_byte(8));
        assert!(output.contains("Pending block num: 12"));
        assert!(output.contains(&format!("Validators: {joined}\n")));
        assert!(output.contains(&format!("Committee: {joined}\n")));
    }

    #[tokio::test]
    async fn test_no_proposer_without_attesters() {
        let l1 = MockL1::default();
        let rollup = RollupContract::new(l1.rollup_address(), l1);

        assert_eq!(rollup.current_proposer().await.unwrap(), Address::ZERO);
        assert!(rollup.attesters().await.unwrap().is_empty());
    }
}
