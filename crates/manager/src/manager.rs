//! The [`ValidatorSetManager`] submits the L1 transactions that admit validators, start their
//! withdrawal, prune unproven blocks and, on test networks, advance L1 time.

use crate::{ManagerConfig, ManagerError, ManagerMetrics};
use std::{fmt, time::Instant};

use alloy_primitives::{utils::format_ether, Address, B256, U256};
use alloy_sol_types::SolCall;
use rollup_l1::{is_test_network, IRollup, IStakingAssetHandler, RevertReason};
use rollup_node_providers::{
    call_sol, CheatCodesProvider, L1ChainProvider, L1ProviderError, RollupContract,
};
use tracing::{info, warn};

/// The result of admitting a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// The rollup the validator was admitted to.
    pub rollup: Address,
    /// The forwarder registered as the validator's proposer.
    pub forwarder: Address,
    /// The hash of the `addValidator` transaction.
    pub tx_hash: B256,
    /// The balance of the proposer, read on networks where it is not funded by the manager.
    pub proposer_balance: Option<U256>,
}

/// The result of pruning the rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneOutcome {
    /// Unproven blocks were pruned.
    Pruned {
        /// The hash of the `prune` transaction.
        tx_hash: B256,
    },
    /// There was nothing to prune.
    NoOp,
}

/// The result of advancing L1 time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastForwardOutcome {
    /// A block was mined at the target timestamp.
    Advanced {
        /// The timestamp of the mined block.
        target_timestamp: u64,
    },
    /// The chain head was already at or past the target timestamp.
    AlreadyAdvanced {
        /// The requested timestamp.
        target_timestamp: u64,
        /// The timestamp of the chain head.
        head_timestamp: u64,
    },
}

/// Drives the validator lifecycle on the L1 rollup contracts.
///
/// The manager holds no state of its own: every operation reads what it needs from the chain,
/// submits a transaction and waits for it to be confirmed. Dropping an operation while it waits
/// does not cancel the submitted transaction, which may still land on chain.
pub struct ValidatorSetManager<P> {
    /// The L1 provider.
    provider: P,
    /// The manager configuration.
    config: ManagerConfig,
    /// The manager metrics.
    metrics: ManagerMetrics,
}

impl<P: fmt::Debug> fmt::Debug for ValidatorSetManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorSetManager")
            .field("provider", &self.provider)
            .field("config", &self.config)
            .finish()
    }
}

impl<P> ValidatorSetManager<P>
where
    P: L1ChainProvider + CheatCodesProvider + Clone,
{
    /// Returns a new instance of [`ValidatorSetManager`].
    pub fn new(provider: P, config: ManagerConfig) -> Self {
        Self { provider, config, metrics: ManagerMetrics::default() }
    }

    /// Returns a reference to the L1 provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the rollup contract at the provided address.
    pub fn rollup(&self, address: Address) -> RollupContract<P> {
        RollupContract::new(address, self.provider.clone())
    }

    /// Admits a validator through the staking asset handler.
    ///
    /// The proposer is registered through its forwarder contract, whose address is derived
    /// deterministically. On a test network the proposer is funded, otherwise a warning is
    /// logged if it has no balance to pay for proposals.
    pub async fn admit(
        &self,
        attester: Address,
        proposer: Address,
        handler: Address,
    ) -> Result<Admission, ManagerError> {
        let deployment = self.config.forwarder.as_ref().ok_or(ManagerError::MissingForwarderCode)?;
        let rollup =
            call_sol(&self.provider, handler, IStakingAssetHandler::getRollupCall {}).await?;
        let forwarder = deployment.address_for(proposer);
        info!(target: "rollup::manager", %attester, %proposer, %forwarder, %rollup, "adding validator");

        let call = IStakingAssetHandler::addValidatorCall { attester, proposer: forwarder };
        let tx_hash = self.submit_and_confirm(handler, call).await?;

        let chain_id = self.provider.l1_chain_id().await?;
        let proposer_balance = if is_test_network(chain_id) {
            self.provider.set_balance(proposer, self.config.test_network_balance).await?;
            info!(target: "rollup::manager", %proposer, balance = %self.config.test_network_balance, "funded proposer");
            None
        } else {
            let balance = self.provider.balance_of(proposer).await?;
            info!(target: "rollup::manager", %proposer, balance = %format_ether(balance), "proposer balance in ETH");
            if balance.is_zero() {
                warn!(target: "rollup::manager", %proposer, "proposer has no balance and cannot pay for proposals");
            }
            Some(balance)
        };

        Ok(Admission { rollup, forwarder, tx_hash, proposer_balance })
    }

    /// Starts the withdrawal of a validator, paying out to the validator itself.
    pub async fn initiate_withdraw(
        &self,
        validator: Address,
        rollup: Address,
    ) -> Result<B256, ManagerError> {
        info!(target: "rollup::manager", %validator, %rollup, "initiating withdrawal");
        let call = IRollup::initiateWithdrawCall { attester: validator, recipient: validator };
        self.submit_and_confirm(rollup, call).await
    }

    /// Prunes the unproven blocks of the rollup. Pruning a rollup with nothing to prune is not
    /// an error.
    ///
    /// A prune transaction that is mined and reverts carries no reason, so the call is replayed
    /// against the latest state to tell whether the rollup was pruned in the meantime.
    pub async fn prune(&self, rollup: Address) -> Result<PruneOutcome, ManagerError> {
        match self.submit_and_confirm(rollup, IRollup::pruneCall {}).await {
            Ok(tx_hash) => Ok(PruneOutcome::Pruned { tx_hash }),
            Err(ManagerError::L1Provider(err))
                if err.revert_reason().is_some_and(RevertReason::is_nothing_to_prune) =>
            {
                info!(target: "rollup::manager", %rollup, "nothing to prune");
                Ok(PruneOutcome::NoOp)
            }
            Err(ManagerError::L1Provider(L1ProviderError::Revert {
                tx_hash: Some(tx_hash),
                reason: None,
            })) => {
                let replay = self
                    .provider
                    .call_contract(rollup, IRollup::pruneCall {}.abi_encode().into())
                    .await;
                match replay {
                    Err(err) if err.revert_reason().is_some_and(RevertReason::is_nothing_to_prune) => {
                        info!(target: "rollup::manager", %rollup, %tx_hash, "rollup pruned by another transaction");
                        Ok(PruneOutcome::NoOp)
                    }
                    _ => Err(L1ProviderError::Revert { tx_hash: Some(tx_hash), reason: None }.into()),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Advances L1 time by `epochs` rollup epochs by mining a block at the start of the target
    /// slot. Only available on test networks.
    pub async fn fast_forward(
        &self,
        epochs: u64,
        rollup: Address,
    ) -> Result<FastForwardOutcome, ManagerError> {
        let chain_id = self.provider.l1_chain_id().await?;
        if !is_test_network(chain_id) {
            return Err(ManagerError::NotTestNetwork { chain_id })
        }

        let contract = self.rollup(rollup);
        let clock = contract.epoch_clock().await?;
        let current_slot = contract.current_slot().await?;
        let target_slot = clock.slot_after_epochs(current_slot, epochs)?;
        let target_timestamp = contract.timestamp_for_slot(target_slot).await?;
        let head_timestamp = self.provider.latest_block_timestamp().await?;

        if target_timestamp <= head_timestamp {
            info!(target: "rollup::manager", target_timestamp, head_timestamp, "chain already past target timestamp");
            return Ok(FastForwardOutcome::AlreadyAdvanced { target_timestamp, head_timestamp })
        }

        info!(target: "rollup::manager", current_slot, target_slot, target_timestamp, "fast forwarding");
        match self.provider.warp(target_timestamp).await {
            Ok(()) => Ok(FastForwardOutcome::Advanced { target_timestamp }),
            Err(err) if err.is_timestamp_rejection() => {
                let head_timestamp = self.provider.latest_block_timestamp().await?;
                info!(target: "rollup::manager", target_timestamp, head_timestamp, "chain advanced past target timestamp during warp");
                Ok(FastForwardOutcome::AlreadyAdvanced { target_timestamp, head_timestamp })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Submits a call, logs the transaction hash and waits for the transaction to be confirmed.
    async fn submit_and_confirm<C: SolCall>(
        &self,
        to: Address,
        call: C,
    ) -> Result<B256, ManagerError> {
        let tx_hash = match self.provider.submit_call(to, call.abi_encode().into()).await {
            Ok(tx_hash) => tx_hash,
            Err(err) => {
                if matches!(err, L1ProviderError::Revert { .. }) {
                    self.metrics.reverted_transactions.increment(1);
                }
                return Err(err.into())
            }
        };
        self.metrics.submitted_transactions.increment(1);
        info!(target: "rollup::manager", %tx_hash, method = C::SIGNATURE, "submitted transaction");

        let now = Instant::now();
        match self.provider.await_confirmation(tx_hash, self.config.confirmation_timeout).await {
            Ok(()) => {
                self.metrics.confirmation_duration.record(now.elapsed().as_secs_f64());
                info!(target: "rollup::manager", %tx_hash, "transaction confirmed");
                Ok(tx_hash)
            }
            Err(err) => {
                match &err {
                    L1ProviderError::ConfirmationTimeout { .. } => {
                        self.metrics.timed_out_transactions.increment(1);
                        warn!(target: "rollup::manager", %tx_hash, "transaction not confirmed in time, it may still be included");
                    }
                    L1ProviderError::Revert { .. } => {
                        self.metrics.reverted_transactions.increment(1);
                        warn!(target: "rollup::manager", %tx_hash, "transaction reverted");
                    }
                    _ => {}
                }
                Err(err.into())
            }
        }
    }
}
