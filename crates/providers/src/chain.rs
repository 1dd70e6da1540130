use crate::L1ProviderError;
use std::time::Duration;

use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError};
use alloy_rpc_types_eth::{BlockNumberOrTag, TransactionRequest};
use alloy_sol_types::SolCall;

/// Access to the L1 chain needed by the rollup tooling: read calls, transaction submission and
/// confirmation, balances and the chain head.
#[async_trait::async_trait]
pub trait L1ChainProvider: Send + Sync {
    /// Returns the chain id of the L1.
    async fn l1_chain_id(&self) -> Result<u64, L1ProviderError>;

    /// Executes a read-only call against the contract at `to` and returns the output.
    async fn call_contract(&self, to: Address, input: Bytes) -> Result<Bytes, L1ProviderError>;

    /// Submits a transaction calling the contract at `to` and returns its hash without waiting
    /// for inclusion.
    async fn submit_call(&self, to: Address, input: Bytes) -> Result<B256, L1ProviderError>;

    /// Waits at most `timeout` for the transaction to be included and checks it succeeded.
    async fn await_confirmation(
        &self,
        tx_hash: B256,
        timeout: Duration,
    ) -> Result<(), L1ProviderError>;

    /// Returns the balance of the account.
    async fn balance_of(&self, address: Address) -> Result<U256, L1ProviderError>;

    /// Returns the timestamp of the latest L1 block.
    async fn latest_block_timestamp(&self) -> Result<u64, L1ProviderError>;
}

/// Calls the contract at `to` through the provider and decodes the return value.
pub async fn call_sol<P, C>(provider: &P, to: Address, call: C) -> Result<C::Return, L1ProviderError>
where
    P: L1ChainProvider + ?Sized,
    C: SolCall,
{
    let output = provider.call_contract(to, call.abi_encode().into()).await?;
    Ok(C::abi_decode_returns(&output)?)
}

#[async_trait::async_trait]
impl<P: Provider> L1ChainProvider for P {
    async fn l1_chain_id(&self) -> Result<u64, L1ProviderError> {
        Ok(self.get_chain_id().await?)
    }

    async fn call_contract(&self, to: Address, input: Bytes) -> Result<Bytes, L1ProviderError> {
        let request = TransactionRequest::default().with_to(to).with_input(input);
        self.call(request).await.map_err(L1ProviderError::from_rpc)
    }

    async fn submit_call(&self, to: Address, input: Bytes) -> Result<B256, L1ProviderError> {
        tracing::trace!(target: "rollup::providers", %to, "submitting call");
        let request = TransactionRequest::default().with_to(to).with_input(input);
        let pending = self.send_transaction(request).await.map_err(L1ProviderError::from_rpc)?;
        Ok(*pending.tx_hash())
    }

    async fn await_confirmation(
        &self,
        tx_hash: B256,
        timeout: Duration,
    ) -> Result<(), L1ProviderError> {
        tracing::trace!(target: "rollup::providers", %tx_hash, ?timeout, "awaiting confirmation");
        let receipt = PendingTransactionBuilder::new(self.root().clone(), tx_hash)
            .with_timeout(Some(timeout))
            .get_receipt()
            .await
            .map_err(|err| match err {
                PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
                    L1ProviderError::ConfirmationTimeout { tx_hash }
                }
                PendingTransactionError::TransportError(err) => L1ProviderError::Rpc(err),
                err => err.into(),
            })?;

        if !receipt.status() {
            return Err(L1ProviderError::Revert { tx_hash: Some(tx_hash), reason: None })
        }
        Ok(())
    }

    async fn balance_of(&self, address: Address) -> Result<U256, L1ProviderError> {
        Ok(self.get_balance(address).await?)
    }

    async fn latest_block_timestamp(&self) -> Result<u64, L1ProviderError> {
        let block = self
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await?
            .ok_or(L1ProviderError::Other("missing latest block"))?;
        Ok(block.header.timestamp)
    }
}
