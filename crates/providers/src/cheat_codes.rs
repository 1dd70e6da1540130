use crate::L1ProviderError;

use alloy_primitives::{Address, U256};
use alloy_provider::Provider;

/// Cheat codes exposed by local test networks to manipulate balances and time.
#[async_trait::async_trait]
pub trait CheatCodesProvider: Send + Sync {
    /// Sets the balance of the account.
    async fn set_balance(&self, address: Address, balance: U256) -> Result<(), L1ProviderError>;

    /// Sets the timestamp of the next mined block. Fails if it does not advance the chain.
    async fn set_next_block_timestamp(&self, timestamp: u64) -> Result<(), L1ProviderError>;

    /// Mines a block.
    async fn mine(&self) -> Result<(), L1ProviderError>;

    /// Mines a block at the provided timestamp.
    async fn warp(&self, timestamp: u64) -> Result<(), L1ProviderError> {
        self.set_next_block_timestamp(timestamp).await?;
        self.mine().await
    }
}

#[async_trait::async_trait]
impl<P: Provider> CheatCodesProvider for P {
    async fn set_balance(&self, address: Address, balance: U256) -> Result<(), L1ProviderError> {
        self.client()
            .request::<_, serde_json::Value>("anvil_setBalance", (address, balance))
            .await?;
        Ok(())
    }

    async fn set_next_block_timestamp(&self, timestamp: u64) -> Result<(), L1ProviderError> {
        self.client()
            .request::<_, serde_json::Value>("evm_setNextBlockTimestamp", (timestamp,))
            .await?;
        Ok(())
    }

    async fn mine(&self) -> Result<(), L1ProviderError> {
        self.client().request_noparams::<serde_json::Value>("evm_mine").await?;
        Ok(())
    }
}
