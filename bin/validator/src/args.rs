use crate::constants;
use std::{fmt, time::Duration};

use alloy_chains::Chain;
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, Bytes};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::layers::RetryBackoffLayer;
use rollup_l1::ANVIL_CHAIN_ID;
use rollup_node_manager::{ManagerConfig, DEFAULT_CONFIRMATION_TIMEOUT};
use rollup_node_providers::L1ChainProvider;
use rollup_node_signer::SignerCredentials;
use tracing::info;

/// Manage the validators of a rollup on L1.
#[derive(Debug, clap::Parser)]
#[command(name = "rollup-validator", version, about)]
pub struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The operator commands.
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Generates a new L1 private key and prints it with its address.
    GenerateL1Account,
    /// Adds a validator through the staking asset handler.
    AddL1Validator(AddL1ValidatorArgs),
    /// Starts the withdrawal of a validator from the rollup.
    RemoveL1Validator(RemoveL1ValidatorArgs),
    /// Prunes the unproven blocks of the rollup.
    PruneRollup(PruneRollupArgs),
    /// Advances L1 time by a number of rollup epochs. Test networks only.
    FastForwardEpochs(FastForwardEpochsArgs),
    /// Prints the state of the rollup.
    DebugRollup(DebugRollupArgs),
}

/// The arguments for the L1 provider.
#[derive(Debug, Clone, clap::Args)]
pub struct L1ProviderArgs {
    /// The URLs of the L1 RPC. Requests go to the first one, the others are kept as standby.
    #[arg(
        long = "l1.rpc-urls",
        id = "l1_rpc_urls",
        value_name = "L1_RPC_URLS",
        env = "ETHEREUM_HOSTS",
        value_delimiter = ',',
        required = true
    )]
    pub rpc_urls: Vec<reqwest::Url>,
    /// The chain id of the L1.
    #[arg(long = "l1.chain-id", id = "l1_chain_id", value_name = "L1_CHAIN_ID", env = "L1_CHAIN_ID", default_value_t = ANVIL_CHAIN_ID)]
    pub chain_id: u64,
    /// The compute units per second for the provider.
    #[arg(long = "l1.cups", id = "l1_compute_units_per_second", value_name = "L1_COMPUTE_UNITS_PER_SECOND", default_value_t = constants::PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l1.max-retries", id = "l1_max_retries", value_name = "L1_MAX_RETRIES", default_value_t = constants::L1_PROVIDER_MAX_RETRIES)]
    pub max_retries: u32,
    /// The initial backoff for the provider, in milliseconds.
    #[arg(long = "l1.initial-backoff", id = "l1_initial_backoff", value_name = "L1_INITIAL_BACKOFF", default_value_t = constants::L1_PROVIDER_INITIAL_BACKOFF)]
    pub initial_backoff: u64,
    /// How long to wait for a transaction to be included, in seconds.
    #[arg(long = "l1.confirmation-timeout", id = "l1_confirmation_timeout", value_name = "L1_CONFIRMATION_TIMEOUT", default_value_t = DEFAULT_CONFIRMATION_TIMEOUT.as_secs())]
    pub confirmation_timeout: u64,
    /// The L1 block time, in seconds.
    #[arg(long = "l1.slot-duration", id = "l1_slot_duration", value_name = "L1_SLOT_DURATION", env = "ETHEREUM_SLOT_DURATION", default_value_t = constants::L1_SLOT_DURATION)]
    pub slot_duration: u64,
}

impl L1ProviderArgs {
    /// Returns the manager configuration for these arguments.
    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig::default()
            .with_confirmation_timeout(Duration::from_secs(self.confirmation_timeout))
    }

    /// Connects a read-only provider to the L1.
    pub async fn connect(&self) -> eyre::Result<impl Provider + Clone> {
        let provider = ProviderBuilder::new().connect_client(self.client()?);
        self.ensure_chain_id(&provider).await?;
        Ok(provider)
    }

    /// Connects a provider to the L1 that signs transactions with the provided signer.
    pub async fn connect_with_signer(
        &self,
        signer: PrivateKeySigner,
    ) -> eyre::Result<impl Provider + Clone> {
        let sender = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_client(self.client()?);
        self.ensure_chain_id(&provider).await?;
        info!(target: "rollup::cli", %sender, "sending transactions");
        Ok(provider)
    }

    fn client(&self) -> eyre::Result<RpcClient> {
        let (url, standby) =
            self.rpc_urls.split_first().ok_or_else(|| eyre::eyre!("no L1 RPC url provided"))?;
        if !standby.is_empty() {
            info!(target: "rollup::cli", %url, ?standby, "using the first L1 RPC url");
        }
        let retry_layer = RetryBackoffLayer::new(
            self.max_retries,
            self.initial_backoff,
            self.compute_units_per_second,
        );
        Ok(RpcClient::builder().layer(retry_layer).http(url.clone()))
    }

    async fn ensure_chain_id<P: Provider>(&self, provider: &P) -> eyre::Result<()> {
        let chain_id = provider.l1_chain_id().await?;
        if chain_id != self.chain_id {
            eyre::bail!("L1 chain id mismatch: expected {}, got {chain_id}", self.chain_id)
        }
        info!(target: "rollup::cli", chain = %Chain::from_id(chain_id), "connected to L1");
        Ok(())
    }
}

/// The arguments for the account sending transactions: exactly one of a private key or a
/// mnemonic.
#[derive(Clone, Default, clap::Args)]
pub struct SignerArgs {
    /// The private key of the sending account.
    #[arg(long = "private-key", value_name = "PRIVATE_KEY", env = "PRIVATE_KEY")]
    pub private_key: Option<String>,
    /// The mnemonic of the sending account.
    #[arg(long = "mnemonic", value_name = "MNEMONIC", env = "MNEMONIC")]
    pub mnemonic: Option<String>,
    /// The index of the account derived from the mnemonic.
    #[arg(long = "mnemonic-index", value_name = "MNEMONIC_INDEX", default_value_t = 0)]
    pub mnemonic_index: u32,
}

impl SignerArgs {
    /// Returns the signer credentials.
    pub fn credentials(&self) -> SignerCredentials {
        SignerCredentials {
            private_key: self.private_key.clone(),
            mnemonic: self.mnemonic.clone(),
            mnemonic_index: self.mnemonic_index,
        }
    }
}

impl fmt::Debug for SignerArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.credentials(), f)
    }
}

/// The arguments of the `add-l1-validator` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AddL1ValidatorArgs {
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1: L1ProviderArgs,
    /// The sending account.
    #[command(flatten)]
    pub signer: SignerArgs,
    /// The attester address of the validator.
    #[arg(long = "attester", value_name = "ADDRESS")]
    pub attester: Address,
    /// The account of the proposer. Its forwarder is registered on its behalf.
    #[arg(long = "proposer-eoa", value_name = "ADDRESS")]
    pub proposer_eoa: Address,
    /// The address of the staking asset handler.
    #[arg(long = "staking-asset-handler", value_name = "ADDRESS", env = "STAKING_ASSET_HANDLER_CONTRACT_ADDRESS")]
    pub staking_asset_handler: Address,
    /// The creation code of the forwarder contract.
    #[arg(long = "forwarder-bytecode", value_name = "HEX", env = "FORWARDER_BYTECODE")]
    pub forwarder_bytecode: Bytes,
}

/// The arguments of the `remove-l1-validator` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RemoveL1ValidatorArgs {
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1: L1ProviderArgs,
    /// The sending account.
    #[command(flatten)]
    pub signer: SignerArgs,
    /// The attester address of the validator.
    #[arg(long = "validator", value_name = "ADDRESS")]
    pub validator: Address,
    /// The address of the rollup.
    #[arg(long = "rollup", value_name = "ADDRESS", env = "ROLLUP_CONTRACT_ADDRESS")]
    pub rollup: Address,
}

/// The arguments of the `prune-rollup` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PruneRollupArgs {
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1: L1ProviderArgs,
    /// The sending account.
    #[command(flatten)]
    pub signer: SignerArgs,
    /// The address of the rollup.
    #[arg(long = "rollup", value_name = "ADDRESS", env = "ROLLUP_CONTRACT_ADDRESS")]
    pub rollup: Address,
}

/// The arguments of the `fast-forward-epochs` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FastForwardEpochsArgs {
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1: L1ProviderArgs,
    /// The address of the rollup.
    #[arg(long = "rollup", value_name = "ADDRESS", env = "ROLLUP_CONTRACT_ADDRESS")]
    pub rollup: Address,
    /// The number of epochs to advance.
    #[arg(long = "num-epochs", value_name = "EPOCHS", default_value_t = 1)]
    pub num_epochs: u64,
}

/// The arguments of the `debug-rollup` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DebugRollupArgs {
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1: L1ProviderArgs,
    /// The address of the rollup.
    #[arg(long = "rollup", value_name = "ADDRESS", env = "ROLLUP_CONTRACT_ADDRESS")]
    pub rollup: Address,
}
