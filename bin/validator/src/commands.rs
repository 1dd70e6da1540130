//! The implementation of each operator command.

use crate::{
    AddL1ValidatorArgs, Command, DebugRollupArgs, FastForwardEpochsArgs, PruneRollupArgs,
    RemoveL1ValidatorArgs,
};

use alloy_primitives::utils::format_ether;
use rollup_l1::ForwarderDeployment;
use rollup_node_manager::{FastForwardOutcome, PruneOutcome, ValidatorSetManager};
use rollup_node_providers::RollupContract;
use tracing::info;

/// Runs the command.
pub async fn run(command: Command) -> eyre::Result<()> {
    match command {
        Command::GenerateL1Account => {
            generate_l1_account();
            Ok(())
        }
        Command::AddL1Validator(args) => add_l1_validator(args).await,
        Command::RemoveL1Validator(args) => remove_l1_validator(args).await,
        Command::PruneRollup(args) => prune_rollup(args).await,
        Command::FastForwardEpochs(args) => fast_forward_epochs(args).await,
        Command::DebugRollup(args) => debug_rollup(args).await,
    }
}

/// Prints a new random L1 account.
pub fn generate_l1_account() {
    let (private_key, address) = rollup_node_signer::generate_l1_account();
    println!("Private Key: {private_key}");
    println!("Address: {address}");
}

/// Adds a validator and, on a test network, funds its proposer.
pub async fn add_l1_validator(args: AddL1ValidatorArgs) -> eyre::Result<()> {
    let signer = args.signer.credentials().build()?;
    let provider = args.l1.connect_with_signer(signer).await?;
    let config = args
        .l1
        .manager_config()
        .with_forwarder(ForwarderDeployment::new(args.forwarder_bytecode));
    let manager = ValidatorSetManager::new(provider, config);

    let admission =
        manager.admit(args.attester, args.proposer_eoa, args.staking_asset_handler).await?;
    println!("Rollup: {}", admission.rollup);
    println!("Forwarder: {}", admission.forwarder);
    println!("Transaction hash: {}", admission.tx_hash);
    if let Some(balance) = admission.proposer_balance {
        println!("Proposer balance: {} ETH", format_ether(balance));
        if balance.is_zero() {
            println!("WARNING: Proposer has no balance. Remember to fund it!");
        }
    }
    Ok(())
}

/// Starts the withdrawal of a validator.
pub async fn remove_l1_validator(args: RemoveL1ValidatorArgs) -> eyre::Result<()> {
    let signer = args.signer.credentials().build()?;
    let provider = args.l1.connect_with_signer(signer).await?;
    let manager = ValidatorSetManager::new(provider, args.l1.manager_config());

    let tx_hash = manager.initiate_withdraw(args.validator, args.rollup).await?;
    println!("Transaction hash: {tx_hash}");
    Ok(())
}

/// Prunes the unproven blocks of the rollup.
pub async fn prune_rollup(args: PruneRollupArgs) -> eyre::Result<()> {
    let signer = args.signer.credentials().build()?;
    let provider = args.l1.connect_with_signer(signer).await?;
    let manager = ValidatorSetManager::new(provider, args.l1.manager_config());

    match manager.prune(args.rollup).await? {
        PruneOutcome::Pruned { tx_hash } => println!("Transaction hash: {tx_hash}"),
        PruneOutcome::NoOp => println!("Nothing to prune"),
    }
    Ok(())
}

/// Advances L1 time by the requested number of epochs.
pub async fn fast_forward_epochs(args: FastForwardEpochsArgs) -> eyre::Result<()> {
    let provider = args.l1.connect().await?;
    let manager = ValidatorSetManager::new(provider, args.l1.manager_config());

    match manager.fast_forward(args.num_epochs, args.rollup).await? {
        FastForwardOutcome::Advanced { target_timestamp } => {
            println!("Fast forwarded {} epochs to {target_timestamp}", args.num_epochs)
        }
        FastForwardOutcome::AlreadyAdvanced { target_timestamp, head_timestamp } => {
            info!(target: "rollup::cli", target_timestamp, head_timestamp, "skipped fast forward");
            println!("The chain is already at or after {target_timestamp}")
        }
    }
    Ok(())
}

/// Prints the state of the rollup.
pub async fn debug_rollup(args: DebugRollupArgs) -> eyre::Result<()> {
    let provider = args.l1.connect().await?;
    let rollup = RollupContract::new(args.rollup, provider);

    let state = rollup.debug_state(args.l1.slot_duration).await?;
    println!("{state}");
    Ok(())
}
