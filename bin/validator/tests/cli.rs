//! Argument parsing and early validation of the operator commands.

use alloy_primitives::{address, bytes};
use clap::{CommandFactory, Parser};
use rollup_node_signer::SignerError;
use rollup_validator::{commands, Cli, Command};

const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn parse(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("rollup-validator").chain(args.iter().copied()))
        .unwrap()
        .command
}

#[test]
fn test_cli_definition() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_add_l1_validator() {
    let command = parse(&[
        "add-l1-validator",
        "--l1.rpc-urls",
        "http://localhost:8545",
        "--private-key",
        ANVIL_KEY,
        "--attester",
        "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        "--proposer-eoa",
        "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
        "--staking-asset-handler",
        "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        "--forwarder-bytecode",
        "0x6080604052",
    ]);

    let Command::AddL1Validator(args) = command else { panic!("expected add-l1-validator") };
    assert_eq!(args.attester, address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"));
    assert_eq!(args.proposer_eoa, address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"));
    assert_eq!(args.forwarder_bytecode, bytes!("6080604052"));
    assert_eq!(args.l1.chain_id, 31337);
    assert_eq!(args.signer.private_key.as_deref(), Some(ANVIL_KEY));
}

#[test]
fn test_parse_multiple_rpc_urls() {
    let command = parse(&[
        "debug-rollup",
        "--l1.rpc-urls",
        "http://localhost:8545,http://localhost:8546",
        "--l1.chain-id",
        "1337",
        "--rollup",
        "0x5FbDB2315678afecb367f032d93F642f64180aa3",
    ]);

    let Command::DebugRollup(args) = command else { panic!("expected debug-rollup") };
    assert_eq!(args.l1.rpc_urls.len(), 2);
    assert_eq!(args.l1.rpc_urls[1].port(), Some(8546));
    assert_eq!(args.l1.chain_id, 1337);
    assert_eq!(args.l1.slot_duration, 12);
}

#[test]
fn test_parse_fast_forward_epochs() {
    let command = parse(&[
        "fast-forward-epochs",
        "--l1.rpc-urls",
        "http://localhost:8545",
        "--rollup",
        "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        "--num-epochs",
        "3",
    ]);

    let Command::FastForwardEpochs(args) = command else { panic!("expected fast-forward-epochs") };
    assert_eq!(args.num_epochs, 3);
    assert_eq!(args.l1.manager_config().confirmation_timeout.as_secs(), 120);
}

#[test]
fn test_signer_args_are_redacted() {
    let command = parse(&[
        "prune-rollup",
        "--l1.rpc-urls",
        "http://localhost:8545",
        "--mnemonic",
        "test test test test test test test test test test test junk",
        "--rollup",
        "0x5FbDB2315678afecb367f032d93F642f64180aa3",
    ]);

    let Command::PruneRollup(args) = command else { panic!("expected prune-rollup") };
    let debug = format!("{:?}", args.signer);
    assert!(!debug.contains("junk"));
    assert!(args.signer.credentials().build().is_ok());
}

#[tokio::test]
async fn test_missing_credentials_fail_before_connecting() {
    // nothing listens on this port, a connection attempt would fail with a transport error.
    let command = parse(&[
        "remove-l1-validator",
        "--l1.rpc-urls",
        "http://127.0.0.1:1",
        "--validator",
        "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        "--rollup",
        "0x5FbDB2315678afecb367f032d93F642f64180aa3",
    ]);
    let Command::RemoveL1Validator(mut args) = command else {
        panic!("expected remove-l1-validator")
    };
    args.signer.private_key = None;
    args.signer.mnemonic = None;

    let err = commands::remove_l1_validator(args).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<SignerError>(), Some(SignerError::Configuration(_))));
}

#[tokio::test]
async fn test_both_credentials_fail_before_connecting() {
    let command = parse(&[
        "prune-rollup",
        "--l1.rpc-urls",
        "http://127.0.0.1:1",
        "--private-key",
        ANVIL_KEY,
        "--mnemonic",
        "test test test test test test test test test test test junk",
        "--rollup",
        "0x5FbDB2315678afecb367f032d93F642f64180aa3",
    ]);
    let Command::PruneRollup(args) = command else { panic!("expected prune-rollup") };

    let err = commands::prune_rollup(args).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<SignerError>(), Some(SignerError::Configuration(_))));
}
