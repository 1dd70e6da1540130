//! The operator CLI managing rollup validators on L1.

pub use args::{
    AddL1ValidatorArgs, Cli, Command, DebugRollupArgs, FastForwardEpochsArgs, L1ProviderArgs,
    PruneRollupArgs, RemoveL1ValidatorArgs, SignerArgs,
};
mod args;

pub mod commands;

mod constants;
