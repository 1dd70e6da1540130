//! A library containing the bindings and constants required to interact with the rollup
//! contracts on L1.

pub use abi::{IRollup, IStakingAssetHandler};
mod abi;

pub use constants::*;
mod constants;

pub use forwarder::{derive_forwarder_address, ForwarderDeployment};
mod forwarder;

pub use revert::{is_timestamp_rejection, RevertReason};
mod revert;
