//! The crate exposes the providers used by the rollup tooling to read from and write to L1.

pub use chain::{call_sol, L1ChainProvider};
mod chain;

pub use cheat_codes::CheatCodesProvider;
mod cheat_codes;

pub use error::L1ProviderError;
mod error;

pub use rollup::{RollupContract, RollupDebugState};
mod rollup;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
