use crate::IRollup::{self, IRollupErrors};
use alloy_primitives::Bytes;
use alloy_sol_types::{decode_revert_reason, SolInterface};

/// The message fragment a node returns when asked to mine a block at a timestamp that does not
/// advance the chain.
const TIMESTAMP_REJECTION: &str = "is lower than or equal to previous block's timestamp";

/// The decoded reason of a reverted call.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RevertReason {
    /// The rollup had no pending blocks to prune.
    #[display("Rollup__NothingToPrune()")]
    NothingToPrune,
    /// A revert with a readable reason.
    #[display("{_0}")]
    Message(String),
    /// Revert data that could not be decoded.
    #[display("unknown revert data {_0}")]
    Unknown(Bytes),
}

impl RevertReason {
    /// Decodes the revert data returned by the rollup contracts.
    pub fn decode(data: &[u8]) -> Self {
        if let Ok(IRollupErrors::Rollup__NothingToPrune(IRollup::Rollup__NothingToPrune {})) =
            IRollupErrors::abi_decode(data)
        {
            return Self::NothingToPrune
        }
        if data.is_empty() {
            return Self::Unknown(Bytes::new())
        }
        decode_revert_reason(data)
            .map(Self::Message)
            .unwrap_or_else(|| Self::Unknown(Bytes::copy_from_slice(data)))
    }

    /// Returns true if the revert signals that there was nothing to prune.
    pub const fn is_nothing_to_prune(&self) -> bool {
        matches!(self, Self::NothingToPrune)
    }
}

/// Returns true if the node error message rejects a block timestamp that does not advance the
/// chain. Nodes only expose this condition as text.
pub fn is_timestamp_rejection(message: &str) -> bool {
    message.contains(TIMESTAMP_REJECTION)
}
