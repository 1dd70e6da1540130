//! Consensus primitive types for the rollup: block headers, consensus payloads, root rollup
//! inputs and the epoch clock.

pub use consensus::{ConsensusPayload, SignatureDomainSeparator};
mod consensus;

pub mod constants;

pub use epoch::EpochClock;
mod epoch;

pub use error::ClockError;
mod error;

pub use header::{BlockHeader, ContentCommitment, GasFees, GlobalVariables, StateReference};
mod header;

pub use rollup::{
    BlobPublicInputs, BlockBlobPublicInputs, BlockMergePublicInputs, ChildProofData,
    FeeRecipient, RootRollupInputs, RootRollupPublicInputs, VkWitnessData,
};
mod rollup;

pub use transaction::TxHash;
mod transaction;

pub use tree::AppendOnlyTreeSnapshot;
mod tree;

pub use rollup_codec::{BufferDecode, BufferEncode, CodecError, FieldEncode, Fr};
