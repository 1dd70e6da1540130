//! The inputs and public inputs of the proofs aggregating an epoch of L2 blocks.

pub use blob::{BlobPublicInputs, BlockBlobPublicInputs};
mod blob;

pub use fees::FeeRecipient;
mod fees;

pub use merge::{BlockMergePublicInputs, ChildProofData, VkWitnessData};
mod merge;

pub use root::{RootRollupInputs, RootRollupPublicInputs};
mod root;
