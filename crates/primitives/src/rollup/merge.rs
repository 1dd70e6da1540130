use crate::{
    constants::{MAX_EPOCH_DURATION, VK_TREE_HEIGHT},
    rollup::{BlockBlobPublicInputs, FeeRecipient},
    AppendOnlyTreeSnapshot, GlobalVariables,
};
use rollup_codec::{BufferDecode, BufferEncode, CodecError, Fr};

/// The public inputs of a block root or block merge proof, the children of the root rollup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockMergePublicInputs {
    /// The archive before the first block of the range.
    pub previous_archive: AppendOnlyTreeSnapshot,
    /// The archive after the last block of the range.
    pub new_archive: AppendOnlyTreeSnapshot,
    /// The hash of the block preceding the range.
    pub previous_block_hash: Fr,
    /// The hash of the last block of the range.
    pub end_block_hash: Fr,
    /// The global variables of the first block.
    pub start_global_variables: GlobalVariables,
    /// The global variables of the last block.
    pub end_global_variables: GlobalVariables,
    /// The accumulated out hash of the range.
    pub out_hash: Fr,
    /// The fee recipients of the range, one slot per block.
    pub fees: [FeeRecipient; MAX_EPOCH_DURATION],
    /// The root of the verification key tree.
    pub vk_tree_root: Fr,
    /// The root of the protocol contract tree.
    pub protocol_contract_tree_root: Fr,
    /// The identity of the prover.
    pub prover_id: Fr,
    /// The blob public inputs of the range, one slot per block.
    pub blob_public_inputs: [BlockBlobPublicInputs; MAX_EPOCH_DURATION],
}

impl Default for BlockMergePublicInputs {
    fn default() -> Self {
        Self {
            previous_archive: Default::default(),
            new_archive: Default::default(),
            previous_block_hash: Fr::ZERO,
            end_block_hash: Fr::ZERO,
            start_global_variables: Default::default(),
            end_global_variables: Default::default(),
            out_hash: Fr::ZERO,
            fees: [FeeRecipient::empty(); MAX_EPOCH_DURATION],
            vk_tree_root: Fr::ZERO,
            protocol_contract_tree_root: Fr::ZERO,
            prover_id: Fr::ZERO,
            blob_public_inputs: [BlockBlobPublicInputs::empty(); MAX_EPOCH_DURATION],
        }
    }
}

impl BlockMergePublicInputs {
    /// Returns random public inputs with random fee entries and empty blob tables.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self {
            previous_archive: AppendOnlyTreeSnapshot::random(),
            new_archive: AppendOnlyTreeSnapshot::random(),
            previous_block_hash: Fr::random(),
            end_block_hash: Fr::random(),
            start_global_variables: GlobalVariables::random(),
            end_global_variables: GlobalVariables::random(),
            out_hash: Fr::random(),
            fees: core::array::from_fn(|_| FeeRecipient::random()),
            vk_tree_root: Fr::random(),
            protocol_contract_tree_root: Fr::random(),
            prover_id: Fr::random(),
            blob_public_inputs: [BlockBlobPublicInputs::empty(); MAX_EPOCH_DURATION],
        }
    }
}

impl BufferEncode for BlockMergePublicInputs {
    fn encode(&self, out: &mut Vec<u8>) {
        self.previous_archive.encode(out);
        self.new_archive.encode(out);
        self.previous_block_hash.encode(out);
        self.end_block_hash.encode(out);
        self.start_global_variables.encode(out);
        self.end_global_variables.encode(out);
        self.out_hash.encode(out);
        self.fees.encode(out);
        self.vk_tree_root.encode(out);
        self.protocol_contract_tree_root.encode(out);
        self.prover_id.encode(out);
        self.blob_public_inputs.encode(out);
    }
}

impl BufferDecode for BlockMergePublicInputs {
    const MIN_ENCODED_LEN: usize = 2 * AppendOnlyTreeSnapshot::SIZE_IN_BYTES +
        2 * GlobalVariables::MIN_ENCODED_LEN +
        6 * Fr::SIZE_IN_BYTES +
        <[FeeRecipient; MAX_EPOCH_DURATION]>::MIN_ENCODED_LEN +
        <[BlockBlobPublicInputs; MAX_EPOCH_DURATION]>::MIN_ENCODED_LEN;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            previous_archive: AppendOnlyTreeSnapshot::decode(buf)?,
            new_archive: AppendOnlyTreeSnapshot::decode(buf)?,
            previous_block_hash: Fr::decode(buf)?,
            end_block_hash: Fr::decode(buf)?,
            start_global_variables: GlobalVariables::decode(buf)?,
            end_global_variables: GlobalVariables::decode(buf)?,
            out_hash: Fr::decode(buf)?,
            fees: BufferDecode::decode(buf)?,
            vk_tree_root: Fr::decode(buf)?,
            protocol_contract_tree_root: Fr::decode(buf)?,
            prover_id: Fr::decode(buf)?,
            blob_public_inputs: BufferDecode::decode(buf)?,
        })
    }
}

/// The data needed to prove a verification key is part of the verification key tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct VkWitnessData {
    /// The verification key as field elements.
    pub vk: Vec<Fr>,
    /// The index of the key in the tree.
    pub leaf_index: u32,
    /// The sibling path of the key.
    pub sibling_path: [Fr; VK_TREE_HEIGHT],
}

impl VkWitnessData {
    /// Returns random witness data with a key of `vk_len` elements.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random(vk_len: usize) -> Self {
        Self {
            vk: (0..vk_len).map(|_| Fr::random()).collect(),
            leaf_index: rand::random::<u8>() as u32,
            sibling_path: core::array::from_fn(|_| Fr::random()),
        }
    }
}

impl BufferEncode for VkWitnessData {
    fn encode(&self, out: &mut Vec<u8>) {
        self.vk.encode(out);
        self.leaf_index.encode(out);
        self.sibling_path.encode(out);
    }
}

impl BufferDecode for VkWitnessData {
    const MIN_ENCODED_LEN: usize = 4 + 4 + VK_TREE_HEIGHT * Fr::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            vk: Vec::<Fr>::decode(buf)?,
            leaf_index: u32::decode(buf)?,
            sibling_path: BufferDecode::decode(buf)?,
        })
    }
}

/// The output of a child proof consumed by the root rollup: its public inputs, the proof and
/// the verification key it was produced against.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ChildProofData {
    /// The public inputs of the child proof.
    pub public_inputs: BlockMergePublicInputs,
    /// The proof.
    pub proof: Vec<Fr>,
    /// The verification key witness.
    pub vk_data: VkWitnessData,
}

impl ChildProofData {
    /// Returns random child proof data.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self {
            public_inputs: BlockMergePublicInputs::random(),
            proof: (0..16).map(|_| Fr::random()).collect(),
            vk_data: VkWitnessData::random(8),
        }
    }
}

impl BufferEncode for ChildProofData {
    fn encode(&self, out: &mut Vec<u8>) {
        self.public_inputs.encode(out);
        self.proof.encode(out);
        self.vk_data.encode(out);
    }
}

impl BufferDecode for ChildProofData {
    const MIN_ENCODED_LEN: usize =
        BlockMergePublicInputs::MIN_ENCODED_LEN + 4 + VkWitnessData::MIN_ENCODED_LEN;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            public_inputs: BlockMergePublicInputs::decode(buf)?,
            proof: Vec::<Fr>::decode(buf)?,
            vk_data: VkWitnessData::decode(buf)?,
        })
    }
}
