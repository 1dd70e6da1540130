use crate::{
    constants::MAX_EPOCH_DURATION,
    rollup::{BlockBlobPublicInputs, ChildProofData, FeeRecipient},
    AppendOnlyTreeSnapshot,
};
use rollup_codec::{BufferDecode, BufferEncode, CodecError, FieldEncode, Fr};

/// The inputs of the root rollup circuit: exactly two child proofs and the prover identity.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct RootRollupInputs {
    /// The left and right child proofs.
    pub previous_rollup_data: [ChildProofData; 2],
    /// The identity of the prover.
    pub prover_id: Fr,
}

impl RootRollupInputs {
    /// Returns a new instance of [`RootRollupInputs`].
    pub const fn new(previous_rollup_data: [ChildProofData; 2], prover_id: Fr) -> Self {
        Self { previous_rollup_data, prover_id }
    }

    /// Returns random inputs.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self::new([ChildProofData::random(), ChildProofData::random()], Fr::random())
    }
}

impl BufferEncode for RootRollupInputs {
    fn encode(&self, out: &mut Vec<u8>) {
        self.previous_rollup_data.encode(out);
        self.prover_id.encode(out);
    }
}

impl BufferDecode for RootRollupInputs {
    const MIN_ENCODED_LEN: usize = 2 * ChildProofData::MIN_ENCODED_LEN + Fr::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self { previous_rollup_data: BufferDecode::decode(buf)?, prover_id: Fr::decode(buf)? })
    }
}

/// The public inputs of the root rollup proof, verified on L1 when an epoch is proven.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootRollupPublicInputs {
    /// The archive before the epoch.
    pub previous_archive: AppendOnlyTreeSnapshot,
    /// The archive after the epoch.
    pub end_archive: AppendOnlyTreeSnapshot,
    /// The timestamp of the last block of the epoch.
    pub end_timestamp: Fr,
    /// The number of the last block of the epoch.
    pub end_block_number: Fr,
    /// The accumulated out hash of the epoch.
    pub out_hash: Fr,
    /// The fee recipients of the epoch, one slot per block. Unused slots are empty.
    pub fees: [FeeRecipient; MAX_EPOCH_DURATION],
    /// The root of the verification key tree.
    pub vk_tree_root: Fr,
    /// The root of the protocol contract tree.
    pub protocol_contract_tree_root: Fr,
    /// The identity of the prover.
    pub prover_id: Fr,
    /// The blob public inputs of the epoch, one slot per block. Unused slots are empty.
    pub blob_public_inputs: [BlockBlobPublicInputs; MAX_EPOCH_DURATION],
}

impl Default for RootRollupPublicInputs {
    fn default() -> Self {
        Self {
            previous_archive: Default::default(),
            end_archive: Default::default(),
            end_timestamp: Fr::ZERO,
            end_block_number: Fr::ZERO,
            out_hash: Fr::ZERO,
            fees: [FeeRecipient::empty(); MAX_EPOCH_DURATION],
            vk_tree_root: Fr::ZERO,
            protocol_contract_tree_root: Fr::ZERO,
            prover_id: Fr::ZERO,
            blob_public_inputs: [BlockBlobPublicInputs::empty(); MAX_EPOCH_DURATION],
        }
    }
}

impl RootRollupPublicInputs {
    /// The size of the public inputs in their buffer form.
    pub const SIZE_IN_BYTES: usize = <Self as BufferDecode>::MIN_ENCODED_LEN;

    /// Returns the end block number, if it fits a u64.
    pub fn end_block_number_u64(&self) -> Option<u64> {
        self.end_block_number.try_to_u64()
    }

    /// Returns the end timestamp, if it fits a u64.
    pub fn end_timestamp_u64(&self) -> Option<u64> {
        self.end_timestamp.try_to_u64()
    }

    /// Returns random public inputs with random fee entries and empty blob tables.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self {
            previous_archive: AppendOnlyTreeSnapshot::random(),
            end_archive: AppendOnlyTreeSnapshot::random(),
            end_timestamp: Fr::from(rand::random::<u32>()),
            end_block_number: Fr::from(rand::random::<u32>()),
            out_hash: Fr::random(),
            fees: core::array::from_fn(|_| FeeRecipient::random()),
            vk_tree_root: Fr::random(),
            protocol_contract_tree_root: Fr::random(),
            prover_id: Fr::random(),
            blob_public_inputs: [BlockBlobPublicInputs::empty(); MAX_EPOCH_DURATION],
        }
    }
}

impl BufferEncode for RootRollupPublicInputs {
    fn encode(&self, out: &mut Vec<u8>) {
        self.previous_archive.encode(out);
        self.end_archive.encode(out);
        self.end_timestamp.encode(out);
        self.end_block_number.encode(out);
        self.out_hash.encode(out);
        self.fees.encode(out);
        self.vk_tree_root.encode(out);
        self.protocol_contract_tree_root.encode(out);
        self.prover_id.encode(out);
        self.blob_public_inputs.encode(out);
    }
}

impl BufferDecode for RootRollupPublicInputs {
    const MIN_ENCODED_LEN: usize = 2 * AppendOnlyTreeSnapshot::SIZE_IN_BYTES +
        6 * Fr::SIZE_IN_BYTES +
        <[FeeRecipient; MAX_EPOCH_DURATION]>::MIN_ENCODED_LEN +
        <[BlockBlobPublicInputs; MAX_EPOCH_DURATION]>::MIN_ENCODED_LEN;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            previous_archive: AppendOnlyTreeSnapshot::decode(buf)?,
            end_archive: AppendOnlyTreeSnapshot::decode(buf)?,
            end_timestamp: Fr::decode(buf)?,
            end_block_number: Fr::decode(buf)?,
            out_hash: Fr::decode(buf)?,
            fees: BufferDecode::decode(buf)?,
            vk_tree_root: Fr::decode(buf)?,
            protocol_contract_tree_root: Fr::decode(buf)?,
            prover_id: Fr::decode(buf)?,
            blob_public_inputs: BufferDecode::decode(buf)?,
        })
    }
}

impl FieldEncode for RootRollupPublicInputs {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        self.previous_archive.encode_fields(out);
        self.end_archive.encode_fields(out);
        out.extend([self.end_timestamp, self.end_block_number, self.out_hash]);
        self.fees.encode_fields(out);
        out.extend([self.vk_tree_root, self.protocol_contract_tree_root, self.prover_id]);
        self.blob_public_inputs.encode_fields(out);
    }
}
