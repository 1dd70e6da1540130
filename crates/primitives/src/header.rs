//! The L2 block header and its components.

use crate::AppendOnlyTreeSnapshot;
use alloy_primitives::{keccak256, Address, B256};
use rollup_codec::{BufferDecode, BufferEncode, CodecError, FieldEncode, Fr};

/// The fees paid per unit of gas in each dimension.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GasFees {
    /// The fee per unit of data availability gas.
    pub fee_per_da_gas: Fr,
    /// The fee per unit of L2 gas.
    pub fee_per_l2_gas: Fr,
}

impl BufferEncode for GasFees {
    fn encode(&self, out: &mut Vec<u8>) {
        self.fee_per_da_gas.encode(out);
        self.fee_per_l2_gas.encode(out);
    }
}

impl BufferDecode for GasFees {
    const MIN_ENCODED_LEN: usize = 2 * Fr::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self { fee_per_da_gas: Fr::decode(buf)?, fee_per_l2_gas: Fr::decode(buf)? })
    }
}

impl FieldEncode for GasFees {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        out.extend([self.fee_per_da_gas, self.fee_per_l2_gas]);
    }
}

/// The global variables a block is executed against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalVariables {
    /// The L2 chain id.
    pub chain_id: Fr,
    /// The rollup version.
    pub version: Fr,
    /// The block number.
    pub block_number: Fr,
    /// The slot the block was proposed in.
    pub slot_number: Fr,
    /// The block timestamp.
    pub timestamp: Fr,
    /// The L1 address receiving the block rewards.
    pub coinbase: Address,
    /// The L2 address receiving the block fees.
    pub fee_recipient: Fr,
    /// The gas fees of the block.
    pub gas_fees: GasFees,
}

impl GlobalVariables {
    /// Returns random global variables with small, realistic numeric values.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self {
            chain_id: Fr::from_u64(31337),
            version: Fr::ONE,
            block_number: Fr::from(rand::random::<u32>()),
            slot_number: Fr::from(rand::random::<u32>()),
            timestamp: Fr::from(rand::random::<u32>()),
            coinbase: Address::from(rand::random::<[u8; 20]>()),
            fee_recipient: Fr::random(),
            gas_fees: GasFees { fee_per_da_gas: Fr::random(), fee_per_l2_gas: Fr::random() },
        }
    }
}

impl BufferEncode for GlobalVariables {
    fn encode(&self, out: &mut Vec<u8>) {
        self.chain_id.encode(out);
        self.version.encode(out);
        self.block_number.encode(out);
        self.slot_number.encode(out);
        self.timestamp.encode(out);
        self.coinbase.encode(out);
        self.fee_recipient.encode(out);
        self.gas_fees.encode(out);
    }
}

impl BufferDecode for GlobalVariables {
    const MIN_ENCODED_LEN: usize = 8 * Fr::SIZE_IN_BYTES + 20;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            chain_id: Fr::decode(buf)?,
            version: Fr::decode(buf)?,
            block_number: Fr::decode(buf)?,
            slot_number: Fr::decode(buf)?,
            timestamp: Fr::decode(buf)?,
            coinbase: Address::decode(buf)?,
            fee_recipient: Fr::decode(buf)?,
            gas_fees: GasFees::decode(buf)?,
        })
    }
}

impl FieldEncode for GlobalVariables {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        out.extend([
            self.chain_id,
            self.version,
            self.block_number,
            self.slot_number,
            self.timestamp,
        ]);
        self.coinbase.encode_fields(out);
        self.fee_recipient.encode_fields(out);
        self.gas_fees.encode_fields(out);
    }
}

/// Commitments to the content of a block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentCommitment {
    /// The number of transactions in the block.
    pub num_txs: Fr,
    /// The hash of the blobs carrying the block's effects.
    pub blobs_hash: Fr,
    /// The hash of the L1 to L2 messages consumed by the block.
    pub in_hash: Fr,
    /// The hash of the L2 to L1 messages emitted by the block.
    pub out_hash: Fr,
}

impl BufferEncode for ContentCommitment {
    fn encode(&self, out: &mut Vec<u8>) {
        self.num_txs.encode(out);
        self.blobs_hash.encode(out);
        self.in_hash.encode(out);
        self.out_hash.encode(out);
    }
}

impl BufferDecode for ContentCommitment {
    const MIN_ENCODED_LEN: usize = 4 * Fr::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            num_txs: Fr::decode(buf)?,
            blobs_hash: Fr::decode(buf)?,
            in_hash: Fr::decode(buf)?,
            out_hash: Fr::decode(buf)?,
        })
    }
}

impl FieldEncode for ContentCommitment {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        out.extend([self.num_txs, self.blobs_hash, self.in_hash, self.out_hash]);
    }
}

/// The roots of the state trees after a block is applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateReference {
    /// The L1 to L2 message tree.
    pub l1_to_l2_message_tree: AppendOnlyTreeSnapshot,
    /// The note hash tree.
    pub note_hash_tree: AppendOnlyTreeSnapshot,
    /// The nullifier tree.
    pub nullifier_tree: AppendOnlyTreeSnapshot,
    /// The public data tree.
    pub public_data_tree: AppendOnlyTreeSnapshot,
}

impl BufferEncode for StateReference {
    fn encode(&self, out: &mut Vec<u8>) {
        self.l1_to_l2_message_tree.encode(out);
        self.note_hash_tree.encode(out);
        self.nullifier_tree.encode(out);
        self.public_data_tree.encode(out);
    }
}

impl BufferDecode for StateReference {
    const MIN_ENCODED_LEN: usize = 4 * AppendOnlyTreeSnapshot::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            l1_to_l2_message_tree: AppendOnlyTreeSnapshot::decode(buf)?,
            note_hash_tree: AppendOnlyTreeSnapshot::decode(buf)?,
            nullifier_tree: AppendOnlyTreeSnapshot::decode(buf)?,
            public_data_tree: AppendOnlyTreeSnapshot::decode(buf)?,
        })
    }
}

impl FieldEncode for StateReference {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        self.l1_to_l2_message_tree.encode_fields(out);
        self.note_hash_tree.encode_fields(out);
        self.nullifier_tree.encode_fields(out);
        self.public_data_tree.encode_fields(out);
    }
}

/// The header of an L2 block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHeader {
    /// The archive tree before this block was added.
    pub last_archive: AppendOnlyTreeSnapshot,
    /// Commitments to the block content.
    pub content_commitment: ContentCommitment,
    /// The state after the block is applied.
    pub state: StateReference,
    /// The global variables of the block.
    pub global_variables: GlobalVariables,
    /// The total fees paid in the block.
    pub total_fees: Fr,
    /// The total mana used by the block.
    pub total_mana_used: Fr,
}

impl BlockHeader {
    /// Returns the empty header.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the keccak hash of the header's buffer encoding.
    pub fn hash_slow(&self) -> B256 {
        keccak256(self.to_buffer())
    }

    /// Returns a random header.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self {
            last_archive: AppendOnlyTreeSnapshot::random(),
            content_commitment: ContentCommitment {
                num_txs: Fr::from(rand::random::<u8>() as u32),
                blobs_hash: Fr::random(),
                in_hash: Fr::random(),
                out_hash: Fr::random(),
            },
            state: StateReference {
                l1_to_l2_message_tree: AppendOnlyTreeSnapshot::random(),
                note_hash_tree: AppendOnlyTreeSnapshot::random(),
                nullifier_tree: AppendOnlyTreeSnapshot::random(),
                public_data_tree: AppendOnlyTreeSnapshot::random(),
            },
            global_variables: GlobalVariables::random(),
            total_fees: Fr::random(),
            total_mana_used: Fr::random(),
        }
    }
}

impl BufferEncode for BlockHeader {
    fn encode(&self, out: &mut Vec<u8>) {
        self.last_archive.encode(out);
        self.content_commitment.encode(out);
        self.state.encode(out);
        self.global_variables.encode(out);
        self.total_fees.encode(out);
        self.total_mana_used.encode(out);
    }
}

impl BufferDecode for BlockHeader {
    const MIN_ENCODED_LEN: usize = AppendOnlyTreeSnapshot::SIZE_IN_BYTES +
        ContentCommitment::MIN_ENCODED_LEN +
        StateReference::MIN_ENCODED_LEN +
        GlobalVariables::MIN_ENCODED_LEN +
        2 * Fr::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            last_archive: AppendOnlyTreeSnapshot::decode(buf)?,
            content_commitment: ContentCommitment::decode(buf)?,
            state: StateReference::decode(buf)?,
            global_variables: GlobalVariables::decode(buf)?,
            total_fees: Fr::decode(buf)?,
            total_mana_used: Fr::decode(buf)?,
        })
    }
}

impl FieldEncode for BlockHeader {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        self.last_archive.encode_fields(out);
        self.content_commitment.encode_fields(out);
        self.state.encode_fields(out);
        self.global_variables.encode_fields(out);
        out.extend([self.total_fees, self.total_mana_used]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let header = BlockHeader::random();
        let buf = header.to_buffer();

        assert_eq!(buf.len(), BlockHeader::MIN_ENCODED_LEN);
        assert_eq!(BlockHeader::from_buffer(&buf).unwrap(), header);
        assert_eq!(BlockHeader::from_hex_string(&header.to_hex_string()).unwrap(), header);
    }

    #[test]
    fn test_header_field_count() {
        // snapshot (2) + content commitment (4) + state (8) + globals (9) + fees (2)
        assert_eq!(BlockHeader::random().to_fields().len(), 25);
    }

    #[test]
    fn test_header_hash_changes_with_content() {
        let header = BlockHeader::random();
        let mut other = header;
        other.total_fees = Fr::from_u64(1);
        if other == header {
            other.total_fees = Fr::from_u64(2);
        }
        assert_ne!(header.hash_slow(), other.hash_slow());
        assert_eq!(header.hash_slow(), header.hash_slow());
    }

    #[test]
    fn test_truncated_header() {
        let buf = BlockHeader::random().to_buffer();
        let err = BlockHeader::from_buffer(&buf[..buf.len() - 1]).unwrap_err();
        assert!(err.is_truncated());
    }
}
