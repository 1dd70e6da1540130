//! The payload validators sign to propose or attest to a block.

use crate::{BlockHeader, TxHash};
use alloy_primitives::{keccak256, Bytes, B256, U256};
use alloy_sol_types::{sol_data, SolType};
use rollup_codec::{BufferDecode, BufferEncode, CodecError, Fr};
use std::sync::OnceLock;

/// Tags the context a consensus payload is signed in, so a signature for one context cannot be
/// replayed in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureDomainSeparator {
    /// The payload is signed by the proposer of the block.
    BlockProposal = 0,
    /// The payload is signed by a committee member attesting to the block.
    BlockAttestation = 1,
}

impl From<SignatureDomainSeparator> for u8 {
    fn from(value: SignatureDomainSeparator) -> Self {
        value as Self
    }
}

/// The data a validator attests to: the block header, the archive root after the block and the
/// ordered transaction hashes of the block.
///
/// The payload has two distinct encodings: [`BufferEncode::to_buffer`] for transport and
/// [`ConsensusPayload::payload_to_sign`] for signing, which is verified on L1.
#[derive(Debug, Clone)]
pub struct ConsensusPayload {
    header: BlockHeader,
    archive: Fr,
    tx_hashes: Vec<TxHash>,
    /// The lazily computed size of the buffer encoding.
    size: OnceLock<usize>,
}

impl ConsensusPayload {
    /// Returns a new instance of [`ConsensusPayload`].
    pub const fn new(header: BlockHeader, archive: Fr, tx_hashes: Vec<TxHash>) -> Self {
        Self { header, archive, tx_hashes, size: OnceLock::new() }
    }

    /// Returns the payload for the empty block.
    pub fn empty() -> Self {
        Self::new(BlockHeader::empty(), Fr::ZERO, Vec::new())
    }

    /// Returns the block header.
    pub const fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Returns the archive root after the block is applied.
    pub const fn archive(&self) -> Fr {
        self.archive
    }

    /// Returns the transaction hashes in execution order.
    pub fn tx_hashes(&self) -> &[TxHash] {
        &self.tx_hashes
    }

    /// Returns the ABI encoding of
    /// `(uint8, (bytes32 archive, uint256[1] reserved, bytes header, bytes32[] txHashes))`.
    ///
    /// The layout is reconstructed by the L1 signature verifier and must not change. The
    /// reserved slot is always `[0]`.
    pub fn payload_to_sign(&self, domain_separator: SignatureDomainSeparator) -> Vec<u8> {
        let tx_hashes = self.tx_hashes.iter().map(|hash| hash.0).collect::<Vec<B256>>();
        let reserved = [U256::ZERO; 1];
        <(
            sol_data::Uint<8>,
            (
                sol_data::FixedBytes<32>,
                sol_data::FixedArray<sol_data::Uint<256>, 1>,
                sol_data::Bytes,
                sol_data::Array<sol_data::FixedBytes<32>>,
            ),
        )>::abi_encode_params(&(
            u8::from(domain_separator),
            (self.archive.to_b256(), reserved, Bytes::from(self.header.to_buffer()), tx_hashes),
        ))
    }

    /// Returns the keccak digest of [`ConsensusPayload::payload_to_sign`].
    pub fn signature_digest(&self, domain_separator: SignatureDomainSeparator) -> B256 {
        keccak256(self.payload_to_sign(domain_separator))
    }

    /// Returns the size in bytes of the buffer encoding. Computed once.
    pub fn size(&self) -> usize {
        *self.size.get_or_init(|| self.to_buffer().len())
    }

    /// Returns a random payload with `num_txs` transactions.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random(num_txs: usize) -> Self {
        Self::new(
            BlockHeader::random(),
            Fr::random(),
            (0..num_txs).map(|_| TxHash::random()).collect(),
        )
    }
}

impl PartialEq for ConsensusPayload {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header &&
            self.archive == other.archive &&
            self.tx_hashes == other.tx_hashes
    }
}

impl Eq for ConsensusPayload {}

impl BufferEncode for ConsensusPayload {
    fn encode(&self, out: &mut Vec<u8>) {
        self.header.encode(out);
        self.archive.encode(out);
        self.tx_hashes.encode(out);
    }
}

impl BufferDecode for ConsensusPayload {
    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self::new(BlockHeader::decode(buf)?, Fr::decode(buf)?, Vec::<TxHash>::decode(buf)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(encoded: &[u8], index: usize) -> &[u8] {
        &encoded[index * 32..(index + 1) * 32]
    }

    #[test]
    fn test_payload_round_trip() {
        let payload = ConsensusPayload::random(3);
        let buf = payload.to_buffer();

        assert_eq!(ConsensusPayload::from_buffer(&buf).unwrap(), payload);
        assert_eq!(ConsensusPayload::from_hex_string(&payload.to_hex_string()).unwrap(), payload);
    }

    #[test]
    fn test_payload_buffer_layout() {
        let payload = ConsensusPayload::random(2);
        let buf = payload.to_buffer();
        let header_len = BlockHeader::MIN_ENCODED_LEN;

        assert_eq!(&buf[..header_len], payload.header().to_buffer().as_slice());
        assert_eq!(&buf[header_len..header_len + 32], payload.archive().to_b256().as_slice());
        assert_eq!(&buf[header_len + 32..header_len + 36], &[0, 0, 0, 2]);
        assert_eq!(&buf[header_len + 36..header_len + 68], payload.tx_hashes()[0].as_slice());
        assert_eq!(buf.len(), header_len + 36 + 2 * 32);
    }

    #[test]
    fn test_empty_payload_round_trip() {
        let payload = ConsensusPayload::empty();
        assert_eq!(ConsensusPayload::from_buffer(&payload.to_buffer()).unwrap(), payload);
        assert!(payload.tx_hashes().is_empty());
    }

    #[test]
    fn test_size_is_memoized() {
        let payload = ConsensusPayload::random(5);
        let first = payload.size();
        let second = payload.size();

        assert_eq!(first, second);
        assert_eq!(first, payload.to_buffer().len());
    }

    #[test]
    fn test_malformed_tx_count() {
        let payload = ConsensusPayload::random(1);
        let mut buf = payload.to_buffer();
        let count_offset = BlockHeader::MIN_ENCODED_LEN + 32;
        buf[count_offset + 3] = 9;

        let err = ConsensusPayload::from_buffer(&buf).unwrap_err();
        assert!(matches!(err, CodecError::MalformedLength { declared: 9, remaining: 32 }));
    }

    #[test]
    fn test_payload_to_sign_layout() {
        let payload = ConsensusPayload::random(2);
        let encoded = payload.payload_to_sign(SignatureDomainSeparator::BlockAttestation);
        let header = payload.header().to_buffer();

        // the domain separator followed by the offset of the dynamic tuple.
        assert_eq!(word(&encoded, 0), U256::from(1).to_be_bytes::<32>().as_slice());
        assert_eq!(word(&encoded, 1), U256::from(0x40).to_be_bytes::<32>().as_slice());
        // tuple head: archive, reserved zero, offset of the header bytes, offset of the hashes.
        assert_eq!(word(&encoded, 2), payload.archive().to_b256().as_slice());
        assert_eq!(word(&encoded, 3), [0u8; 32].as_slice());
        assert_eq!(word(&encoded, 4), U256::from(0x80).to_be_bytes::<32>().as_slice());
        let hashes_offset = 0x80 + 32 + header.len().div_ceil(32) * 32;
        assert_eq!(word(&encoded, 5), U256::from(hashes_offset).to_be_bytes::<32>().as_slice());
        // header bytes: length then data.
        assert_eq!(word(&encoded, 6), U256::from(header.len()).to_be_bytes::<32>().as_slice());
        assert_eq!(&encoded[7 * 32..7 * 32 + header.len()], header.as_slice());
        // tx hashes: length then each hash.
        let array_start = 64 + hashes_offset;
        assert_eq!(
            &encoded[array_start..array_start + 32],
            U256::from(2).to_be_bytes::<32>().as_slice()
        );
        assert_eq!(
            &encoded[array_start + 32..array_start + 64],
            payload.tx_hashes()[0].as_slice()
        );
        assert_eq!(encoded.len(), array_start + 3 * 32);
    }

    #[test]
    fn test_payload_to_sign_is_deterministic() {
        let payload = ConsensusPayload::random(4);
        let copy = ConsensusPayload::from_buffer(&payload.to_buffer()).unwrap();

        for domain in
            [SignatureDomainSeparator::BlockProposal, SignatureDomainSeparator::BlockAttestation]
        {
            assert_eq!(payload.payload_to_sign(domain), copy.payload_to_sign(domain));
        }
        assert_ne!(
            payload.payload_to_sign(SignatureDomainSeparator::BlockProposal),
            payload.payload_to_sign(SignatureDomainSeparator::BlockAttestation)
        );
    }

    #[test]
    fn test_payload_to_sign_changes_with_any_tx_hash() {
        let payload = ConsensusPayload::random(3);
        let domain = SignatureDomainSeparator::BlockAttestation;
        let original = payload.payload_to_sign(domain);

        for i in 0..payload.tx_hashes().len() {
            let mut tx_hashes = payload.tx_hashes().to_vec();
            tx_hashes[i] = TxHash::new(!tx_hashes[i].0);
            let changed = ConsensusPayload::new(*payload.header(), payload.archive(), tx_hashes);
            assert_ne!(changed.payload_to_sign(domain), original);
        }
    }

    #[test]
    fn test_signing_and_buffer_encodings_differ() {
        let payload = ConsensusPayload::random(1);
        let to_sign = payload.payload_to_sign(SignatureDomainSeparator::BlockProposal);
        assert_ne!(to_sign, payload.to_buffer());
    }
}
