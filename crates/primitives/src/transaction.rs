use alloy_primitives::B256;
use rollup_codec::{BufferDecode, BufferEncode, CodecError};

/// The identifier of an L2 transaction.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::From,
    derive_more::Deref,
    derive_more::Display,
)]
pub struct TxHash(pub B256);

impl TxHash {
    /// The size of a transaction hash in its buffer form.
    pub const SIZE_IN_BYTES: usize = 32;

    /// Returns a new instance of [`TxHash`].
    pub const fn new(hash: B256) -> Self {
        Self(hash)
    }

    /// Returns a random transaction hash.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self(B256::from(rand::random::<[u8; 32]>()))
    }
}

impl BufferEncode for TxHash {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }
}

impl BufferDecode for TxHash {
    const MIN_ENCODED_LEN: usize = Self::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        B256::decode(buf).map(Self)
    }
}
