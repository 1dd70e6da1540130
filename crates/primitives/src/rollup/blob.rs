use crate::constants::{BLOBS_PER_BLOCK, BLS12_LIMB_BITS};
use alloy_primitives::{B256, U256};
use rollup_codec::{BufferDecode, BufferEncode, CodecError, FieldEncode, Fr};

/// The public inputs of a blob opening: the challenge `z`, the evaluation `y` and the KZG
/// commitment to the blob.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobPublicInputs {
    /// The challenge point.
    pub z: Fr,
    /// The evaluation at `z`. A BLS12-381 scalar, wider than [`Fr`].
    pub y: U256,
    /// The KZG commitment, compressed into two field elements.
    pub kzg_commitment: [Fr; 2],
}

impl BlobPublicInputs {
    /// The size of the public inputs in their buffer form.
    pub const SIZE_IN_BYTES: usize = 4 * Fr::SIZE_IN_BYTES;

    /// Returns the empty public inputs.
    pub const fn empty() -> Self {
        Self { z: Fr::ZERO, y: U256::ZERO, kzg_commitment: [Fr::ZERO; 2] }
    }

    /// Returns true if these are the empty public inputs.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Returns `y` split into 120 bit limbs, least significant first.
    pub fn y_limbs(&self) -> [Fr; 3] {
        let mask = (U256::from(1) << BLS12_LIMB_BITS) - U256::from(1);
        core::array::from_fn(|i| Fr::reduce((self.y >> (i * BLS12_LIMB_BITS)) & mask))
    }

    /// Returns random public inputs.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self {
            z: Fr::random(),
            y: U256::from_be_bytes(rand::random::<[u8; 32]>()),
            kzg_commitment: [Fr::random(), Fr::random()],
        }
    }
}

impl BufferEncode for BlobPublicInputs {
    fn encode(&self, out: &mut Vec<u8>) {
        self.z.encode(out);
        B256::from(self.y).encode(out);
        self.kzg_commitment.encode(out);
    }
}

impl BufferDecode for BlobPublicInputs {
    const MIN_ENCODED_LEN: usize = Self::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            z: Fr::decode(buf)?,
            y: B256::decode(buf)?.into(),
            kzg_commitment: <[Fr; 2]>::decode(buf)?,
        })
    }
}

impl FieldEncode for BlobPublicInputs {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        self.z.encode_fields(out);
        out.extend(self.y_limbs());
        self.kzg_commitment.encode_fields(out);
    }
}

/// The blob public inputs of every blob a block may publish.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockBlobPublicInputs {
    /// The per-blob inputs. Unused blobs hold the empty inputs.
    pub inner: [BlobPublicInputs; BLOBS_PER_BLOCK],
}

impl BlockBlobPublicInputs {
    /// Returns the empty table.
    pub const fn empty() -> Self {
        Self { inner: [BlobPublicInputs::empty(); BLOBS_PER_BLOCK] }
    }

    /// Returns true if every entry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.iter().all(BlobPublicInputs::is_empty)
    }
}

impl BufferEncode for BlockBlobPublicInputs {
    fn encode(&self, out: &mut Vec<u8>) {
        self.inner.encode(out);
    }
}

impl BufferDecode for BlockBlobPublicInputs {
    const MIN_ENCODED_LEN: usize = BLOBS_PER_BLOCK * BlobPublicInputs::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self { inner: BufferDecode::decode(buf)? })
    }
}

impl FieldEncode for BlockBlobPublicInputs {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        self.inner.encode_fields(out);
    }
}
