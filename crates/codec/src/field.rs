//! The BN254 scalar field element used by the proof system.

use crate::{BufferDecode, BufferEncode, CodecError, FieldEncode};
use alloy_primitives::{bytes::BufMut, Address, B256, U256};
use core::{fmt, str::FromStr};

/// The BN254 scalar field modulus.
pub const MODULUS: U256 = U256::from_limbs([
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

/// An element of the BN254 scalar field, stored in canonical (reduced) form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fr(U256);

impl Fr {
    /// The zero element.
    pub const ZERO: Self = Self(U256::ZERO);

    /// The one element.
    pub const ONE: Self = Self(U256::from_limbs([1, 0, 0, 0]));

    /// The size of a field element in its buffer form.
    pub const SIZE_IN_BYTES: usize = 32;

    /// Returns a field element from a value, failing if the value is not below the modulus.
    pub fn new(value: U256) -> Result<Self, CodecError> {
        if value >= MODULUS {
            return Err(CodecError::NonCanonicalField(value))
        }
        Ok(Self(value))
    }

    /// Returns the field element for the provided u64.
    pub const fn from_u64(value: u64) -> Self {
        Self(U256::from_limbs([value, 0, 0, 0]))
    }

    /// Reduces an arbitrary 256-bit value into the field.
    pub fn reduce(value: U256) -> Self {
        Self(value.reduce_mod(MODULUS))
    }

    /// Returns the underlying integer.
    pub const fn as_u256(&self) -> &U256 {
        &self.0
    }

    /// Returns the big-endian 32-byte representation.
    pub fn to_b256(&self) -> B256 {
        B256::from(self.0)
    }

    /// Returns the value as a u64 if it fits.
    pub fn try_to_u64(&self) -> Option<u64> {
        self.0.try_into().ok()
    }

    /// Returns true if the element is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns a random field element.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self::reduce(U256::from_be_bytes(rand::random::<[u8; 32]>()))
    }
}

impl From<u64> for Fr {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<u32> for Fr {
    fn from(value: u32) -> Self {
        Self::from_u64(value as u64)
    }
}

impl From<bool> for Fr {
    fn from(value: bool) -> Self {
        Self::from_u64(value as u64)
    }
}

impl From<Address> for Fr {
    fn from(value: Address) -> Self {
        // 160 bits always fit below the modulus.
        Self(U256::from_be_slice(value.as_slice()))
    }
}

impl TryFrom<B256> for Fr {
    type Error = CodecError;

    fn try_from(value: B256) -> Result<Self, Self::Error> {
        Self::new(value.into())
    }
}

impl From<Fr> for U256 {
    fn from(value: Fr) -> Self {
        value.0
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_b256())
    }
}

impl FromStr for Fr {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = B256::from_str(s)?;
        Self::try_from(bytes)
    }
}

impl BufferEncode for Fr {
    fn encode(&self, out: &mut Vec<u8>) {
        out.put_slice(&self.0.to_be_bytes::<32>());
    }
}

impl BufferDecode for Fr {
    const MIN_ENCODED_LEN: usize = Self::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        crate::ensure_remaining(buf, Self::SIZE_IN_BYTES)?;
        let value = crate::from_slice_and_advance_buf!(B256, buf);
        Self::try_from(value)
    }
}

impl FieldEncode for Fr {
    fn encode_fields(&self, out: &mut Vec<Self>) {
        out.push(*self);
    }
}
