use alloy_primitives::Address;
use rollup_codec::{BufferDecode, BufferEncode, CodecError, FieldEncode, Fr};

/// An L1 address and the fees it is owed for the blocks of an epoch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeRecipient {
    /// The recipient of the fees.
    pub recipient: Address,
    /// The amount owed.
    pub value: Fr,
}

impl FeeRecipient {
    /// Returns a new instance of [`FeeRecipient`].
    pub const fn new(recipient: Address, value: Fr) -> Self {
        Self { recipient, value }
    }

    /// Returns the empty entry used to pad unused table slots.
    pub const fn empty() -> Self {
        Self::new(Address::ZERO, Fr::ZERO)
    }

    /// Returns true if the entry is the empty entry.
    pub fn is_empty(&self) -> bool {
        self.recipient.is_zero() && self.value.is_zero()
    }

    /// Returns a random entry.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self::new(Address::from(rand::random::<[u8; 20]>()), Fr::random())
    }
}

impl BufferEncode for FeeRecipient {
    fn encode(&self, out: &mut Vec<u8>) {
        self.recipient.encode(out);
        self.value.encode(out);
    }
}

impl BufferDecode for FeeRecipient {
    const MIN_ENCODED_LEN: usize = 20 + Fr::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self { recipient: Address::decode(buf)?, value: Fr::decode(buf)? })
    }
}

impl FieldEncode for FeeRecipient {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        self.recipient.encode_fields(out);
        self.value.encode_fields(out);
    }
}
