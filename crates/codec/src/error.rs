use alloy_primitives::{hex::FromHexError, U256};

/// An error occurring while decoding a canonical encoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The buffer ended before the value was fully read.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// The number of bytes required to read the next value.
        needed: usize,
        /// The number of bytes left in the buffer.
        remaining: usize,
    },
    /// A length prefix declares more elements than the remaining bytes can hold.
    #[error("malformed length prefix: {declared} elements declared, {remaining} bytes remaining")]
    MalformedLength {
        /// The element count read from the prefix.
        declared: u64,
        /// The number of bytes left in the buffer after the prefix.
        remaining: usize,
    },
    /// A 32-byte value that does not reduce below the field modulus.
    #[error("value {0} is not a canonical field element")]
    NonCanonicalField(U256),
    /// The string is not valid hex.
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] FromHexError),
}

impl CodecError {
    /// Returns true if the error is caused by a short buffer.
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
