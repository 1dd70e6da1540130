//! Buffer and field encoding traits and their implementations for the leaf types.

use crate::{from_be_bytes_slice_and_advance_buf, from_slice_and_advance_buf, CodecError, Fr};
use alloy_primitives::{bytes::BufMut, hex, Address, B256};

/// Values that implement the trait can be written to the canonical byte buffer.
pub trait BufferEncode {
    /// Appends the canonical encoding of the value to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Returns the canonical buffer encoding of the value.
    fn to_buffer(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }

    /// Returns the `0x` prefixed lowercase hex encoding of [`BufferEncode::to_buffer`].
    fn to_hex_string(&self) -> String {
        hex::encode_prefixed(self.to_buffer())
    }
}

/// Values that implement the trait can be read back from the canonical byte buffer.
pub trait BufferDecode: Sized {
    /// The minimum number of bytes an encoded value occupies. Used to reject length prefixes
    /// that cannot be satisfied by the remaining input.
    const MIN_ENCODED_LEN: usize = 1;

    /// Reads a value from the front of the buffer and advances it.
    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError>;

    /// Decodes a value from the front of `bytes`. Trailing bytes are ignored.
    fn from_buffer(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut buf = bytes;
        Self::decode(&mut buf)
    }

    /// Decodes a value from a hex string, with or without the `0x` prefix.
    fn from_hex_string(s: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(s)?;
        Self::from_buffer(&bytes)
    }
}

/// Values that implement the trait can be flattened into field elements for the proof system.
pub trait FieldEncode {
    /// Appends the field representation of the value to `out`.
    fn encode_fields(&self, out: &mut Vec<Fr>);

    /// Returns the field representation of the value.
    fn to_fields(&self) -> Vec<Fr> {
        let mut out = Vec::new();
        self.encode_fields(&mut out);
        out
    }
}

/// Returns [`CodecError::TruncatedInput`] if the buffer holds less than `needed` bytes.
#[inline]
pub fn ensure_remaining(buf: &[u8], needed: usize) -> Result<(), CodecError> {
    if buf.len() < needed {
        return Err(CodecError::TruncatedInput { needed, remaining: buf.len() })
    }
    Ok(())
}

/// Writes the u32 big-endian element count used as the sequence prefix.
///
/// # Panics
///
/// Panics if `len` exceeds `u32::MAX`, which cannot be represented on the wire.
pub fn encode_len(len: usize, out: &mut Vec<u8>) {
    let Ok(len) = u32::try_from(len) else {
        panic!("sequence of {len} elements exceeds the u32 length prefix")
    };
    out.put_u32(len);
}

/// Reads a sequence prefix and checks the remaining input can hold `count` elements of at least
/// `min_len` bytes each.
pub fn decode_len(buf: &mut &[u8], min_len: usize) -> Result<usize, CodecError> {
    let count = u32::decode(buf)? as usize;
    let required = count.checked_mul(min_len.max(1));
    if required.is_none_or(|required| required > buf.len()) {
        return Err(CodecError::MalformedLength { declared: count as u64, remaining: buf.len() })
    }
    Ok(count)
}

impl BufferEncode for u32 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.put_u32(*self);
    }
}

impl BufferDecode for u32 {
    const MIN_ENCODED_LEN: usize = 4;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        ensure_remaining(buf, Self::MIN_ENCODED_LEN)?;
        Ok(from_be_bytes_slice_and_advance_buf!(u32, buf))
    }
}

impl FieldEncode for u32 {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        out.push(Fr::from(*self));
    }
}

impl BufferEncode for u64 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.put_u64(*self);
    }
}

impl BufferDecode for u64 {
    const MIN_ENCODED_LEN: usize = 8;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        ensure_remaining(buf, Self::MIN_ENCODED_LEN)?;
        Ok(from_be_bytes_slice_and_advance_buf!(u64, buf))
    }
}

impl BufferEncode for B256 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.put_slice(self.as_slice());
    }
}

impl BufferDecode for B256 {
    const MIN_ENCODED_LEN: usize = 32;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        ensure_remaining(buf, Self::MIN_ENCODED_LEN)?;
        Ok(from_slice_and_advance_buf!(B256, buf))
    }
}

impl BufferEncode for Address {
    fn encode(&self, out: &mut Vec<u8>) {
        out.put_slice(self.as_slice());
    }
}

impl BufferDecode for Address {
    const MIN_ENCODED_LEN: usize = 20;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        ensure_remaining(buf, Self::MIN_ENCODED_LEN)?;
        let address = Self::from_slice(&buf[..Self::MIN_ENCODED_LEN]);
        *buf = &buf[Self::MIN_ENCODED_LEN..];
        Ok(address)
    }
}

impl FieldEncode for Address {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        out.push(Fr::from(*self));
    }
}

impl<T: BufferEncode> BufferEncode for Vec<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        encode_len(self.len(), out);
        for item in self {
            item.encode(out);
        }
    }
}

impl<T: BufferDecode> BufferDecode for Vec<T> {
    const MIN_ENCODED_LEN: usize = 4;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        let count = decode_len(buf, T::MIN_ENCODED_LEN)?;
        (0..count).map(|_| T::decode(buf)).collect()
    }
}

impl<T: BufferEncode, const N: usize> BufferEncode for [T; N] {
    fn encode(&self, out: &mut Vec<u8>) {
        for item in self {
            item.encode(out);
        }
    }
}

impl<T: BufferDecode, const N: usize> BufferDecode for [T; N] {
    const MIN_ENCODED_LEN: usize = N * T::MIN_ENCODED_LEN;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        let items = (0..N).map(|_| T::decode(buf)).collect::<Result<Vec<_>, _>>()?;
        Ok(items.try_into().unwrap_or_else(|_| unreachable!("collected exactly N items")))
    }
}

impl<T: FieldEncode, const N: usize> FieldEncode for [T; N] {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        for item in self {
            item.encode_fields(out);
        }
    }
}
