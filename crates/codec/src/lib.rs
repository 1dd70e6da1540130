//! The canonical codec for consensus objects crossing a trust boundary.
//!
//! Every object has up to three deterministic representations:
//! - a byte buffer, where sequences carry a u32 big-endian count prefix and fixed-arity tables
//!   are written element by element;
//! - a list of BN254 field elements, for types consumed by the proof system;
//! - a `0x` prefixed lowercase hex string of the buffer form.

pub use encoding::{
    decode_len, encode_len, ensure_remaining, BufferDecode, BufferEncode, FieldEncode,
};
mod encoding;

pub use error::CodecError;
mod error;

pub use field::{Fr, MODULUS};
mod field;

mod macros;
