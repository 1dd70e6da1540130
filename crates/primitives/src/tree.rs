use rollup_codec::{BufferDecode, BufferEncode, CodecError, FieldEncode, Fr};

/// A snapshot of an append-only Merkle tree: its root and the index of the next free leaf.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppendOnlyTreeSnapshot {
    /// The root of the tree.
    pub root: Fr,
    /// The index of the next available leaf.
    pub next_available_leaf_index: u32,
}

impl AppendOnlyTreeSnapshot {
    /// The size of the snapshot in its buffer form.
    pub const SIZE_IN_BYTES: usize = Fr::SIZE_IN_BYTES + 4;

    /// Returns a new instance of [`AppendOnlyTreeSnapshot`].
    pub const fn new(root: Fr, next_available_leaf_index: u32) -> Self {
        Self { root, next_available_leaf_index }
    }

    /// Returns the snapshot of an empty tree.
    pub const fn empty() -> Self {
        Self::new(Fr::ZERO, 0)
    }

    /// Returns true if the snapshot is the empty snapshot.
    pub fn is_empty(&self) -> bool {
        self.root.is_zero() && self.next_available_leaf_index == 0
    }

    /// Returns a random snapshot.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random() -> Self {
        Self::new(Fr::random(), rand::random())
    }
}

impl BufferEncode for AppendOnlyTreeSnapshot {
    fn encode(&self, out: &mut Vec<u8>) {
        self.root.encode(out);
        self.next_available_leaf_index.encode(out);
    }
}

impl BufferDecode for AppendOnlyTreeSnapshot {
    const MIN_ENCODED_LEN: usize = Self::SIZE_IN_BYTES;

    fn decode(buf: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self { root: Fr::decode(buf)?, next_available_leaf_index: u32::decode(buf)? })
    }
}

impl FieldEncode for AppendOnlyTreeSnapshot {
    fn encode_fields(&self, out: &mut Vec<Fr>) {
        self.root.encode_fields(out);
        self.next_available_leaf_index.encode_fields(out);
    }
}
