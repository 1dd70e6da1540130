//! Protocol constants shared by the consensus types.

/// The maximum number of L2 blocks in an epoch. Bounds the fee recipient and blob tables of the
/// rollup public inputs.
pub const MAX_EPOCH_DURATION: usize = 48;

/// The number of blobs a single block may publish.
pub const BLOBS_PER_BLOCK: usize = 3;

/// The height of the verification key tree.
pub const VK_TREE_HEIGHT: usize = 6;

/// The number of bits in each limb of a BLS12-381 scalar in field form.
pub const BLS12_LIMB_BITS: usize = 120;
