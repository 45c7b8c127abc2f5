//! Loco-Bitset: fixed-capacity packed bit set
//!
//! [`FixedBitSet`] stores `N` bits in byte-aligned little-endian storage whose
//! size follows the block layout the game's records were laid out with. Code
//! that reinterprets raw record bytes must agree on that layout, so the block
//! selection rules are exposed as `const fn`s:
//!
//! 1. Round `N` up to a whole number of bytes.
//! 2. If that meets or exceeds the pointer width, blocks are pointer sized.
//! 3. Otherwise the block is the smallest of 1, 2, 4 or 8 bytes that covers it.
//!
//! ```text
//!   N     aligned  block  blocks  storage
//!   4        8       1      1       1
//!  14       16       2      1       2
//!  24       24       4      1       4
//!  33       40       8      1       8
//! 224      224       8      4      32     (64-bit target)
//! ```
//!
//! Bits at positions `>= N` inside the last block are always zero after any
//! bitwise operation, so equality, ordering and [`FixedBitSet::count`] never
//! observe stale high bits.
//!
//! # Usage
//!
//! ```
//! use loco_bitset::{FixedBitSet, storage_bytes};
//!
//! type Unlocked = FixedBitSet<224, { storage_bytes(224) }>;
//!
//! let mut set = Unlocked::from_indices(&[0, 3, 223]);
//! assert_eq!(set.count(), 3);
//! set.flip();
//! assert_eq!(set.count(), 221);
//! ```

mod bitset;
mod iter;

pub use bitset::FixedBitSet;
pub use iter::{BitMut, Iter, IterMut, Ones};

// =============================================================================
// Layout
// =============================================================================

/// Bits in one storage byte
pub const BITS_PER_BYTE: usize = 8;

/// Round a bit count up to a whole number of bytes (in bits).
pub const fn byte_align_bits(num_bits: usize) -> usize {
    num_bits.div_ceil(BITS_PER_BYTE) * BITS_PER_BYTE
}

/// Size in bytes of a single storage block for a set of `num_bits` bits.
pub const fn block_size(num_bits: usize) -> usize {
    let aligned = byte_align_bits(num_bits);
    if aligned >= usize::BITS as usize {
        return size_of::<usize>();
    }

    let num_bytes = aligned / BITS_PER_BYTE;
    let mut size = 1;
    while size < num_bytes {
        size <<= 1;
    }
    size
}

/// Number of storage blocks for a set of `num_bits` bits.
pub const fn block_count(num_bits: usize) -> usize {
    byte_align_bits(num_bits).div_ceil(block_size(num_bits) * BITS_PER_BYTE)
}

/// Total storage in bytes; the second const parameter of [`FixedBitSet`].
pub const fn storage_bytes(num_bits: usize) -> usize {
    block_count(num_bits) * block_size(num_bits)
}

// =============================================================================
// Error Type
// =============================================================================

/// Errors produced when parsing a bit string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBitSetError {
    /// The string does not contain exactly `N` characters
    WrongLength { expected: usize, found: usize },
    /// A character is neither the zero nor the one character
    InvalidChar { index: usize, ch: char },
}

impl core::fmt::Display for ParseBitSetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseBitSetError::WrongLength { expected, found } => {
                write!(f, "expected {} bit characters, found {}", expected, found)
            }
            ParseBitSetError::InvalidChar { index, ch } => {
                write!(f, "invalid bit character {:?} at position {}", ch, index)
            }
        }
    }
}

impl std::error::Error for ParseBitSetError {}
