use core::cmp::Ordering;
use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Index, Not};
use core::str::FromStr;

use crate::iter::{BitMut, Iter, IterMut, Ones};
use crate::{BITS_PER_BYTE, ParseBitSetError, block_count, block_size, storage_bytes};

/// Packed set of bit positions `0..N`.
///
/// `BYTES` must equal [`storage_bytes(N)`](crate::storage_bytes); a mismatch
/// fails to compile as soon as a set is constructed. Write the type as
/// `FixedBitSet<N, { storage_bytes(N) }>`.
///
/// Bit `i` lives in byte `i / 8`, bit `i % 8`, which is the same position it
/// occupies inside a little-endian storage block of any width.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBitSet<const N: usize, const BYTES: usize> {
    bytes: [u8; BYTES],
}

impl<const N: usize, const BYTES: usize> FixedBitSet<N, BYTES> {
    const LAYOUT: () = assert!(
        BYTES == storage_bytes(N),
        "FixedBitSet storage does not match the block layout for N bits"
    );

    /// Width of one storage block in bytes
    pub const BLOCK_SIZE: usize = block_size(N);

    /// Number of storage blocks
    pub const BLOCK_COUNT: usize = block_count(N);

    /// Bytes needed to hold `N` bits without block padding
    pub const WIRE_BYTES: usize = N.div_ceil(BITS_PER_BYTE);

    const REQUIRES_TRIM: bool = N != BYTES * BITS_PER_BYTE;

    /// Create a set with every bit clear.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT;
        Self { bytes: [0; BYTES] }
    }

    /// Create a set with the given positions set.
    pub fn from_indices(indices: &[usize]) -> Self {
        indices.iter().copied().collect()
    }

    /// Build a set from little-endian record bytes.
    ///
    /// Reads at most [`Self::WIRE_BYTES`] bytes; missing bytes read as zero and
    /// bits beyond `N` are discarded.
    pub fn from_le_bytes(src: &[u8]) -> Self {
        let mut set = Self::new();
        let len = src.len().min(Self::WIRE_BYTES);
        set.bytes[..len].copy_from_slice(&src[..len]);
        set.trim();
        set
    }

    /// The `N` bits as little-endian record bytes, without block padding.
    pub fn wire_bytes(&self) -> &[u8] {
        &self.bytes[..Self::WIRE_BYTES]
    }

    /// Raw storage including block padding.
    pub fn as_bytes(&self) -> &[u8; BYTES] {
        &self.bytes
    }

    /// Number of addressable bits (`N`).
    pub const fn size(&self) -> usize {
        N
    }

    /// Number of bits the storage could hold.
    pub const fn capacity(&self) -> usize {
        BYTES * BITS_PER_BYTE
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < N, "bit index {} out of range for {} bits", index, N);
        self.bytes[index / BITS_PER_BYTE] & (1 << (index % BITS_PER_BYTE)) != 0
    }

    pub fn set(&mut self, index: usize, value: bool) -> &mut Self {
        debug_assert!(index < N, "bit index {} out of range for {} bits", index, N);
        let mask = 1u8 << (index % BITS_PER_BYTE);
        let byte = &mut self.bytes[index / BITS_PER_BYTE];
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        self
    }

    /// Proxy to a single bit, for assignment through a reference.
    pub fn bit_mut(&mut self, index: usize) -> BitMut<'_> {
        debug_assert!(index < N, "bit index {} out of range for {} bits", index, N);
        BitMut::new(
            core::cell::Cell::from_mut(&mut self.bytes[index / BITS_PER_BYTE]),
            index % BITS_PER_BYTE,
        )
    }

    /// Invert every bit.
    pub fn flip(&mut self) -> &mut Self {
        for byte in &mut self.bytes {
            *byte = !*byte;
        }
        self.trim();
        self
    }

    /// Clear every bit.
    pub fn reset(&mut self) -> &mut Self {
        self.bytes = [0; BYTES];
        self
    }

    pub fn iter(&self) -> Iter<'_, N, BYTES> {
        Iter::new(self)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut::new(core::cell::Cell::from_mut(&mut self.bytes[..]).as_slice_of_cells(), N)
    }

    /// Positions of the set bits in ascending order.
    pub fn ones(&self) -> Ones<'_, N, BYTES> {
        Ones::new(self)
    }

    /// Render bit `N - 1` first using the given characters.
    pub fn to_string_with(&self, zero: char, one: char) -> String {
        (0..N)
            .rev()
            .map(|i| if self.get(i) { one } else { zero })
            .collect()
    }

    /// Parse the output of [`Self::to_string_with`].
    pub fn parse_with(s: &str, zero: char, one: char) -> Result<Self, ParseBitSetError> {
        let found = s.chars().count();
        if found != N {
            return Err(ParseBitSetError::WrongLength { expected: N, found });
        }

        let mut set = Self::new();
        for (index, ch) in s.chars().enumerate() {
            let bit = N - 1 - index;
            if ch == one {
                set.set(bit, true);
            } else if ch != zero {
                return Err(ParseBitSetError::InvalidChar { index, ch });
            }
        }
        Ok(set)
    }

    /// Value of storage block `index` as an unsigned integer.
    fn block(&self, index: usize) -> u64 {
        let start = index * Self::BLOCK_SIZE;
        self.bytes[start..start + Self::BLOCK_SIZE]
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }

    /// Clear the bits at positions `>= N`.
    fn trim(&mut self) {
        if !Self::REQUIRES_TRIM {
            return;
        }

        let mut start = N / BITS_PER_BYTE;
        let rem = N % BITS_PER_BYTE;
        if rem != 0 {
            self.bytes[start] &= (1u8 << rem) - 1;
            start += 1;
        }
        for byte in &mut self.bytes[start..] {
            *byte = 0;
        }
    }

    fn zip_with(mut self, other: &Self, op: impl Fn(u8, u8) -> u8) -> Self {
        for (dst, src) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *dst = op(*dst, *src);
        }
        self.trim();
        self
    }
}

impl<const N: usize, const BYTES: usize> Default for FixedBitSet<N, BYTES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const BYTES: usize> FromIterator<usize> for FixedBitSet<N, BYTES> {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.set(index, true);
        }
        set
    }
}

impl<const N: usize, const BYTES: usize> Index<usize> for FixedBitSet<N, BYTES> {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        if self.get(index) { &true } else { &false }
    }
}

impl<const N: usize, const BYTES: usize> Not for FixedBitSet<N, BYTES> {
    type Output = Self;

    fn not(mut self) -> Self {
        self.flip();
        self
    }
}

impl<const N: usize, const BYTES: usize> BitAnd for FixedBitSet<N, BYTES> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a & b)
    }
}

impl<const N: usize, const BYTES: usize> BitOr for FixedBitSet<N, BYTES> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a | b)
    }
}

impl<const N: usize, const BYTES: usize> BitXor for FixedBitSet<N, BYTES> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a ^ b)
    }
}

impl<const N: usize, const BYTES: usize> BitAndAssign for FixedBitSet<N, BYTES> {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<const N: usize, const BYTES: usize> BitOrAssign for FixedBitSet<N, BYTES> {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl<const N: usize, const BYTES: usize> BitXorAssign for FixedBitSet<N, BYTES> {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

/// Lexicographic over storage blocks, first block first.
impl<const N: usize, const BYTES: usize> Ord for FixedBitSet<N, BYTES> {
    fn cmp(&self, other: &Self) -> Ordering {
        (0..Self::BLOCK_COUNT)
            .map(|i| self.block(i))
            .cmp((0..Self::BLOCK_COUNT).map(|i| other.block(i)))
    }
}

impl<const N: usize, const BYTES: usize> PartialOrd for FixedBitSet<N, BYTES> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize, const BYTES: usize> fmt::Display for FixedBitSet<N, BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with('0', '1'))
    }
}

impl<const N: usize, const BYTES: usize> fmt::Debug for FixedBitSet<N, BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBitSet<{}>({})", N, self)
    }
}

impl<const N: usize, const BYTES: usize> FromStr for FixedBitSet<N, BYTES> {
    type Err = ParseBitSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, '0', '1')
    }
}

impl<'a, const N: usize, const BYTES: usize> IntoIterator for &'a FixedBitSet<N, BYTES> {
    type Item = bool;
    type IntoIter = Iter<'a, N, BYTES>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, const N: usize, const BYTES: usize> IntoIterator for &'a mut FixedBitSet<N, BYTES> {
    type Item = BitMut<'a>;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
