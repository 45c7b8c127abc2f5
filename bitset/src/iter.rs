//! Iterators and the single-bit proxy

use core::cell::Cell;

use crate::{BITS_PER_BYTE, FixedBitSet};

/// Assignable reference to one bit of a [`FixedBitSet`].
///
/// Several proxies may be alive at once (for example while walking the set
/// with [`FixedBitSet::iter_mut`]); each only touches its own bit.
#[derive(Clone, Copy)]
pub struct BitMut<'a> {
    byte: &'a Cell<u8>,
    mask: u8,
}

impl<'a> BitMut<'a> {
    pub(crate) fn new(byte: &'a Cell<u8>, offset: usize) -> Self {
        Self {
            byte,
            mask: 1 << offset,
        }
    }

    pub fn get(&self) -> bool {
        self.byte.get() & self.mask != 0
    }

    pub fn set(&self, value: bool) {
        let byte = self.byte.get();
        self.byte
            .set(if value { byte | self.mask } else { byte & !self.mask });
    }

    pub fn toggle(&self) {
        self.byte.set(self.byte.get() ^ self.mask);
    }
}

impl core::fmt::Debug for BitMut<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BitMut({})", self.get())
    }
}

/// Bit values in index order `0..N`.
#[derive(Clone)]
pub struct Iter<'a, const N: usize, const BYTES: usize> {
    set: &'a FixedBitSet<N, BYTES>,
    pos: usize,
    end: usize,
}

impl<'a, const N: usize, const BYTES: usize> Iter<'a, N, BYTES> {
    pub(crate) fn new(set: &'a FixedBitSet<N, BYTES>) -> Self {
        Self { set, pos: 0, end: N }
    }
}

impl<const N: usize, const BYTES: usize> Iterator for Iter<'_, N, BYTES> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        let value = self.set.get(self.pos);
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl<const N: usize, const BYTES: usize> DoubleEndedIterator for Iter<'_, N, BYTES> {
    fn next_back(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.set.get(self.end))
    }
}

impl<const N: usize, const BYTES: usize> ExactSizeIterator for Iter<'_, N, BYTES> {}

/// Bit proxies in index order `0..N`.
pub struct IterMut<'a> {
    cells: &'a [Cell<u8>],
    pos: usize,
    end: usize,
}

impl<'a> IterMut<'a> {
    pub(crate) fn new(cells: &'a [Cell<u8>], len: usize) -> Self {
        Self {
            cells,
            pos: 0,
            end: len,
        }
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = BitMut<'a>;

    fn next(&mut self) -> Option<BitMut<'a>> {
        if self.pos >= self.end {
            return None;
        }
        let bit = BitMut::new(&self.cells[self.pos / BITS_PER_BYTE], self.pos % BITS_PER_BYTE);
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IterMut<'_> {}

/// Positions of set bits, ascending.
#[derive(Clone)]
pub struct Ones<'a, const N: usize, const BYTES: usize> {
    inner: core::iter::Enumerate<Iter<'a, N, BYTES>>,
}

impl<'a, const N: usize, const BYTES: usize> Ones<'a, N, BYTES> {
    pub(crate) fn new(set: &'a FixedBitSet<N, BYTES>) -> Self {
        Self {
            inner: set.iter().enumerate(),
        }
    }
}

impl<const N: usize, const BYTES: usize> Iterator for Ones<'_, N, BYTES> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.inner.find_map(|(index, bit)| bit.then_some(index))
    }
}
