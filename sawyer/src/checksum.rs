//! File and object checksums
//!
//! - File checksum: wrapping 32-bit sum of every byte before the trailer.
//! - Object checksum: rolling `rol(acc ^ byte, 11)` seeded with
//!   [`OBJECT_CHECKSUM_SEED`].

use crate::{CHECKSUM_SIZE, SawyerError};

/// Seed for [`object_checksum`]
pub const OBJECT_CHECKSUM_SEED: u32 = 0xF369_A75B;

/// Running wrapping sum of bytes, as stored in a stream trailer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileChecksum(u32);

impl FileChecksum {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0 = data
            .iter()
            .fold(self.0, |sum, &byte| sum.wrapping_add(byte as u32));
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Wrapping byte sum of `data`.
pub fn compute_file_checksum(data: &[u8]) -> u32 {
    let mut checksum = FileChecksum::new();
    checksum.update(data);
    checksum.value()
}

/// Check the trailer of a whole stream held in memory.
pub fn verify_file_checksum(file: &[u8]) -> Result<(), SawyerError> {
    if file.len() < CHECKSUM_SIZE {
        return Err(SawyerError::FileTooSmall(file.len() as u64));
    }
    let (body, trailer) = file.split_at(file.len() - CHECKSUM_SIZE);
    let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let computed = compute_file_checksum(body);
    if stored != computed {
        return Err(SawyerError::ChecksumMismatch { stored, computed });
    }
    Ok(())
}

/// Continue a rolling object checksum from `seed` over `data`.
///
/// Feed the segments in order (flag byte, name, then payload), passing each
/// result as the next seed.
pub fn object_checksum(seed: u32, data: &[u8]) -> u32 {
    data.iter()
        .fold(seed, |acc, &byte| (acc ^ byte as u32).rotate_left(11))
}
