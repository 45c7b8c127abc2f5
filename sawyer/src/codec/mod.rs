//! Chunk payload codecs
//!
//! Three transforms share one byte-oriented family:
//!
//! - [`rle`]: literal runs and repeated-byte runs driven by a signed control byte
//! - [`multi`]: back-references into the last 32 output bytes, layered under `rle`
//! - [`rotate`]: bitwise rotation with a shift cycling through 1, 3, 5, 7
//!
//! All encoders are deterministic: identical input always produces identical
//! bytes, which lets a load-then-save pass reproduce a file exactly.

pub mod multi;
pub mod rle;
pub mod rotate;

#[cfg(test)]
mod tests;

use crate::{CodecError, SawyerEncoding};

/// Encode `data` as a chunk payload.
pub fn encode(encoding: SawyerEncoding, data: &[u8]) -> Vec<u8> {
    match encoding {
        SawyerEncoding::Uncompressed => data.to_vec(),
        SawyerEncoding::RunLengthSingle => rle::encode(data),
        SawyerEncoding::RunLengthMulti => rle::encode(&multi::encode(data)),
        SawyerEncoding::Rotate => rotate::encode(data),
    }
}

/// Decode a chunk payload written with `encoding`.
pub fn decode(encoding: SawyerEncoding, data: &[u8]) -> Result<Vec<u8>, CodecError> {
    match encoding {
        SawyerEncoding::Uncompressed => Ok(data.to_vec()),
        SawyerEncoding::RunLengthSingle => rle::decode(data),
        SawyerEncoding::RunLengthMulti => multi::decode(&rle::decode(data)?),
        SawyerEncoding::Rotate => Ok(rotate::decode(data)),
    }
}
