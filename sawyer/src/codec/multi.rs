//! Back-reference coding over a 32-byte window
//!
//! ```text
//! 0xFF, b   literal byte b
//! c         copy (c & 7) + 1 bytes starting 32 - (c >> 3) bytes back
//! ```
//!
//! A reference never reaches the byte being produced, so the longest match at
//! distance `d` is `min(d, 8)` bytes and the distance-1 form tops out at 0xF8.

use crate::CodecError;

const LITERAL: u8 = 0xFF;
const WINDOW: usize = 32;
const MAX_MATCH: usize = 8;

pub fn decode(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut i = 0;
    while i < data.len() {
        let control = data[i];
        if control == LITERAL {
            let value = *data
                .get(i + 1)
                .ok_or(CodecError::TruncatedRun { offset: i })?;
            out.push(value);
            i += 2;
            continue;
        }

        let distance = WINDOW - (control >> 3) as usize;
        let length = (control & 7) as usize + 1;
        if distance > out.len() || length > distance {
            return Err(CodecError::InvalidBackReference {
                offset: i,
                distance,
                length,
                available: out.len(),
            });
        }
        let start = out.len() - distance;
        out.extend_from_within(start..start + length);
        i += 1;
    }
    Ok(out)
}

pub fn encode(data: &[u8]) -> Vec<u8> {
    let Some(&first) = data.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(data.len() * 2);
    out.push(LITERAL);
    out.push(first);

    let mut i = 1;
    while i < data.len() {
        let search_start = i.saturating_sub(WINDOW);
        let search_end = i - 1;

        let mut best_index = 0;
        let mut best_count = 0;
        for candidate in search_start..=search_end {
            let max_count = (MAX_MATCH - 1)
                .min(search_end - candidate)
                .min(data.len() - i - 1);
            let count = (0..=max_count)
                .take_while(|&j| data[candidate + j] == data[i + j])
                .count();
            if count > best_count {
                best_index = candidate;
                best_count = count;
                if count == MAX_MATCH {
                    break;
                }
            }
        }

        if best_count == 0 {
            out.push(LITERAL);
            out.push(data[i]);
            i += 1;
        } else {
            let back = WINDOW - (i - best_index);
            out.push(((best_count - 1) | (back << 3)) as u8);
            i += best_count;
        }
    }
    out
}
