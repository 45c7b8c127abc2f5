//! Single-byte run-length coding
//!
//! ```text
//! control c, high bit clear: copy the next c + 1 bytes      (1..=128 literals)
//! control c, high bit set:   repeat the next byte 257 - c   (2..=125 repeats)
//! ```

use crate::CodecError;

/// Longest run of repeated bytes emitted as one control pair
const MAX_REPEAT: usize = 125;

/// Literal count at which a pending literal run is flushed
const MAX_PENDING_LITERALS: usize = 125;

pub fn decode(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut i = 0;
    while i < data.len() {
        let control = data[i];
        if control & 0x80 != 0 {
            let value = *data
                .get(i + 1)
                .ok_or(CodecError::TruncatedRun { offset: i })?;
            let count = 257 - control as usize;
            out.resize(out.len() + count, value);
            i += 2;
        } else {
            let start = i + 1;
            let end = start + control as usize + 1;
            let literals = data
                .get(start..end)
                .ok_or(CodecError::TruncatedRun { offset: i })?;
            out.extend_from_slice(literals);
            i = end;
        }
    }
    Ok(out)
}

pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 64 + 2);

    // Start of the pending literal run and its length
    let mut literal_start = 0;
    let mut count = 0;
    let mut src = 0;

    while src + 1 < data.len() {
        let repeats = data[src] == data[src + 1];
        if (count != 0 && repeats) || count > MAX_PENDING_LITERALS {
            push_literals(&mut out, &data[literal_start..literal_start + count]);
            literal_start += count;
            count = 0;
        }

        if repeats {
            while count < MAX_REPEAT && src + count < data.len() {
                if data[src] != data[src + count] {
                    break;
                }
                count += 1;
            }
            out.push((257 - count) as u8);
            out.push(data[src]);
            src += count;
            literal_start = src;
            count = 0;
        } else {
            count += 1;
            src += 1;
        }
    }

    // A lone trailing byte joins the pending literals
    if src + 1 == data.len() {
        count += 1;
    }
    if count != 0 {
        push_literals(&mut out, &data[literal_start..literal_start + count]);
    }
    out
}

fn push_literals(out: &mut Vec<u8>, literals: &[u8]) {
    out.push((literals.len() - 1) as u8);
    out.extend_from_slice(literals);
}
