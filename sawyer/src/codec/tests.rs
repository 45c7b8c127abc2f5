//! Tests for the chunk codecs

use super::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random bytes drawn from a small alphabet with occasional long runs
fn structured_bytes(rng: &mut Pcg32, len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        let byte = rng.random_range(0..6u8);
        let run = if rng.random_range(0..8) == 0 {
            rng.random_range(2..300)
        } else {
            1
        };
        for _ in 0..run.min(len - data.len()) {
            data.push(byte);
        }
    }
    data
}

fn random_bytes(rng: &mut Pcg32, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random::<u8>()).collect()
}

// =============================================================
// Single run-length
// =============================================================

#[test]
fn test_rle_encode_vectors() {
    assert_eq!(rle::encode(&[]), Vec::<u8>::new());
    assert_eq!(rle::encode(&[5]), vec![0x00, 5]);
    assert_eq!(rle::encode(&[1, 2, 3]), vec![0x02, 1, 2, 3]);
    assert_eq!(rle::encode(&[7, 7, 7, 7]), vec![0xFD, 7]);
    assert_eq!(rle::encode(&[1, 2, 2]), vec![0x00, 1, 0xFF, 2]);
    assert_eq!(rle::encode(&[9, 9, 5]), vec![0xFF, 9, 0x00, 5]);
}

#[test]
fn test_rle_long_runs_split_at_125() {
    assert_eq!(rle::encode(&[0u8; 200]), vec![0x84, 0, 0xB6, 0]);
    assert_eq!(rle::decode(&[0x84, 0, 0xB6, 0]).unwrap(), vec![0u8; 200]);
}

#[test]
fn test_rle_long_literal_runs_stay_in_range() {
    // Strictly increasing bytes never repeat, so everything is literal
    let data: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();
    let encoded = rle::encode(&data);
    let mut i = 0;
    while i < encoded.len() {
        let control = encoded[i];
        assert!(control < 0x80, "literal control {control:#X} at {i}");
        i += control as usize + 2;
    }
    assert_eq!(rle::decode(&encoded).unwrap(), data);
}

#[test]
fn test_rle_decode_truncated() {
    assert_eq!(rle::decode(&[0x80]), Err(CodecError::TruncatedRun { offset: 0 }));
    assert_eq!(
        rle::decode(&[0x05, 1, 2]),
        Err(CodecError::TruncatedRun { offset: 0 })
    );
    assert_eq!(
        rle::decode(&[0x00, 1, 0x01, 2]),
        Err(CodecError::TruncatedRun { offset: 2 })
    );
}

#[test]
fn test_rle_roundtrip_random() {
    let mut rng = Pcg32::seed_from_u64(0xC0DEC);
    for len in [1, 2, 3, 127, 128, 129, 1000, 70_000] {
        let data = structured_bytes(&mut rng, len);
        assert_eq!(rle::decode(&rle::encode(&data)).unwrap(), data, "len {len}");

        let data = random_bytes(&mut rng, len);
        assert_eq!(rle::decode(&rle::encode(&data)).unwrap(), data, "len {len}");
    }
}

// =============================================================
// Multi back-reference
// =============================================================

#[test]
fn test_multi_encode_vectors() {
    assert_eq!(multi::encode(&[]), Vec::<u8>::new());
    assert_eq!(multi::encode(&[0xAA]), vec![0xFF, 0xAA]);
    assert_eq!(multi::encode(&[1, 1]), vec![0xFF, 1, 0xF8]);
    assert_eq!(multi::encode(&[1, 2, 1, 2]), vec![0xFF, 1, 0xFF, 2, 0xF1]);
}

#[test]
fn test_multi_references_stay_behind_output() {
    let mut rng = Pcg32::seed_from_u64(3);
    let data = structured_bytes(&mut rng, 5000);
    let encoded = multi::encode(&data);
    let mut i = 0;
    let mut references = 0;
    while i < encoded.len() {
        if encoded[i] == 0xFF {
            i += 2;
            continue;
        }
        let distance = 32 - (encoded[i] >> 3) as usize;
        let length = (encoded[i] & 7) as usize + 1;
        assert!(length <= distance, "reference {:#X} at {i}", encoded[i]);
        references += 1;
        i += 1;
    }
    assert!(references > 0);
}

#[test]
fn test_multi_decode_rejects_bad_references() {
    assert_eq!(
        multi::decode(&[0xF8]),
        Err(CodecError::InvalidBackReference {
            offset: 0,
            distance: 1,
            length: 1,
            available: 0
        })
    );
    assert!(matches!(
        multi::decode(&[0xFF, 1, 0x00]),
        Err(CodecError::InvalidBackReference { distance: 32, .. })
    ));
    // Length 2 from distance 1 would read the byte being produced
    assert!(matches!(
        multi::decode(&[0xFF, 1, 0xF9]),
        Err(CodecError::InvalidBackReference { .. })
    ));
    assert_eq!(multi::decode(&[0xFF]), Err(CodecError::TruncatedRun { offset: 0 }));
}

#[test]
fn test_multi_roundtrip_random() {
    let mut rng = Pcg32::seed_from_u64(0xBEEF);
    for len in [1, 2, 9, 33, 64, 1000, 66_000] {
        let data = structured_bytes(&mut rng, len);
        assert_eq!(multi::decode(&multi::encode(&data)).unwrap(), data, "len {len}");
    }
}

// =============================================================
// Rotate
// =============================================================

#[test]
fn test_rotate_shift_cycle() {
    assert_eq!(
        rotate::encode(&[0x01; 5]),
        vec![0x02, 0x08, 0x20, 0x80, 0x02]
    );
    assert_eq!(rotate::decode(&[0x02, 0x08, 0x20, 0x80, 0x02]), vec![0x01; 5]);
}

#[test]
fn test_rotate_roundtrip_random() {
    let mut rng = Pcg32::seed_from_u64(11);
    let data = random_bytes(&mut rng, 4099);
    assert_eq!(rotate::decode(&rotate::encode(&data)), data);
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn test_multi_layers_under_rle() {
    assert_eq!(
        encode(SawyerEncoding::RunLengthMulti, &[1, 1]),
        vec![0x02, 0xFF, 1, 0xF8]
    );
    assert_eq!(
        decode(SawyerEncoding::RunLengthMulti, &[0x02, 0xFF, 1, 0xF8]).unwrap(),
        vec![1, 1]
    );
    assert!(decode(SawyerEncoding::RunLengthMulti, &[0x00, 0xF8]).is_err());
}

#[test]
fn test_every_encoding_roundtrips() {
    let mut rng = Pcg32::seed_from_u64(0x5A5A);
    let inputs = [
        Vec::new(),
        vec![0x42],
        vec![0u8; 100_000],
        structured_bytes(&mut rng, 20_000),
        random_bytes(&mut rng, 20_000),
    ];
    for encoding in SawyerEncoding::ALL {
        for data in &inputs {
            let encoded = encode(encoding, data);
            assert_eq!(
                &decode(encoding, &encoded).unwrap(),
                data,
                "{encoding} len {}",
                data.len()
            );
        }
    }
}

#[test]
fn test_encoders_are_deterministic() {
    let mut rng = Pcg32::seed_from_u64(99);
    let data = structured_bytes(&mut rng, 3000);
    for encoding in SawyerEncoding::ALL {
        assert_eq!(encode(encoding, &data), encode(encoding, &data));
    }
}

#[test]
fn test_repetitive_input_compresses() {
    let data = vec![0x11u8; 10_000];
    assert!(encode(SawyerEncoding::RunLengthSingle, &data).len() < 200);
    assert!(encode(SawyerEncoding::RunLengthMulti, &data).len() < data.len());
}
