//! End-to-end tests for the chunk stream reader and writer

use std::io::Cursor;

use loco_sawyer::{
    CodecError, SawyerEncoding, SawyerError, SawyerStreamReader, SawyerStreamWriter,
    compute_file_checksum,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

fn write_stream(chunks: &[(SawyerEncoding, &[u8])], raw_tail: &[u8]) -> Vec<u8> {
    let mut writer = SawyerStreamWriter::new(Vec::new());
    for (encoding, data) in chunks {
        writer.write_chunk(*encoding, data).unwrap();
    }
    writer.write(raw_tail).unwrap();
    writer.write_checksum().unwrap();
    writer.close().unwrap()
}

fn reader(bytes: Vec<u8>) -> SawyerStreamReader<Cursor<Vec<u8>>> {
    SawyerStreamReader::new(Cursor::new(bytes)).unwrap()
}

#[test]
fn test_roundtrip_all_encodings() {
    let mut rng = Pcg32::seed_from_u64(2024);
    let noise: Vec<u8> = (0..5000).map(|_| rng.random::<u8>()).collect();
    let runs: Vec<u8> = (0..70_000).map(|i| (i / 300) as u8).collect();

    let chunks: Vec<(SawyerEncoding, &[u8])> = SawyerEncoding::ALL
        .iter()
        .flat_map(|&encoding| [(encoding, &noise[..]), (encoding, &runs[..]), (encoding, &[][..])])
        .collect();
    let bytes = write_stream(&chunks, b"TAIL");

    let mut reader = reader(bytes);
    reader.validate_checksum().unwrap();
    for (encoding, data) in &chunks {
        assert_eq!(&reader.read_chunk().unwrap(), data, "{encoding}");
    }
    let mut tail = [0u8; 4];
    reader.read(&mut tail).unwrap();
    assert_eq!(&tail, b"TAIL");
    assert!(reader.is_at_end().unwrap());
}

#[test]
fn test_validate_keeps_position() {
    let bytes = write_stream(
        &[
            (SawyerEncoding::Rotate, &b"first"[..]),
            (SawyerEncoding::RunLengthSingle, &b"second"[..]),
        ],
        &[],
    );
    let mut reader = reader(bytes);
    assert_eq!(reader.read_chunk().unwrap(), b"first");
    let position = reader.position().unwrap();
    reader.validate_checksum().unwrap();
    assert_eq!(reader.position().unwrap(), position);
    assert_eq!(reader.read_chunk().unwrap(), b"second");
}

#[test]
fn test_every_single_byte_change_breaks_checksum() {
    let bytes = write_stream(&[(SawyerEncoding::RunLengthMulti, &[3u8; 100][..])], b"xyz");
    for index in 0..bytes.len() {
        let mut corrupt = bytes.clone();
        corrupt[index] = corrupt[index].wrapping_add(1);
        let mut reader = reader(corrupt);
        assert!(
            matches!(
                reader.validate_checksum(),
                Err(SawyerError::ChecksumMismatch { .. })
            ),
            "byte {index}"
        );
    }
}

#[test]
fn test_stored_checksum_is_plain_sum() {
    let bytes = write_stream(&[(SawyerEncoding::Uncompressed, &b"abc"[..])], &[]);
    let (body, trailer) = bytes.split_at(bytes.len() - 4);
    assert_eq!(
        u32::from_le_bytes(trailer.try_into().unwrap()),
        compute_file_checksum(body)
    );
}

#[test]
fn test_short_streams() {
    assert!(matches!(
        reader(vec![1, 2, 3]).validate_checksum(),
        Err(SawyerError::FileTooSmall(3))
    ));
    assert!(reader(vec![0, 0, 0, 0]).validate_checksum().is_ok());
    assert!(reader(vec![0, 0, 0, 0]).is_at_end().unwrap());
}

#[test]
fn test_truncated_chunk() {
    let mut bytes = write_stream(&[(SawyerEncoding::Uncompressed, &[9u8; 64][..])], &[]);
    bytes.truncate(40);
    let err = reader(bytes).read_chunk().unwrap_err();
    assert!(matches!(
        err,
        SawyerError::CorruptChunk {
            offset: 0,
            source: CodecError::TruncatedFrame {
                expected: 64,
                available: 31
            }
        }
    ));

    let err = reader(vec![0x01, 0x10]).read_chunk().unwrap_err();
    assert!(matches!(
        err,
        SawyerError::CorruptChunk {
            source: CodecError::TruncatedFrame { expected: 5, .. },
            ..
        }
    ));
}

#[test]
fn test_reads_stop_at_checksum() {
    // Frame announces 7 bytes but only 3 precede the checksum
    let mut writer = SawyerStreamWriter::new(Vec::new());
    writer
        .write(&[0x00, 0x07, 0x00, 0x00, 0x00, 1, 2, 3])
        .unwrap();
    writer.write_checksum().unwrap();
    let bytes = writer.close().unwrap();

    let mut first = reader(bytes.clone());
    first.validate_checksum().unwrap();
    assert!(matches!(
        first.read_chunk(),
        Err(SawyerError::CorruptChunk {
            offset: 0,
            source: CodecError::TruncatedFrame {
                expected: 7,
                available: 3
            }
        })
    ));

    // Raw records are bounded the same way
    let mut reader = reader(bytes);
    let mut record = [0u8; 10];
    assert!(matches!(
        reader.read(&mut record),
        Err(SawyerError::CorruptChunk {
            offset: 0,
            source: CodecError::TruncatedFrame {
                expected: 10,
                available: 8
            }
        })
    ));
    let mut exact = [0u8; 8];
    reader.read(&mut exact).unwrap();
    assert!(reader.is_at_end().unwrap());
}

#[test]
fn test_huge_length_is_rejected_before_reading() {
    let bytes = vec![0x00, 0xFF, 0xFF, 0xFF, 0xFF, 1, 2, 3];
    assert!(matches!(
        reader(bytes).read_chunk(),
        Err(SawyerError::CorruptChunk {
            source: CodecError::TruncatedFrame {
                expected: 0xFFFF_FFFF,
                ..
            },
            ..
        })
    ));
}

#[test]
fn test_unknown_encoding() {
    let bytes = vec![0x07, 0x01, 0x00, 0x00, 0x00, 0xAA, 0, 0, 0, 0];
    assert!(matches!(
        reader(bytes).read_chunk(),
        Err(SawyerError::CorruptChunk {
            offset: 0,
            source: CodecError::UnknownEncoding(7)
        })
    ));
}

#[test]
fn test_malformed_payload_reports_chunk_offset() {
    let mut writer = SawyerStreamWriter::new(Vec::new());
    writer
        .write_chunk(SawyerEncoding::Uncompressed, b"ok")
        .unwrap();
    // Literal run announcing 4 bytes with only 1 present
    writer.write(&[0x01, 0x02, 0x00, 0x00, 0x00, 0x03, 0xAA]).unwrap();
    writer.write_checksum().unwrap();
    let bytes = writer.close().unwrap();

    let mut reader = reader(bytes);
    reader.read_chunk().unwrap();
    assert!(matches!(
        reader.read_chunk(),
        Err(SawyerError::CorruptChunk {
            offset: 7,
            source: CodecError::TruncatedRun { offset: 0 }
        })
    ));
}

#[test]
fn test_read_chunk_into_checks_size() {
    let bytes = write_stream(
        &[
            (SawyerEncoding::RunLengthSingle, &[5u8; 32][..]),
            (SawyerEncoding::RunLengthSingle, &[5u8; 32][..]),
        ],
        &[],
    );
    let mut reader = reader(bytes);

    let mut record = [0u8; 32];
    reader.read_chunk_into(&mut record).unwrap();
    assert_eq!(record, [5u8; 32]);

    let mut wrong = [0u8; 31];
    assert!(matches!(
        reader.read_chunk_into(&mut wrong),
        Err(SawyerError::SizeMismatch {
            expected: 31,
            actual: 32
        })
    ));
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.dat");

    let mut writer = SawyerStreamWriter::create(&path).unwrap();
    writer
        .write_chunk(SawyerEncoding::RunLengthMulti, b"hello hello hello")
        .unwrap();
    writer.write_checksum().unwrap();
    writer.close().unwrap();

    let mut reader = SawyerStreamReader::open(&path).unwrap();
    reader.validate_checksum().unwrap();
    assert_eq!(reader.read_chunk().unwrap(), b"hello hello hello");
    assert!(reader.is_at_end().unwrap());
}
