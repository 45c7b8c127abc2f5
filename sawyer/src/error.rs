//! Error types for the codec and the chunk stream

/// Malformed encoded payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Encoding tag outside the known set
    #[error("unknown chunk encoding {0}")]
    UnknownEncoding(u8),

    /// A run's control byte announces more bytes than remain
    #[error("run at offset {offset} is truncated")]
    TruncatedRun { offset: usize },

    /// A back-reference points before the start of the output or past its end
    #[error(
        "back-reference at offset {offset} copies {length} bytes from {distance} back with only {available} decoded"
    )]
    InvalidBackReference {
        offset: usize,
        distance: usize,
        length: usize,
        available: usize,
    },

    /// Chunk framing announces more payload than the stream holds
    #[error("chunk announces {expected} bytes but only {available} remain")]
    TruncatedFrame { expected: u64, available: u64 },
}

/// Errors raised while reading or writing a Sawyer stream
#[derive(Debug, thiserror::Error)]
pub enum SawyerError {
    /// Stored trailing checksum disagrees with the data
    #[error("checksum mismatch (stored {stored:#010X}, computed {computed:#010X})")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// Stream cannot even hold the trailing checksum
    #[error("stream of {0} bytes is too short to hold a checksum")]
    FileTooSmall(u64),

    /// Chunk framing or payload could not be decoded
    #[error("corrupt chunk at offset {offset:#X}: {source}")]
    CorruptChunk { offset: u64, source: CodecError },

    /// Decoded chunk has a different size than the record it should fill
    #[error("chunk decoded to {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Encoded payload does not fit the 32-bit length field
    #[error("chunk of {0} bytes does not fit a 32-bit length")]
    ChunkTooLarge(usize),

    /// Data written after the checksum was appended
    #[error("stream already ends with a checksum")]
    WriteAfterChecksum,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
