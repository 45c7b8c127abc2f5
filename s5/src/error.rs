use loco_sawyer::SawyerError;

/// Errors raised while loading or saving an S5 file
#[derive(Debug, thiserror::Error)]
pub enum S5Error {
    #[error(transparent)]
    Sawyer(#[from] SawyerError),

    /// Header names a file type outside savedGame/scenario/objects/landscape
    #[error("unexpected S5 file type {0}")]
    UnexpectedHeaderType(u8),

    /// Object header carries a type tag outside the known set
    #[error("unknown object type {0}")]
    UnknownObjectType(u8),

    #[error("unsupported S5 version {0:#X}")]
    UnsupportedVersion(u32),

    /// A fixed-layout record could not be built from the given bytes
    #[error("invalid {record}: {reason}")]
    InvalidRecord {
        record: &'static str,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl S5Error {
    pub(crate) fn record_size(record: &'static str, expected: usize, actual: usize) -> Self {
        S5Error::InvalidRecord {
            record,
            reason: format!("expected {expected} bytes, got {actual}"),
        }
    }

    /// Whether the file's trailing checksum did not match its contents
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(
            self,
            S5Error::Sawyer(SawyerError::ChecksumMismatch { .. })
        )
    }
}
