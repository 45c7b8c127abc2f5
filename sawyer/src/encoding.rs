use crate::CodecError;

/// Per-chunk encoding tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SawyerEncoding {
    /// Payload stored verbatim
    Uncompressed = 0,
    /// Literal runs and repeated-byte runs
    RunLengthSingle = 1,
    /// Small-window back-references, then [`SawyerEncoding::RunLengthSingle`]
    RunLengthMulti = 2,
    /// Each byte rotated by a cycling shift
    Rotate = 3,
}

impl SawyerEncoding {
    pub const ALL: [SawyerEncoding; 4] = [
        SawyerEncoding::Uncompressed,
        SawyerEncoding::RunLengthSingle,
        SawyerEncoding::RunLengthMulti,
        SawyerEncoding::Rotate,
    ];

    pub fn is_compressed(self) -> bool {
        matches!(
            self,
            SawyerEncoding::RunLengthSingle | SawyerEncoding::RunLengthMulti
        )
    }
}

impl TryFrom<u8> for SawyerEncoding {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SawyerEncoding::Uncompressed),
            1 => Ok(SawyerEncoding::RunLengthSingle),
            2 => Ok(SawyerEncoding::RunLengthMulti),
            3 => Ok(SawyerEncoding::Rotate),
            other => Err(CodecError::UnknownEncoding(other)),
        }
    }
}

impl From<SawyerEncoding> for u8 {
    fn from(encoding: SawyerEncoding) -> u8 {
        encoding as u8
    }
}

impl core::fmt::Display for SawyerEncoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            SawyerEncoding::Uncompressed => "uncompressed",
            SawyerEncoding::RunLengthSingle => "rle-single",
            SawyerEncoding::RunLengthMulti => "rle-multi",
            SawyerEncoding::Rotate => "rotate",
        };
        f.write_str(name)
    }
}
