//! Sawyer stream reader
//!
//! Reads chunks and raw records from a seekable source. The source length is
//! captured up front so a corrupt length field is rejected before any
//! allocation. Reads never extend into the trailing checksum.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::checksum::FileChecksum;
use crate::codec;
use crate::{CHECKSUM_SIZE, CHUNK_HEADER_SIZE, CodecError, Result, SawyerEncoding, SawyerError};

const VALIDATE_BLOCK_SIZE: usize = 2048;

/// Reader for Sawyer chunked streams
pub struct SawyerStreamReader<R: Read + Seek> {
    stream: R,
    length: u64,
}

impl SawyerStreamReader<BufReader<File>> {
    /// Open a file for reading
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> SawyerStreamReader<R> {
    /// Wrap a stream, reading from its current position.
    pub fn new(mut stream: R) -> Result<Self> {
        let position = stream.stream_position()?;
        let length = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(position))?;
        Ok(Self { stream, length })
    }

    /// Total length of the underlying stream
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn position(&mut self) -> Result<u64> {
        Ok(self.stream.stream_position()?)
    }

    /// Check the trailing checksum against the sum of everything before it.
    ///
    /// The stream position is unchanged afterwards.
    pub fn validate_checksum(&mut self) -> Result<()> {
        let trailer_size = CHECKSUM_SIZE as u64;
        if self.length < trailer_size {
            return Err(SawyerError::FileTooSmall(self.length));
        }

        let restore = self.stream.stream_position()?;
        self.stream.seek(SeekFrom::Start(0))?;

        let mut checksum = FileChecksum::new();
        let mut block = [0u8; VALIDATE_BLOCK_SIZE];
        let mut remaining = self.length - trailer_size;
        while remaining > 0 {
            let size = remaining.min(VALIDATE_BLOCK_SIZE as u64) as usize;
            self.stream.read_exact(&mut block[..size])?;
            checksum.update(&block[..size]);
            remaining -= size as u64;
        }
        let stored = self.stream.read_u32::<LittleEndian>()?;

        self.stream.seek(SeekFrom::Start(restore))?;

        let computed = checksum.value();
        if stored != computed {
            return Err(SawyerError::ChecksumMismatch { stored, computed });
        }
        tracing::debug!(checksum = stored, "checksum valid");
        Ok(())
    }

    /// Read and decode the next chunk.
    pub fn read_chunk(&mut self) -> Result<Vec<u8>> {
        let offset = self.stream.stream_position()?;

        let mut frame = [0u8; CHUNK_HEADER_SIZE];
        self.read_frame(offset, &mut frame)?;
        let encoding = SawyerEncoding::try_from(frame[0])
            .map_err(|source| SawyerError::CorruptChunk { offset, source })?;
        let length = u32::from_le_bytes([frame[1], frame[2], frame[3], frame[4]]);

        self.ensure_available(offset, u64::from(length))?;
        let mut payload = vec![0u8; length as usize];
        self.read_frame(offset, &mut payload)?;

        let data = codec::decode(encoding, &payload)
            .map_err(|source| SawyerError::CorruptChunk { offset, source })?;

        tracing::debug!(
            offset,
            %encoding,
            encoded = length,
            decoded = data.len(),
            "read chunk"
        );
        Ok(data)
    }

    /// Read the next chunk into a fixed-size record.
    ///
    /// The decoded size must match `dest` exactly.
    pub fn read_chunk_into(&mut self, dest: &mut [u8]) -> Result<()> {
        let data = self.read_chunk()?;
        if data.len() != dest.len() {
            return Err(SawyerError::SizeMismatch {
                expected: dest.len(),
                actual: data.len(),
            });
        }
        dest.copy_from_slice(&data);
        Ok(())
    }

    /// Read raw bytes with no chunk framing.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<()> {
        let offset = self.stream.stream_position()?;
        self.read_frame(offset, dest)
    }

    /// Whether only the trailing checksum (or less) remains.
    pub fn is_at_end(&mut self) -> Result<bool> {
        let position = self.stream.stream_position()?;
        Ok(position + CHECKSUM_SIZE as u64 >= self.length)
    }

    pub fn into_inner(self) -> R {
        self.stream
    }

    /// End of the data area, where the checksum starts
    fn data_end(&self) -> u64 {
        self.length.saturating_sub(CHECKSUM_SIZE as u64)
    }

    fn ensure_available(&mut self, offset: u64, expected: u64) -> Result<u64> {
        let position = self.stream.stream_position()?;
        let available = self.data_end().saturating_sub(position);
        if expected > available {
            return Err(SawyerError::CorruptChunk {
                offset,
                source: CodecError::TruncatedFrame {
                    expected,
                    available,
                },
            });
        }
        Ok(available)
    }

    /// Read part of a chunk or record, reporting a short stream as a truncated
    /// frame.
    fn read_frame(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let expected = buf.len() as u64;
        let available = self.ensure_available(offset, expected)?;
        match self.stream.read_exact(buf) {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(SawyerError::CorruptChunk {
                offset,
                source: CodecError::TruncatedFrame {
                    expected,
                    available,
                },
            }),
            other => Ok(other?),
        }
    }
}
