//! Sawyer stream writer
//!
//! Accumulates the file checksum over every byte written so the trailer can
//! be appended without re-reading the output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::checksum::FileChecksum;
use crate::codec;
use crate::{Result, SawyerEncoding, SawyerError};

/// Writer for Sawyer chunked streams
pub struct SawyerStreamWriter<W: Write> {
    stream: W,
    checksum: FileChecksum,
    written: u64,
    finished: bool,
}

impl SawyerStreamWriter<BufWriter<File>> {
    /// Create (or truncate) a file for writing
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SawyerStreamWriter<W> {
    pub fn new(stream: W) -> Self {
        Self {
            stream,
            checksum: FileChecksum::new(),
            written: 0,
            finished: false,
        }
    }

    /// Encode `data` and write it as one chunk.
    pub fn write_chunk(&mut self, encoding: SawyerEncoding, data: &[u8]) -> Result<()> {
        let payload = codec::encode(encoding, data);
        let length =
            u32::try_from(payload.len()).map_err(|_| SawyerError::ChunkTooLarge(payload.len()))?;

        let offset = self.written;
        let mut frame = Vec::with_capacity(crate::CHUNK_HEADER_SIZE);
        frame.write_u8(encoding.into())?;
        frame.write_u32::<LittleEndian>(length)?;
        self.write(&frame)?;
        self.write(&payload)?;

        tracing::debug!(
            offset,
            %encoding,
            decoded = data.len(),
            encoded = length,
            "wrote chunk"
        );
        Ok(())
    }

    /// Write raw bytes with no chunk framing.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        if self.finished {
            return Err(SawyerError::WriteAfterChecksum);
        }
        self.stream.write_all(data)?;
        self.checksum.update(data);
        self.written += data.len() as u64;
        Ok(())
    }

    /// Append the checksum of everything written so far.
    pub fn write_checksum(&mut self) -> Result<()> {
        if self.finished {
            return Err(SawyerError::WriteAfterChecksum);
        }
        let checksum = self.checksum.value();
        self.stream.write_u32::<LittleEndian>(checksum)?;
        self.written += crate::CHECKSUM_SIZE as u64;
        self.finished = true;
        tracing::debug!(checksum, bytes = self.written, "wrote checksum");
        Ok(())
    }

    /// Checksum of the bytes written so far
    pub fn checksum(&self) -> u32 {
        self.checksum.value()
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the underlying stream.
    pub fn close(mut self) -> Result<W> {
        self.stream.flush()?;
        Ok(self.stream)
    }
}
