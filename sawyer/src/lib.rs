//! Loco-Sawyer: chunked stream format used by Locomotion save and object files
//!
//! A Sawyer stream is a flat sequence of *chunks* and raw records followed by a
//! 4-byte checksum. Each chunk carries its own encoding so a reader can decode
//! it without any outside schema; the schema (which chunk comes next, and how
//! large it must be) belongs to the caller.
//!
//! # Stream Layout
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Chunk                                          │
//! │ ├─ encoding: u8   (see SawyerEncoding)         │
//! │ ├─ length:   u32  (LE, encoded payload bytes)  │
//! │ └─ payload:  [u8; length]                      │
//! ├────────────────────────────────────────────────┤
//! │ Raw record (fixed layout, no framing)          │
//! ├────────────────────────────────────────────────┤
//! │ ... more chunks / records ...                  │
//! ├────────────────────────────────────────────────┤
//! │ Checksum: u32 (LE, wrapping sum of all bytes)  │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::io::Cursor;
//! use loco_sawyer::{SawyerEncoding, SawyerStreamReader, SawyerStreamWriter};
//!
//! let mut writer = SawyerStreamWriter::new(Vec::new());
//! writer.write_chunk(SawyerEncoding::RunLengthSingle, &[7u8; 64]).unwrap();
//! writer.write_checksum().unwrap();
//! let bytes = writer.close().unwrap();
//!
//! let mut reader = SawyerStreamReader::new(Cursor::new(bytes)).unwrap();
//! reader.validate_checksum().unwrap();
//! assert_eq!(reader.read_chunk().unwrap(), vec![7u8; 64]);
//! ```

pub mod checksum;
pub mod codec;
mod encoding;
mod error;
mod reader;
mod writer;

pub use checksum::{
    FileChecksum, OBJECT_CHECKSUM_SEED, compute_file_checksum, object_checksum,
    verify_file_checksum,
};
pub use encoding::SawyerEncoding;
pub use error::{CodecError, SawyerError};
pub use reader::SawyerStreamReader;
pub use writer::SawyerStreamWriter;

// =============================================================================
// Constants
// =============================================================================

/// Size of the trailing checksum
pub const CHECKSUM_SIZE: usize = 4;

/// Size of a chunk header (encoding tag + payload length)
pub const CHUNK_HEADER_SIZE: usize = 5;

/// Result alias for stream operations
pub type Result<T, E = SawyerError> = std::result::Result<T, E>;
