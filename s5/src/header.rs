//! File header (0x20 bytes, chunk-wrapped)
//!
//! | Offset | Size | Field              |
//! |--------|------|--------------------|
//! | 0x00   | 1    | type               |
//! | 0x01   | 1    | flags              |
//! | 0x02   | 2    | numPackedObjects   |
//! | 0x04   | 4    | version            |
//! | 0x08   | 4    | magic              |
//! | 0x0C   | 20   | padding            |

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::S5Error;

pub const HEADER_SIZE: usize = 0x20;

/// Version written by current tools
pub const CURRENT_VERSION: u32 = 0x62262;

pub const HEADER_MAGIC: u32 = 0x62300;

/// Kind of S5 container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum S5Type {
    SavedGame = 0,
    Scenario = 1,
    Objects = 2,
    Landscape = 3,
}

impl S5Type {
    /// Whether the file carries required objects, game state and tiles
    pub fn has_game_content(self) -> bool {
        self != S5Type::Objects
    }
}

impl TryFrom<u8> for S5Type {
    type Error = S5Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(S5Type::SavedGame),
            1 => Ok(S5Type::Scenario),
            2 => Ok(S5Type::Objects),
            3 => Ok(S5Type::Landscape),
            other => Err(S5Error::UnexpectedHeaderType(other)),
        }
    }
}

impl std::fmt::Display for S5Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            S5Type::SavedGame => "saved game",
            S5Type::Scenario => "scenario",
            S5Type::Objects => "objects",
            S5Type::Landscape => "landscape",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// Header flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u8 {
        /// Raw memory dump including pointers
        const IS_RAW = 1 << 0;
        /// Written after a fatal error
        const IS_DUMP = 1 << 1;
        const IS_TITLE_SEQUENCE = 1 << 2;
        /// A save-details chunk follows the header
        const HAS_SAVE_DETAILS = 1 << 3;
    }
}

/// Decoded file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub s5_type: S5Type,
    pub flags: HeaderFlags,
    pub num_packed_objects: u16,
    pub version: u32,
    pub magic: u32,
    pub padding: [u8; 20],
}

impl Header {
    pub fn new(s5_type: S5Type) -> Self {
        Self {
            s5_type,
            flags: HeaderFlags::empty(),
            num_packed_objects: 0,
            version: CURRENT_VERSION,
            magic: HEADER_MAGIC,
            padding: [0; 20],
        }
    }

    pub fn has_flags(&self, flags: HeaderFlags) -> bool {
        self.flags.intersects(flags)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, S5Error> {
        if bytes.len() != HEADER_SIZE {
            return Err(S5Error::record_size("header", HEADER_SIZE, bytes.len()));
        }
        let mut cursor = Cursor::new(bytes);
        let s5_type = S5Type::try_from(cursor.read_u8()?)?;
        // Unknown bits survive a load/save cycle
        let flags = HeaderFlags::from_bits_retain(cursor.read_u8()?);
        let num_packed_objects = cursor.read_u16::<LittleEndian>()?;
        let version = cursor.read_u32::<LittleEndian>()?;
        let magic = cursor.read_u32::<LittleEndian>()?;
        let mut padding = [0u8; 20];
        cursor.read_exact(&mut padding)?;

        Ok(Self {
            s5_type,
            flags,
            num_packed_objects,
            version,
            magic,
            padding,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        out.push(self.s5_type as u8);
        out.push(self.flags.bits());
        out.extend_from_slice(&self.num_packed_objects.to_le_bytes());
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.magic.to_le_bytes());
        out.extend_from_slice(&self.padding);
        out
    }
}
