//! Object headers and packed objects
//!
//! Every game object is identified by a 16-byte header:
//!
//! ```text
//! flags:    u32  bits 0-5 object type, bits 6-7 source game, 8-31 reserved
//! name:     [u8; 8]  space padded, compared byte for byte
//! checksum: u32  rolling checksum over flag byte 0, name and payload
//! ```
//!
//! Sixteen `0xFF` bytes mark an unused slot. In memory such a slot is `None`.

use std::fmt;

use loco_sawyer::{OBJECT_CHECKSUM_SEED, SawyerEncoding, object_checksum};

use crate::S5Error;

pub const OBJECT_HEADER_SIZE: usize = 16;

const EMPTY_SLOT: [u8; OBJECT_HEADER_SIZE] = [0xFF; OBJECT_HEADER_SIZE];

const TYPE_MASK: u32 = 0x3F;
const SOURCE_SHIFT: u32 = 6;
const SOURCE_MASK: u32 = 0x3;
const RESERVED_MASK: u32 = 0xFFFF_FF00;

/// Object category encoded in the low six flag bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ObjectType {
    InterfaceSkin = 0,
    Sound = 1,
    Currency = 2,
    Steam = 3,
    CliffEdge = 4,
    Water = 5,
    Land = 6,
    TownNames = 7,
    Cargo = 8,
    Wall = 9,
    TrainSignal = 10,
    LevelCrossing = 11,
    StreetLight = 12,
    Tunnel = 13,
    Bridge = 14,
    TrainStation = 15,
    TrackExtra = 16,
    Track = 17,
    RoadStation = 18,
    RoadExtra = 19,
    Road = 20,
    Airport = 21,
    Dock = 22,
    Vehicle = 23,
    Tree = 24,
    Snow = 25,
    Climate = 26,
    HillShapes = 27,
    Building = 28,
    Scaffolding = 29,
    Industry = 30,
    Region = 31,
    Competitor = 32,
    ScenarioText = 33,
}

impl ObjectType {
    pub const COUNT: usize = 34;

    /// Chunk encoding used when packing an object of this type into a save
    pub fn best_encoding(self) -> SawyerEncoding {
        match self {
            ObjectType::Competitor => SawyerEncoding::Uncompressed,
            ObjectType::Currency => SawyerEncoding::RunLengthMulti,
            ObjectType::TownNames | ObjectType::ScenarioText => SawyerEncoding::Rotate,
            _ => SawyerEncoding::RunLengthSingle,
        }
    }
}

impl TryFrom<u8> for ObjectType {
    type Error = S5Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ObjectType::*;
        const ALL: [ObjectType; ObjectType::COUNT] = [
            InterfaceSkin,
            Sound,
            Currency,
            Steam,
            CliffEdge,
            Water,
            Land,
            TownNames,
            Cargo,
            Wall,
            TrainSignal,
            LevelCrossing,
            StreetLight,
            Tunnel,
            Bridge,
            TrainStation,
            TrackExtra,
            Track,
            RoadStation,
            RoadExtra,
            Road,
            Airport,
            Dock,
            Vehicle,
            Tree,
            Snow,
            Climate,
            HillShapes,
            Building,
            Scaffolding,
            Industry,
            Region,
            Competitor,
            ScenarioText,
        ];
        ALL.get(value as usize)
            .copied()
            .ok_or(S5Error::UnknownObjectType(value))
    }
}

/// Origin of an object, from flag bits 6-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceGame {
    Custom = 0,
    Data = 1,
    Vanilla = 2,
    Unknown = 3,
}

impl SourceGame {
    fn from_bits(bits: u32) -> Self {
        match bits & SOURCE_MASK {
            0 => SourceGame::Custom,
            1 => SourceGame::Data,
            2 => SourceGame::Vanilla,
            _ => SourceGame::Unknown,
        }
    }
}

/// 16-byte object identity
#[derive(Clone, Copy)]
pub struct ObjectHeader {
    pub flags: u32,
    pub name: [u8; 8],
    pub checksum: u32,
}

impl ObjectHeader {
    /// Build a header for `data`, computing its checksum.
    pub fn for_data(
        object_type: ObjectType,
        source: SourceGame,
        name: &str,
        data: &[u8],
    ) -> Self {
        let mut padded = [b' '; 8];
        for (dst, src) in padded.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
        let mut header = Self {
            flags: object_type as u32 | ((source as u32) << SOURCE_SHIFT),
            name: padded,
            checksum: 0,
        };
        header.checksum = header.compute_checksum(data);
        header
    }

    /// Parse a header slot. Returns `None` for the empty sentinel.
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>, S5Error> {
        let bytes: &[u8; OBJECT_HEADER_SIZE] = bytes.try_into().map_err(|_| {
            S5Error::record_size("object header", OBJECT_HEADER_SIZE, bytes.len())
        })?;
        if *bytes == EMPTY_SLOT {
            return Ok(None);
        }
        let mut name = [0u8; 8];
        name.copy_from_slice(&bytes[4..12]);
        Ok(Some(Self {
            flags: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            name,
            checksum: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        }))
    }

    pub fn to_bytes(&self) -> [u8; OBJECT_HEADER_SIZE] {
        let mut out = [0u8; OBJECT_HEADER_SIZE];
        out[..4].copy_from_slice(&self.flags.to_le_bytes());
        out[4..12].copy_from_slice(&self.name);
        out[12..].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }

    /// Serialize an optional slot, writing the sentinel for `None`.
    pub fn slot_bytes(slot: Option<&Self>) -> [u8; OBJECT_HEADER_SIZE] {
        slot.map_or(EMPTY_SLOT, Self::to_bytes)
    }

    pub fn type_bits(&self) -> u8 {
        (self.flags & TYPE_MASK) as u8
    }

    pub fn object_type(&self) -> Result<ObjectType, S5Error> {
        ObjectType::try_from(self.type_bits())
    }

    pub fn source_game(&self) -> SourceGame {
        SourceGame::from_bits(self.flags >> SOURCE_SHIFT)
    }

    pub fn is_custom(&self) -> bool {
        self.source_game() == SourceGame::Custom
    }

    /// Name with trailing padding removed
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.name)
            .trim_end_matches([' ', '\0'])
            .to_string()
    }

    pub fn compute_checksum(&self, data: &[u8]) -> u32 {
        compute_object_checksum(self, data)
    }

    pub fn verify_checksum(&self, data: &[u8]) -> bool {
        self.compute_checksum(data) == self.checksum
    }
}

/// Rolling checksum over the first flag byte, the name and the payload.
pub fn compute_object_checksum(header: &ObjectHeader, data: &[u8]) -> u32 {
    let flag_byte = header.flags.to_le_bytes()[0];
    let checksum = object_checksum(OBJECT_CHECKSUM_SEED, &[flag_byte]);
    let checksum = object_checksum(checksum, &header.name);
    object_checksum(checksum, data)
}

impl PartialEq for ObjectHeader {
    fn eq(&self, other: &Self) -> bool {
        let flags_equal = if self.is_custom() && other.is_custom() {
            (self.flags & !RESERVED_MASK) == (other.flags & !RESERVED_MASK)
        } else {
            self.flags == other.flags
        };
        flags_equal && self.name == other.name && self.checksum == other.checksum
    }
}

impl Eq for ObjectHeader {}

impl fmt::Debug for ObjectHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHeader")
            .field("flags", &format_args!("{:#010X}", self.flags))
            .field("name", &self.name())
            .field("checksum", &format_args!("{:#010X}", self.checksum))
            .finish()
    }
}

impl fmt::Display for ObjectHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        match self.object_type() {
            Ok(object_type) => write!(f, " ({object_type:?})"),
            Err(_) => write!(f, " (type {})", self.type_bits()),
        }
    }
}

/// Object embedded in a save, carried as opaque payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedObject {
    pub header: ObjectHeader,
    pub data: Vec<u8>,
}

impl PackedObject {
    pub fn object_type(&self) -> Result<ObjectType, S5Error> {
        self.header.object_type()
    }

    pub fn verify_checksum(&self) -> bool {
        self.header.verify_checksum(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(flags: u32, name: &[u8; 8], checksum: u32) -> ObjectHeader {
        ObjectHeader {
            flags,
            name: *name,
            checksum,
        }
    }

    #[test]
    fn test_layout_roundtrip() {
        let original = header(0x0000_0097, b"STEAM1  ", 0xDEAD_BEEF);
        let bytes = original.to_bytes();
        assert_eq!(&bytes[..4], &[0x97, 0, 0, 0]);
        assert_eq!(&bytes[4..12], b"STEAM1  ");
        assert_eq!(&bytes[12..], &[0xEF, 0xBE, 0xAD, 0xDE]);

        let parsed = ObjectHeader::from_bytes(&bytes).unwrap().unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.object_type().unwrap(), ObjectType::Vehicle);
        assert_eq!(parsed.source_game(), SourceGame::Vanilla);
        assert_eq!(parsed.name(), "STEAM1");
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(ObjectHeader::from_bytes(&[0xFF; 16]).unwrap().is_none());
        assert_eq!(ObjectHeader::slot_bytes(None), [0xFF; 16]);

        // One byte away from the sentinel is a real header
        let mut bytes = [0xFF; 16];
        bytes[15] = 0xFE;
        assert!(ObjectHeader::from_bytes(&bytes).unwrap().is_some());
    }

    #[test]
    fn test_wrong_size() {
        assert!(matches!(
            ObjectHeader::from_bytes(&[0; 15]),
            Err(S5Error::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(ObjectType::try_from(0).unwrap(), ObjectType::InterfaceSkin);
        assert_eq!(ObjectType::try_from(33).unwrap(), ObjectType::ScenarioText);
        assert!(matches!(
            ObjectType::try_from(34),
            Err(S5Error::UnknownObjectType(34))
        ));
        assert!(matches!(
            header(0x3F, b"BAD     ", 0).object_type(),
            Err(S5Error::UnknownObjectType(63))
        ));
    }

    #[test]
    fn test_custom_equality_ignores_reserved_bits() {
        let a = header(0x0000_0011, b"TRACK   ", 1);
        let b = header(0x1234_5611, b"TRACK   ", 1);
        assert!(a.is_custom() && b.is_custom());
        assert_eq!(a, b);

        let c = header(0x0000_0091, b"TRACK   ", 1);
        let d = header(0x1234_5691, b"TRACK   ", 1);
        assert_ne!(c, d);

        assert_ne!(a, header(0x0000_0011, b"TRACK2  ", 1));
        assert_ne!(a, header(0x0000_0011, b"TRACK   ", 2));
    }

    #[test]
    fn test_best_encoding() {
        assert_eq!(
            ObjectType::Competitor.best_encoding(),
            SawyerEncoding::Uncompressed
        );
        assert_eq!(
            ObjectType::Currency.best_encoding(),
            SawyerEncoding::RunLengthMulti
        );
        assert_eq!(ObjectType::TownNames.best_encoding(), SawyerEncoding::Rotate);
        assert_eq!(
            ObjectType::ScenarioText.best_encoding(),
            SawyerEncoding::Rotate
        );
        assert_eq!(
            ObjectType::Vehicle.best_encoding(),
            SawyerEncoding::RunLengthSingle
        );
    }

    #[test]
    fn test_checksum_covers_flag_byte_name_and_data() {
        let data = b"payload".to_vec();
        let object = ObjectHeader::for_data(ObjectType::Cargo, SourceGame::Custom, "GOODS", &data);
        assert_eq!(&object.name, b"GOODS   ");
        assert!(object.verify_checksum(&data));
        assert!(!object.verify_checksum(b"payloae"));

        let expected = object_checksum(
            object_checksum(object_checksum(OBJECT_CHECKSUM_SEED, &[0x08]), b"GOODS   "),
            b"payload",
        );
        assert_eq!(object.checksum, expected);

        // Flag bytes 1-3 are outside the checksum
        let mut shifted = object;
        shifted.flags |= 0x0100;
        assert!(shifted.verify_checksum(&data));

        let mut renamed = object;
        renamed.name[0] = b'H';
        assert!(!renamed.verify_checksum(&data));
    }

    #[test]
    fn test_display() {
        let object = header(0x0000_0008, b"GOODS   ", 0);
        assert_eq!(object.to_string(), "GOODS (Cargo)");
        assert_eq!(header(0x3E, b"X       ", 0).to_string(), "X (type 62)");
    }
}
