//! In-memory S5 file
//!
//! ```text
//! header                                  chunk
//! save details        if HAS_SAVE_DETAILS chunk
//! scenario options    if scenario         chunk
//! packed objects      × numPackedObjects  raw header + chunk
//! required objects    unless objects      chunk
//! game state          unless objects      1 chunk, or 3 for scenarios
//! tile elements       unless objects      chunk (scenarios: only if loaded)
//! checksum                                u32
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::game_state::GameState;
use crate::header::{Header, HeaderFlags, S5Type};
use crate::object::{OBJECT_HEADER_SIZE, ObjectHeader, PackedObject};
use crate::options::ScenarioOptions;
use crate::save_details::SaveDetails;
use crate::S5Error;

/// Slots in the required-objects table
pub const REQUIRED_OBJECT_COUNT: usize = 859;

pub const REQUIRED_OBJECTS_SIZE: usize = REQUIRED_OBJECT_COUNT * OBJECT_HEADER_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S5File {
    pub header: Header,
    pub save_details: Option<SaveDetails>,
    pub scenario_options: Option<ScenarioOptions>,
    pub packed_objects: Vec<PackedObject>,
    /// Absent for object packs
    pub content: Option<GameContent>,
}

/// Everything after the packed objects in a save, scenario or landscape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameContent {
    pub required_objects: Vec<Option<ObjectHeader>>,
    pub game_state: GameState,
    /// Absent in scenarios saved before the map was generated
    pub tile_elements: Option<Vec<u8>>,
}

impl GameContent {
    pub fn required_objects_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(REQUIRED_OBJECTS_SIZE);
        for slot in &self.required_objects {
            out.extend_from_slice(&ObjectHeader::slot_bytes(slot.as_ref()));
        }
        out
    }

    pub fn parse_required_objects(bytes: &[u8]) -> Result<Vec<Option<ObjectHeader>>, S5Error> {
        if bytes.len() != REQUIRED_OBJECTS_SIZE {
            return Err(S5Error::record_size(
                "required objects",
                REQUIRED_OBJECTS_SIZE,
                bytes.len(),
            ));
        }
        bytes
            .chunks_exact(OBJECT_HEADER_SIZE)
            .map(ObjectHeader::from_bytes)
            .collect()
    }
}

/// One unit of the file in stream order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    SaveDetails,
    ScenarioOptions,
    /// Raw 16-byte record, not chunk-wrapped
    PackedObjectHeader(usize),
    PackedObject(usize),
    RequiredObjects,
    /// Game state chunk; scenarios have three
    GameState(usize),
    TileElements,
}

impl SectionKind {
    pub fn is_chunk(self) -> bool {
        !matches!(self, SectionKind::PackedObjectHeader(_))
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Header => f.write_str("header"),
            SectionKind::SaveDetails => f.write_str("save details"),
            SectionKind::ScenarioOptions => f.write_str("scenario options"),
            SectionKind::PackedObjectHeader(i) => write!(f, "packed object {i} header"),
            SectionKind::PackedObject(i) => write!(f, "packed object {i}"),
            SectionKind::RequiredObjects => f.write_str("required objects"),
            SectionKind::GameState(i) => write!(f, "game state chunk {i}"),
            SectionKind::TileElements => f.write_str("tile elements"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub data: Cow<'a, [u8]>,
}

impl S5File {
    /// Object pack holding `objects`
    pub fn object_pack(objects: Vec<PackedObject>) -> Self {
        Self {
            header: Header::new(S5Type::Objects),
            save_details: None,
            scenario_options: None,
            packed_objects: objects,
            content: None,
        }
    }

    pub fn s5_type(&self) -> S5Type {
        self.header.s5_type
    }

    /// Header as written: packed object count and save-details flag follow
    /// the file contents.
    pub fn effective_header(&self) -> Result<Header, S5Error> {
        let mut header = self.header.clone();
        header.num_packed_objects =
            u16::try_from(self.packed_objects.len()).map_err(|_| S5Error::InvalidRecord {
                record: "header",
                reason: format!("{} packed objects exceed the u16 count", self.packed_objects.len()),
            })?;
        header
            .flags
            .set(HeaderFlags::HAS_SAVE_DETAILS, self.save_details.is_some());
        Ok(header)
    }

    /// Decoded sections in stream order.
    pub fn sections(&self) -> Result<Vec<Section<'_>>, S5Error> {
        let header = self.effective_header()?;
        let mut sections = vec![Section {
            kind: SectionKind::Header,
            data: Cow::Owned(header.to_bytes()),
        }];

        if let Some(details) = &self.save_details {
            sections.push(Section {
                kind: SectionKind::SaveDetails,
                data: Cow::Owned(details.to_bytes()),
            });
        }

        if header.s5_type == S5Type::Scenario {
            let options = self.scenario_options.as_ref().ok_or_else(|| S5Error::InvalidRecord {
                record: "scenario options",
                reason: "scenario has no options".to_string(),
            })?;
            sections.push(Section {
                kind: SectionKind::ScenarioOptions,
                data: Cow::Borrowed(options.as_bytes()),
            });
        }

        for (index, object) in self.packed_objects.iter().enumerate() {
            sections.push(Section {
                kind: SectionKind::PackedObjectHeader(index),
                data: Cow::Owned(object.header.to_bytes().to_vec()),
            });
            sections.push(Section {
                kind: SectionKind::PackedObject(index),
                data: Cow::Borrowed(&object.data),
            });
        }

        if !header.s5_type.has_game_content() {
            return Ok(sections);
        }

        let content = self.content.as_ref().ok_or_else(|| S5Error::InvalidRecord {
            record: "game content",
            reason: format!("{} has no game state", header.s5_type),
        })?;

        sections.push(Section {
            kind: SectionKind::RequiredObjects,
            data: Cow::Owned(content.required_objects_bytes()),
        });
        for (index, chunk) in content.game_state.chunks().into_iter().enumerate() {
            sections.push(Section {
                kind: SectionKind::GameState(index),
                data: Cow::Borrowed(chunk),
            });
        }

        let has_tiles = header.s5_type != S5Type::Scenario || content.game_state.tile_manager_loaded();
        if has_tiles {
            let tiles = content.tile_elements.as_deref().unwrap_or_default();
            sections.push(Section {
                kind: SectionKind::TileElements,
                data: Cow::Borrowed(tiles),
            });
        }

        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectType, SourceGame};

    fn kinds(file: &S5File) -> Vec<SectionKind> {
        file.sections().unwrap().iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_object_pack_sections() {
        let data = vec![1, 2, 3];
        let header = ObjectHeader::for_data(ObjectType::Tree, SourceGame::Custom, "OAK", &data);
        let file = S5File::object_pack(vec![PackedObject { header, data }]);
        assert_eq!(
            kinds(&file),
            vec![
                SectionKind::Header,
                SectionKind::PackedObjectHeader(0),
                SectionKind::PackedObject(0)
            ]
        );
        let sections = file.sections().unwrap();
        // Packed count is taken from the object list
        assert_eq!(&sections[0].data[2..4], &[1, 0]);
    }

    #[test]
    fn test_scenario_sections() {
        let mut file = S5File {
            header: Header::new(S5Type::Scenario),
            save_details: Some(SaveDetails::default()),
            scenario_options: Some(ScenarioOptions::default()),
            packed_objects: Vec::new(),
            content: Some(GameContent {
                required_objects: vec![None; REQUIRED_OBJECT_COUNT],
                game_state: GameState::new_scenario(),
                tile_elements: Some(vec![0; 16]),
            }),
        };
        // No tiles until the tile manager flag is set
        assert_eq!(
            kinds(&file),
            vec![
                SectionKind::Header,
                SectionKind::SaveDetails,
                SectionKind::ScenarioOptions,
                SectionKind::RequiredObjects,
                SectionKind::GameState(0),
                SectionKind::GameState(1),
                SectionKind::GameState(2),
            ]
        );
        assert!(file.sections().unwrap()[0].data[1] & HeaderFlags::HAS_SAVE_DETAILS.bits() != 0);

        if let Some(content) = &mut file.content {
            content
                .game_state
                .set_flags(crate::game_state::GameStateFlags::TILE_MANAGER_LOADED)
                .unwrap();
        }
        assert_eq!(kinds(&file).last(), Some(&SectionKind::TileElements));
    }

    #[test]
    fn test_missing_parts_rejected() {
        let mut file = S5File::object_pack(Vec::new());
        file.header.s5_type = S5Type::SavedGame;
        assert!(matches!(
            file.sections(),
            Err(S5Error::InvalidRecord {
                record: "game content",
                ..
            })
        ));

        file.header.s5_type = S5Type::Scenario;
        assert!(matches!(
            file.sections(),
            Err(S5Error::InvalidRecord {
                record: "scenario options",
                ..
            })
        ));
    }

    #[test]
    fn test_required_objects_roundtrip() {
        let mut bytes = vec![0xFF; REQUIRED_OBJECTS_SIZE];
        bytes[16..20].copy_from_slice(&0x97u32.to_le_bytes());
        bytes[20..28].copy_from_slice(b"LOCO    ");
        let slots = GameContent::parse_required_objects(&bytes).unwrap();
        assert_eq!(slots.len(), REQUIRED_OBJECT_COUNT);
        assert!(slots[0].is_none());
        assert_eq!(slots[1].unwrap().name(), "LOCO");

        let content = GameContent {
            required_objects: slots,
            game_state: GameState::Whole(Vec::new()),
            tile_elements: None,
        };
        assert_eq!(content.required_objects_bytes(), bytes);
        assert!(GameContent::parse_required_objects(&bytes[1..]).is_err());
    }
}
