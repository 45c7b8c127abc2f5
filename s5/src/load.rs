//! Loading S5 files

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use loco_sawyer::SawyerStreamReader;

use crate::S5Error;
use crate::file::{GameContent, REQUIRED_OBJECTS_SIZE, S5File};
use crate::game_state::{
    GAME_STATE_SIZE, GENERAL_STATE_SIZE, GameState, SCENARIO_ANIMATIONS_SIZE,
    SCENARIO_TOWNS_SIZE,
};
use crate::header::{CURRENT_VERSION, HEADER_SIZE, Header, HeaderFlags, S5Type};
use crate::object::{OBJECT_HEADER_SIZE, ObjectHeader, PackedObject};
use crate::options::{SCENARIO_OPTIONS_SIZE, ScenarioOptions};
use crate::save_details::{SAVE_DETAILS_SIZE, SaveDetails};

/// Load a complete S5 file from a seekable stream.
///
/// The trailing checksum is verified before anything else is decoded.
pub fn import_save<R: Read + Seek>(stream: R) -> Result<S5File, S5Error> {
    let mut reader = SawyerStreamReader::new(stream)?;
    reader.validate_checksum()?;

    let header = read_header(&mut reader)?;
    tracing::debug!(
        s5_type = %header.s5_type,
        flags = header.flags.bits(),
        packed = header.num_packed_objects,
        version = header.version,
        "read header"
    );

    let save_details = if header.has_flags(HeaderFlags::HAS_SAVE_DETAILS) {
        Some(read_save_details_chunk(&mut reader)?)
    } else {
        None
    };

    let scenario_options = if header.s5_type == S5Type::Scenario {
        Some(read_scenario_options_chunk(&mut reader)?)
    } else {
        None
    };

    let mut packed_objects = Vec::with_capacity(usize::from(header.num_packed_objects));
    for index in 0..header.num_packed_objects {
        let object = read_packed_object(&mut reader)?;
        if !object.verify_checksum() {
            tracing::warn!(
                "Packed object {} ({}) has a bad checksum",
                index,
                object.header
            );
        }
        packed_objects.push(object);
    }

    let content = if header.s5_type.has_game_content() {
        Some(read_game_content(&mut reader, header.s5_type)?)
    } else {
        None
    };

    if !reader.is_at_end()? {
        let position = reader.position()?;
        tracing::warn!(
            "Ignoring {} trailing bytes",
            reader.len().saturating_sub(position + loco_sawyer::CHECKSUM_SIZE as u64)
        );
    }

    tracing::info!(
        "Loaded {} with {} packed objects",
        header.s5_type,
        packed_objects.len()
    );

    Ok(S5File {
        header,
        save_details,
        scenario_options,
        packed_objects,
        content,
    })
}

/// Load an S5 file from disk.
pub fn import_save_from_path(path: impl AsRef<Path>) -> Result<S5File, S5Error> {
    let file = File::open(path.as_ref())?;
    import_save(BufReader::new(file))
}

/// Read only the header and save details of a file.
///
/// Returns `None` when the file has no save details, or is a raw, dump or
/// title sequence file.
pub fn read_save_details(path: impl AsRef<Path>) -> Result<Option<SaveDetails>, S5Error> {
    let mut reader = SawyerStreamReader::open(path)?;
    reader.validate_checksum()?;
    let header = read_current_header(&mut reader)?;
    let no_preview = HeaderFlags::IS_RAW | HeaderFlags::IS_DUMP | HeaderFlags::IS_TITLE_SEQUENCE;
    if header.flags.intersects(no_preview) || !header.has_flags(HeaderFlags::HAS_SAVE_DETAILS) {
        return Ok(None);
    }
    read_save_details_chunk(&mut reader).map(Some)
}

/// Read only the scenario options of a file.
///
/// Returns `None` for anything other than a scenario.
pub fn read_scenario_options(path: impl AsRef<Path>) -> Result<Option<ScenarioOptions>, S5Error> {
    let mut reader = SawyerStreamReader::open(path)?;
    reader.validate_checksum()?;
    let header = read_current_header(&mut reader)?;
    if header.s5_type != S5Type::Scenario {
        return Ok(None);
    }
    if header.has_flags(HeaderFlags::HAS_SAVE_DETAILS) {
        // Skip over the details chunk
        reader.read_chunk()?;
    }
    read_scenario_options_chunk(&mut reader).map(Some)
}

fn read_header<R: Read + Seek>(reader: &mut SawyerStreamReader<R>) -> Result<Header, S5Error> {
    let mut bytes = [0u8; HEADER_SIZE];
    reader.read_chunk_into(&mut bytes)?;
    Header::from_bytes(&bytes)
}

fn read_current_header<R: Read + Seek>(
    reader: &mut SawyerStreamReader<R>,
) -> Result<Header, S5Error> {
    let header = read_header(reader)?;
    if header.version != CURRENT_VERSION {
        return Err(S5Error::UnsupportedVersion(header.version));
    }
    Ok(header)
}

fn read_save_details_chunk<R: Read + Seek>(
    reader: &mut SawyerStreamReader<R>,
) -> Result<SaveDetails, S5Error> {
    let mut bytes = vec![0u8; SAVE_DETAILS_SIZE];
    reader.read_chunk_into(&mut bytes)?;
    SaveDetails::from_bytes(&bytes)
}

fn read_scenario_options_chunk<R: Read + Seek>(
    reader: &mut SawyerStreamReader<R>,
) -> Result<ScenarioOptions, S5Error> {
    let mut bytes = vec![0u8; SCENARIO_OPTIONS_SIZE];
    reader.read_chunk_into(&mut bytes)?;
    ScenarioOptions::from_bytes(&bytes)
}

fn read_packed_object<R: Read + Seek>(
    reader: &mut SawyerStreamReader<R>,
) -> Result<PackedObject, S5Error> {
    let mut raw = [0u8; OBJECT_HEADER_SIZE];
    reader.read(&mut raw)?;
    let header = ObjectHeader::from_bytes(&raw)?.ok_or_else(|| S5Error::InvalidRecord {
        record: "packed object header",
        reason: "empty object slot".to_string(),
    })?;
    header.object_type()?;

    let data = reader.read_chunk()?;
    tracing::debug!(name = %header.name(), size = data.len(), "read packed object");
    Ok(PackedObject { header, data })
}

fn read_game_content<R: Read + Seek>(
    reader: &mut SawyerStreamReader<R>,
    s5_type: S5Type,
) -> Result<GameContent, S5Error> {
    let mut required = vec![0u8; REQUIRED_OBJECTS_SIZE];
    reader.read_chunk_into(&mut required)?;
    let required_objects = GameContent::parse_required_objects(&required)?;

    let game_state = if s5_type == S5Type::Scenario {
        let mut general = vec![0u8; GENERAL_STATE_SIZE];
        let mut towns = vec![0u8; SCENARIO_TOWNS_SIZE];
        let mut animations = vec![0u8; SCENARIO_ANIMATIONS_SIZE];
        reader.read_chunk_into(&mut general)?;
        reader.read_chunk_into(&mut towns)?;
        reader.read_chunk_into(&mut animations)?;
        GameState::Scenario {
            general,
            towns,
            animations,
        }
    } else {
        // Older layouts are shorter than the current one
        let bytes = reader.read_chunk()?;
        if bytes.len() > GAME_STATE_SIZE {
            return Err(S5Error::record_size("game state", GAME_STATE_SIZE, bytes.len()));
        }
        GameState::Whole(bytes)
    };

    if game_state.is_legacy_layout() {
        tracing::debug!("game state uses a legacy layout");
    }

    let has_tiles = s5_type != S5Type::Scenario || game_state.tile_manager_loaded();
    let tile_elements = if has_tiles {
        Some(reader.read_chunk()?)
    } else {
        None
    };

    Ok(GameContent {
        required_objects,
        game_state,
        tile_elements,
    })
}
