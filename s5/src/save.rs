//! Saving S5 files

use std::io::Write;
use std::path::Path;

use loco_sawyer::{SawyerEncoding, SawyerStreamWriter};

use crate::S5Error;
use crate::file::{S5File, SectionKind};

/// How chunks are encoded on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveEncoding {
    /// Per-section encodings matching the game's own saves
    #[default]
    Compressed,
    /// Every chunk stored as-is
    Uncompressed,
}

impl SaveEncoding {
    /// Encoding for one section of `file`.
    pub fn encoding_for(self, file: &S5File, kind: SectionKind) -> Result<SawyerEncoding, S5Error> {
        if self == SaveEncoding::Uncompressed {
            return Ok(SawyerEncoding::Uncompressed);
        }
        Ok(match kind {
            SectionKind::Header
            | SectionKind::SaveDetails
            | SectionKind::ScenarioOptions
            | SectionKind::RequiredObjects => SawyerEncoding::Rotate,
            SectionKind::PackedObject(index) | SectionKind::PackedObjectHeader(index) => {
                let object = file.packed_objects.get(index).ok_or_else(|| {
                    S5Error::InvalidRecord {
                        record: "packed object",
                        reason: format!("no packed object {index}"),
                    }
                })?;
                object.object_type()?.best_encoding()
            }
            SectionKind::GameState(_) => SawyerEncoding::RunLengthSingle,
            SectionKind::TileElements => SawyerEncoding::RunLengthMulti,
        })
    }
}

/// Write `file` to `stream`, returning the stream once the checksum is
/// appended and flushed.
pub fn export_save<W: Write>(
    file: &S5File,
    stream: W,
    encoding: SaveEncoding,
) -> Result<W, S5Error> {
    let mut writer = SawyerStreamWriter::new(stream);
    write_sections(file, &mut writer, encoding)?;
    writer.write_checksum()?;
    let bytes = writer.bytes_written();
    let stream = writer.close()?;
    tracing::info!(
        "Saved {} ({} bytes, {:?})",
        file.s5_type(),
        bytes,
        encoding
    );
    Ok(stream)
}

/// Write `file` to disk, replacing anything already at `path`.
///
/// The file is encoded in memory first; `path` is left alone if encoding
/// fails.
pub fn export_save_to_path(
    file: &S5File,
    path: impl AsRef<Path>,
    encoding: SaveEncoding,
) -> Result<(), S5Error> {
    let path = path.as_ref();
    let bytes = export_save(file, Vec::new(), encoding)?;
    std::fs::write(path, bytes)?;
    tracing::info!("Saved {} to {}", file.s5_type(), path.display());
    Ok(())
}

fn write_sections<W: Write>(
    file: &S5File,
    writer: &mut SawyerStreamWriter<W>,
    encoding: SaveEncoding,
) -> Result<(), S5Error> {
    for section in file.sections()? {
        if section.kind.is_chunk() {
            let chunk_encoding = encoding.encoding_for(file, section.kind)?;
            writer.write_chunk(chunk_encoding, &section.data)?;
        } else {
            writer.write(&section.data)?;
        }
    }
    Ok(())
}
