//! Rewriting files with every chunk stored uncompressed

use std::io::Cursor;
use std::path::Path;

use crate::S5Error;
use crate::load::import_save;
use crate::save::{SaveEncoding, export_save};

/// Decode `bytes` and re-encode them with uncompressed chunks.
pub fn uncompress(bytes: &[u8]) -> Result<Vec<u8>, S5Error> {
    let file = import_save(Cursor::new(bytes))?;
    export_save(&file, Vec::new(), SaveEncoding::Uncompressed)
}

/// Uncompress `input` into `output`. The two may be the same path; the input
/// is read completely before anything is written.
pub fn uncompress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), S5Error> {
    let input = input.as_ref();
    let output = output.as_ref();
    let bytes = std::fs::read(input)?;
    let uncompressed = uncompress(&bytes)?;
    std::fs::write(output, &uncompressed)?;
    tracing::info!(
        "Uncompressed {} ({} -> {} bytes)",
        input.display(),
        bytes.len(),
        uncompressed.len()
    );
    Ok(())
}
