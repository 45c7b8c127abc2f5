//! Compare command - report decoded chunks that differ between two files

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use loco_s5::{CompareMode, compare_files, import_save_from_path};

/// Arguments for the compare command
#[derive(Args)]
pub struct CompareArgs {
    pub left: PathBuf,

    pub right: PathBuf,

    /// Report every differing chunk instead of stopping at the first
    #[arg(short, long)]
    pub all: bool,
}

/// Execute the compare command. Returns whether the files hold the same data.
pub fn execute(args: CompareArgs) -> Result<bool> {
    let left = import_save_from_path(&args.left)
        .with_context(|| format!("Failed to load {}", args.left.display()))?;
    let right = import_save_from_path(&args.right)
        .with_context(|| format!("Failed to load {}", args.right.display()))?;

    let mode = if args.all {
        CompareMode::All
    } else {
        CompareMode::FirstDifference
    };
    let diffs = compare_files(&left, &right, mode).context("Failed to compare files")?;

    if diffs.is_empty() {
        println!("Files are identical");
        return Ok(true);
    }
    for diff in &diffs {
        println!("{}", diff);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loco_s5::{
        ObjectHeader, ObjectType, PackedObject, S5File, SaveEncoding, SourceGame,
        export_save_to_path,
    };

    fn pack(data: Vec<u8>) -> S5File {
        let header = ObjectHeader::for_data(ObjectType::Sound, SourceGame::Custom, "HORN", &data);
        S5File::object_pack(vec![PackedObject { header, data }])
    }

    #[test]
    fn test_compare_ignores_chunk_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.dat");
        let b = dir.path().join("b.dat");
        export_save_to_path(&pack(vec![4; 64]), &a, SaveEncoding::Compressed).unwrap();
        export_save_to_path(&pack(vec![4; 64]), &b, SaveEncoding::Uncompressed).unwrap();

        let args = CompareArgs {
            left: a,
            right: b,
            all: true,
        };
        assert!(execute(args).unwrap());
    }

    #[test]
    fn test_compare_reports_difference() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.dat");
        let b = dir.path().join("b.dat");
        export_save_to_path(&pack(vec![4; 64]), &a, SaveEncoding::Compressed).unwrap();
        export_save_to_path(&pack(vec![5; 64]), &b, SaveEncoding::Compressed).unwrap();

        let args = CompareArgs {
            left: a,
            right: b,
            all: false,
        };
        assert!(!execute(args).unwrap());
    }

    #[test]
    fn test_compare_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = CompareArgs {
            left: dir.path().join("a.dat"),
            right: dir.path().join("b.dat"),
            all: false,
        };
        assert!(execute(args).is_err());
    }
}
