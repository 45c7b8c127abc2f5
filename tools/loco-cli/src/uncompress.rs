//! Uncompress command - rewrite a file with uncompressed chunks
//!
//! Writes back to the input path unless `--output` is given. The whole input
//! is read before anything is written.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Arguments for the uncompress command
#[derive(Args)]
pub struct UncompressArgs {
    /// Save, scenario, landscape or object file
    pub path: PathBuf,

    /// Write here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Copy the input to <path>.bak before overwriting it
    #[arg(long)]
    pub keep_backup: bool,
}

/// Execute the uncompress command
pub fn execute(args: UncompressArgs, config: &Config) -> Result<()> {
    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let uncompressed = loco_s5::uncompress(&bytes)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;

    let output = args.output.as_deref().unwrap_or(&args.path);
    let in_place = output == args.path.as_path();
    if in_place && (args.keep_backup || config.uncompress.keep_backup) {
        let backup = backup_path(&args.path);
        std::fs::write(&backup, &bytes)
            .with_context(|| format!("Failed to write backup {}", backup.display()))?;
        tracing::info!("Backup written to {}", backup.display());
    }

    std::fs::write(output, &uncompressed)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Uncompressed {} ({} -> {} bytes)",
        output.display(),
        bytes.len(),
        uncompressed.len()
    );
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}
