//! Info command - print a summary of a file

use anyhow::{Context, Result};
use clap::Args;
use std::fmt;
use std::path::PathBuf;

use loco_s5::{HeaderFlags, S5File, import_save_from_path};

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Save, scenario, landscape or object file
    pub path: PathBuf,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let file = import_save_from_path(&args.path)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;
    let mut text = String::new();
    describe(&file, &mut text)?;
    print!("{}", text);
    Ok(())
}

fn describe(file: &S5File, out: &mut impl fmt::Write) -> fmt::Result {
    let header = &file.header;

    writeln!(out, "Type:     {}", header.s5_type)?;
    writeln!(out, "Version:  {:#X}", header.version)?;
    writeln!(out, "Flags:    {}", flag_names(header.flags))?;

    if let Some(details) = &file.save_details {
        writeln!(out, "Company:  {}", details.company_name())?;
        writeln!(out, "Owner:    {}", details.owner_name())?;
        writeln!(out, "Scenario: {}", details.scenario_name())?;
        writeln!(out, "Date:     day {}", details.date)?;
    }

    if let Some(options) = &file.scenario_options {
        writeln!(out, "Name:     {}", options.scenario_name())?;
        writeln!(out, "Start:    {}", options.start_year())?;
    }

    if let Some(content) = &file.content {
        let required = content
            .required_objects
            .iter()
            .filter(|slot| slot.is_some())
            .count();
        writeln!(out, "Required: {} objects", required)?;
        if let Some(ticks) = content.game_state.scenario_ticks() {
            writeln!(out, "Ticks:    {}", ticks)?;
        }
        if content.game_state.is_legacy_layout() {
            writeln!(out, "Layout:   legacy")?;
        }
        match &content.tile_elements {
            Some(tiles) => {
                let count = loco_s5::game_state::tile_element_count(tiles);
                writeln!(out, "Tiles:    {} elements", count)?;
            }
            None => {
                writeln!(out, "Tiles:    not generated")?;
            }
        }
    }

    writeln!(out, "Packed:   {} objects", file.packed_objects.len())?;
    for object in &file.packed_objects {
        let kind = object
            .object_type()
            .map(|t| format!("{:?}", t))
            .unwrap_or_else(|_| "?".to_string());
        writeln!(
            out,
            "  {:<8} {:<14} {} bytes",
            object.header.name(),
            kind,
            object.data.len()
        )?;
    }
    Ok(())
}

fn flag_names(flags: HeaderFlags) -> String {
    if flags.is_empty() {
        return "none".to_string();
    }
    let names: Vec<&str> = flags.iter_names().map(|(name, _)| name).collect();
    let unknown = flags.bits() & !HeaderFlags::all().bits();
    if unknown != 0 {
        format!("{} (+{:#04X})", names.join(" | "), unknown)
    } else {
        names.join(" | ")
    }
}
