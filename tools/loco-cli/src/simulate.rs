//! Simulate command - load a file, advance it and optionally save it
//!
//! Failures are logged rather than returned; the command always succeeds so
//! it can be used in batch runs over many saves.

use clap::Args;
use std::path::{Path, PathBuf};

use loco_s5::{CURRENT_VERSION, GameState, S5Error, S5File, SaveEncoding};

use crate::config::Config;

/// Arguments for the simulate command
#[derive(Args)]
pub struct SimulateArgs {
    /// Save, scenario or landscape to load
    pub path: PathBuf,

    /// Number of ticks to run
    pub ticks: u32,

    /// Save the result here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Store the output uncompressed regardless of config
    #[arg(long)]
    pub uncompressed: bool,
}

/// Something that advances a game state by one tick
pub trait Simulation {
    fn tick(&mut self, state: &mut GameState) -> Result<(), S5Error>;
}

/// Advances the scenario tick counters and nothing else
#[derive(Debug, Default)]
pub struct TickCounter;

impl Simulation for TickCounter {
    fn tick(&mut self, state: &mut GameState) -> Result<(), S5Error> {
        let ticks = state.scenario_ticks().unwrap_or(0);
        state.set_scenario_ticks(ticks.wrapping_add(1))?;
        let ticks2 = state.scenario_ticks2().unwrap_or(0);
        state.set_scenario_ticks2(ticks2.wrapping_add(1))
    }
}

/// Execute the simulate command
pub fn execute(args: SimulateArgs, config: &Config) {
    let mut file = match loco_s5::import_save_from_path(&args.path) {
        Ok(file) => file,
        Err(err) => {
            tracing::error!("Unable to simulate {}: {}", args.path.display(), err);
            return;
        }
    };
    if file.header.version != CURRENT_VERSION {
        tracing::warn!(
            "{} has version {:#X}, expected {:#X}",
            args.path.display(),
            file.header.version,
            CURRENT_VERSION
        );
    }

    tracing::info!("File loaded. Starting simulation.");
    let completed = advance(&mut file, args.ticks, &mut TickCounter);
    println!("Simulated {} of {} ticks", completed, args.ticks);

    if let Some(output) = &args.output {
        let encoding = if args.uncompressed || !config.save.compress {
            SaveEncoding::Uncompressed
        } else {
            SaveEncoding::Compressed
        };
        save(&file, output, encoding);
    }
}

/// Run up to `ticks` ticks, returning how many completed.
pub fn advance(file: &mut S5File, ticks: u32, simulation: &mut impl Simulation) -> u32 {
    let Some(content) = file.content.as_mut() else {
        tracing::warn!("{} has no game state to simulate", file.header.s5_type);
        return 0;
    };
    for tick in 0..ticks {
        if let Err(err) = simulation.tick(&mut content.game_state) {
            tracing::error!("Simulation stopped at tick {}: {}", tick, err);
            return tick;
        }
    }
    ticks
}

fn save(file: &S5File, output: &Path, encoding: SaveEncoding) {
    if let Err(err) = loco_s5::export_save_to_path(file, output, encoding) {
        tracing::error!("Unable to save {}: {}", output.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loco_s5::{
        GameContent, Header, REQUIRED_OBJECT_COUNT, S5Type, export_save_to_path,
        import_save_from_path,
    };

    fn scenario() -> S5File {
        S5File {
            header: Header::new(S5Type::Scenario),
            save_details: None,
            scenario_options: Some(Default::default()),
            packed_objects: Vec::new(),
            content: Some(GameContent {
                required_objects: vec![None; REQUIRED_OBJECT_COUNT],
                game_state: GameState::new_scenario(),
                tile_elements: None,
            }),
        }
    }

    #[test]
    fn test_tick_counter() {
        let mut file = scenario();
        assert_eq!(advance(&mut file, 25, &mut TickCounter), 25);
        let state = &file.content.as_ref().unwrap().game_state;
        assert_eq!(state.scenario_ticks(), Some(25));
        assert_eq!(state.scenario_ticks2(), Some(25));
    }

    #[test]
    fn test_short_state_stops_early() {
        let mut file = scenario();
        file.content.as_mut().unwrap().game_state = GameState::Whole(vec![0; 16]);
        assert_eq!(advance(&mut file, 10, &mut TickCounter), 0);
    }

    #[test]
    fn test_object_pack_has_nothing_to_run() {
        let mut file = S5File::object_pack(Vec::new());
        assert_eq!(advance(&mut file, 10, &mut TickCounter), 0);
    }

    #[test]
    fn test_execute_saves_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.sc5");
        let output = dir.path().join("out.sc5");
        export_save_to_path(&scenario(), &input, SaveEncoding::Compressed).unwrap();

        let args = SimulateArgs {
            path: input,
            ticks: 3,
            output: Some(output.clone()),
            uncompressed: true,
        };
        execute(args, &Config::default());

        let saved = import_save_from_path(&output).unwrap();
        let state = &saved.content.unwrap().game_state;
        assert_eq!(state.scenario_ticks(), Some(3));
    }

    #[test]
    fn test_execute_missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.sv5");
        let args = SimulateArgs {
            path: dir.path().join("missing.sv5"),
            ticks: 1,
            output: Some(output.clone()),
            uncompressed: false,
        };
        execute(args, &Config::default());
        assert!(!output.exists());
    }
}
