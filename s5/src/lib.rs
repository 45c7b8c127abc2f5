//! Loco-S5: Locomotion save, scenario, landscape and object-pack files
//!
//! An S5 file is a Sawyer stream (see [`loco_sawyer`]) holding a fixed
//! sequence of records. The header decides which records follow:
//!
//! ```text
//! ┌──────────────────────────┬──────┬──────────┬────────┬───────────┐
//! │ record                   │ save │ scenario │ object │ landscape │
//! ├──────────────────────────┼──────┼──────────┼────────┼───────────┤
//! │ header                   │  ✓   │    ✓     │   ✓    │     ✓     │
//! │ save details (flag)      │  ?   │    ?     │   ?    │     ?     │
//! │ scenario options         │      │    ✓     │        │           │
//! │ packed objects           │  ✓   │    ✓     │   ✓    │     ✓     │
//! │ required objects         │  ✓   │    ✓     │        │     ✓     │
//! │ game state               │  1   │    3     │        │     1     │
//! │ tile elements            │  ✓   │    ?     │        │     ✓     │
//! └──────────────────────────┴──────┴──────────┴────────┴───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::io::Cursor;
//! use loco_s5::{S5File, SaveEncoding, export_save, import_save};
//!
//! let pack = S5File::object_pack(Vec::new());
//! let bytes = export_save(&pack, Vec::new(), SaveEncoding::Compressed).unwrap();
//! let loaded = import_save(Cursor::new(bytes)).unwrap();
//! assert!(loaded.packed_objects.is_empty());
//! ```

pub mod compare;
mod error;
pub mod file;
pub mod game_state;
pub mod header;
pub mod load;
pub mod object;
pub mod options;
pub mod save;
pub mod save_details;
pub mod uncompress;

pub use compare::{CompareMode, Difference, SectionDiff, compare_files};
pub use error::S5Error;
pub use file::{GameContent, REQUIRED_OBJECT_COUNT, S5File, Section, SectionKind};
pub use game_state::{GameState, GameStateFlags, UnlockedVehicles};
pub use header::{CURRENT_VERSION, Header, HeaderFlags, S5Type};
pub use load::{import_save, import_save_from_path, read_save_details, read_scenario_options};
pub use object::{ObjectHeader, ObjectType, PackedObject, SourceGame};
pub use options::ScenarioOptions;
pub use save::{SaveEncoding, export_save, export_save_to_path};
pub use save_details::SaveDetails;
pub use uncompress::{uncompress, uncompress_file};
