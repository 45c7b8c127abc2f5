//! Game state blobs
//!
//! The game state is cargo for the simulation; this layer only reads the
//! handful of fields that tools need and otherwise keeps the bytes intact.
//! Saves and landscapes store it as one chunk. Scenarios split it into three
//! chunks and leave out companies and entities.
//!
//! ```text
//! 0x000000  general state   (flags @0x10, ticks @0x146/0x14C, fix flags @0x434)
//! 0x00B96C  companies       15 × 0x8FA8
//! 0x092444  towns, industries, stations
//! 0x1B58C4  entities
//! 0x4268C4  animations, waves, strings, routings, orders
//! 0x4A0644  end
//! ```

use loco_bitset::{FixedBitSet, storage_bytes};

use crate::S5Error;

pub const GAME_STATE_SIZE: usize = 0x4A_0644;
pub const GENERAL_STATE_SIZE: usize = 0xB96C;
pub const SCENARIO_TOWNS_SIZE: usize = 0x12_3480;
pub const SCENARIO_ANIMATIONS_SIZE: usize = 0x7_9D80;

pub const MAX_COMPANIES: usize = 15;
pub const COMPANY_SIZE: usize = 0x8FA8;
pub const TILE_ELEMENT_SIZE: usize = 8;

/// Number of vehicle objects a company can unlock
pub const MAX_VEHICLE_OBJECTS: usize = 224;

const FLAGS: usize = 0x10;
const CURRENT_DAY: usize = 0x14;
const SCENARIO_TICKS: usize = 0x146;
const SCENARIO_TICKS_2: usize = 0x14C;
const FIX_FLAGS: usize = 0x434;
const COMPANIES: usize = 0xB96C;
const COMPANY_UNLOCKED_VEHICLES: usize = 0x34;

/// Vehicles a company may build, one bit per vehicle object slot
pub type UnlockedVehicles = FixedBitSet<MAX_VEHICLE_OBJECTS, { storage_bytes(MAX_VEHICLE_OBJECTS) }>;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GameStateFlags: u32 {
        /// Tile elements follow the game state
        const TILE_MANAGER_LOADED = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Layout revisions applied to the game state
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixFlags: u8 {
        const FIX_FLAG_0 = 1 << 0;
        const FIX_FLAG_1 = 1 << 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    /// Saves and landscapes
    Whole(Vec<u8>),
    /// Scenarios: general state, towns to stations, animations to the end
    Scenario {
        general: Vec<u8>,
        towns: Vec<u8>,
        animations: Vec<u8>,
    },
}

impl GameState {
    /// Zeroed full-size state
    pub fn new_whole() -> Self {
        GameState::Whole(vec![0; GAME_STATE_SIZE])
    }

    /// Zeroed scenario state
    pub fn new_scenario() -> Self {
        GameState::Scenario {
            general: vec![0; GENERAL_STATE_SIZE],
            towns: vec![0; SCENARIO_TOWNS_SIZE],
            animations: vec![0; SCENARIO_ANIMATIONS_SIZE],
        }
    }

    /// Chunks in file order
    pub fn chunks(&self) -> Vec<&[u8]> {
        match self {
            GameState::Whole(bytes) => vec![bytes.as_slice()],
            GameState::Scenario {
                general,
                towns,
                animations,
            } => vec![general.as_slice(), towns.as_slice(), animations.as_slice()],
        }
    }

    /// Bytes starting at the general state
    pub fn general(&self) -> &[u8] {
        match self {
            GameState::Whole(bytes) => bytes,
            GameState::Scenario { general, .. } => general,
        }
    }

    fn general_mut(&mut self) -> &mut [u8] {
        match self {
            GameState::Whole(bytes) => bytes,
            GameState::Scenario { general, .. } => general,
        }
    }

    fn read_u32(&self, offset: usize) -> Option<u32> {
        let bytes = self.general().get(offset..offset + 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn write_u32(&mut self, offset: usize, value: u32) -> Result<(), S5Error> {
        let len = self.general().len();
        let field = self
            .general_mut()
            .get_mut(offset..offset + 4)
            .ok_or_else(|| S5Error::InvalidRecord {
                record: "game state",
                reason: format!("{len} bytes is too short for field at {offset:#X}"),
            })?;
        field.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn flags(&self) -> Option<GameStateFlags> {
        self.read_u32(FLAGS).map(GameStateFlags::from_bits_retain)
    }

    pub fn tile_manager_loaded(&self) -> bool {
        self.flags()
            .is_some_and(|flags| flags.contains(GameStateFlags::TILE_MANAGER_LOADED))
    }

    pub fn set_flags(&mut self, flags: GameStateFlags) -> Result<(), S5Error> {
        self.write_u32(FLAGS, flags.bits())
    }

    pub fn current_day(&self) -> Option<u32> {
        self.read_u32(CURRENT_DAY)
    }

    pub fn scenario_ticks(&self) -> Option<u32> {
        self.read_u32(SCENARIO_TICKS)
    }

    pub fn set_scenario_ticks(&mut self, ticks: u32) -> Result<(), S5Error> {
        self.write_u32(SCENARIO_TICKS, ticks)
    }

    pub fn scenario_ticks2(&self) -> Option<u32> {
        self.read_u32(SCENARIO_TICKS_2)
    }

    pub fn set_scenario_ticks2(&mut self, ticks: u32) -> Result<(), S5Error> {
        self.write_u32(SCENARIO_TICKS_2, ticks)
    }

    pub fn fix_flags(&self) -> Option<FixFlags> {
        self.general()
            .get(FIX_FLAGS)
            .map(|&bits| FixFlags::from_bits_retain(bits))
    }

    /// Whether the state predates both layout fixes and needs converting
    /// before the simulation can use it.
    pub fn is_legacy_layout(&self) -> bool {
        self.fix_flags()
            .is_some_and(|flags| !flags.intersects(FixFlags::FIX_FLAG_0 | FixFlags::FIX_FLAG_1))
    }

    /// Raw record of company `index`. Scenarios carry no companies.
    pub fn company(&self, index: usize) -> Option<&[u8]> {
        let GameState::Whole(bytes) = self else {
            return None;
        };
        if index >= MAX_COMPANIES {
            return None;
        }
        let start = COMPANIES + index * COMPANY_SIZE;
        bytes.get(start..start + COMPANY_SIZE)
    }

    fn company_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        let GameState::Whole(bytes) = self else {
            return None;
        };
        if index >= MAX_COMPANIES {
            return None;
        }
        let start = COMPANIES + index * COMPANY_SIZE;
        bytes.get_mut(start..start + COMPANY_SIZE)
    }

    pub fn unlocked_vehicles(&self, company: usize) -> Option<UnlockedVehicles> {
        let record = self.company(company)?;
        let field = &record[COMPANY_UNLOCKED_VEHICLES..][..UnlockedVehicles::WIRE_BYTES];
        Some(UnlockedVehicles::from_le_bytes(field))
    }

    pub fn set_unlocked_vehicles(
        &mut self,
        company: usize,
        vehicles: &UnlockedVehicles,
    ) -> Result<(), S5Error> {
        let record = self
            .company_mut(company)
            .ok_or_else(|| S5Error::InvalidRecord {
                record: "company",
                reason: format!("no company record {company} in this game state"),
            })?;
        record[COMPANY_UNLOCKED_VEHICLES..][..UnlockedVehicles::WIRE_BYTES]
            .copy_from_slice(vehicles.wire_bytes());
        Ok(())
    }
}

/// Number of whole tile elements in a tile chunk
pub fn tile_element_count(tiles: &[u8]) -> usize {
    tiles.len() / TILE_ELEMENT_SIZE
}
