//! Scenario options record (0x431A bytes)
//!
//! Kept as an opaque block so that fields added by newer tools survive a
//! load/save cycle. Accessors cover the fields used for listing scenarios.

use crate::object::{OBJECT_HEADER_SIZE, ObjectHeader};
use crate::save_details::c_string;
use crate::S5Error;

pub const SCENARIO_OPTIONS_SIZE: usize = 0x431A;

const EDITOR_STEP: usize = 0x00;
const DIFFICULTY: usize = 0x01;
const START_YEAR: usize = 0x02;
const SCENARIO_NAME: usize = 0x2A;
const SCENARIO_DETAILS: usize = 0x6A;
const SCENARIO_TEXT: usize = 0x16A;
const OBJECTIVE_TYPE: usize = 0x418C;
const CURRENCY: usize = 0x41AD;

#[derive(Clone, PartialEq, Eq)]
pub struct ScenarioOptions {
    bytes: Box<[u8]>,
}

impl ScenarioOptions {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, S5Error> {
        if bytes.len() != SCENARIO_OPTIONS_SIZE {
            return Err(S5Error::record_size(
                "scenario options",
                SCENARIO_OPTIONS_SIZE,
                bytes.len(),
            ));
        }
        Ok(Self {
            bytes: bytes.into(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn editor_step(&self) -> u8 {
        self.bytes[EDITOR_STEP]
    }

    pub fn difficulty(&self) -> u8 {
        self.bytes[DIFFICULTY]
    }

    pub fn start_year(&self) -> u16 {
        u16::from_le_bytes([self.bytes[START_YEAR], self.bytes[START_YEAR + 1]])
    }

    pub fn scenario_name(&self) -> String {
        c_string(&self.bytes[SCENARIO_NAME..SCENARIO_NAME + 64])
    }

    pub fn scenario_details(&self) -> String {
        c_string(&self.bytes[SCENARIO_DETAILS..SCENARIO_DETAILS + 256])
    }

    pub fn objective_type(&self) -> u8 {
        self.bytes[OBJECTIVE_TYPE]
    }

    /// Text object naming the scenario, if any
    pub fn scenario_text(&self) -> Option<ObjectHeader> {
        self.object_at(SCENARIO_TEXT)
    }

    pub fn currency(&self) -> Option<ObjectHeader> {
        self.object_at(CURRENCY)
    }

    fn object_at(&self, offset: usize) -> Option<ObjectHeader> {
        ObjectHeader::from_bytes(&self.bytes[offset..offset + OBJECT_HEADER_SIZE])
            .ok()
            .flatten()
    }
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            bytes: vec![0; SCENARIO_OPTIONS_SIZE].into_boxed_slice(),
        }
    }
}

impl std::fmt::Debug for ScenarioOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioOptions")
            .field("editor_step", &self.editor_step())
            .field("difficulty", &self.difficulty())
            .field("start_year", &self.start_year())
            .field("scenario_name", &self.scenario_name())
            .finish_non_exhaustive()
    }
}
