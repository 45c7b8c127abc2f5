//! Save details record (0xC618 bytes)
//!
//! Preview data shown by the load dialog: company and owner names, the game
//! date, a 250×200 thumbnail and challenge progress.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::S5Error;

pub const SAVE_DETAILS_SIZE: usize = 0xC618;

pub const IMAGE_WIDTH: usize = 250;
pub const IMAGE_HEIGHT: usize = 200;

pub const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;

const RESERVED_SIZE: usize = SAVE_DETAILS_SIZE - 0xC59C;

#[derive(Clone, PartialEq, Eq)]
pub struct SaveDetails {
    pub company: [u8; 256],
    pub owner: [u8; 256],
    pub date: u32,
    pub performance_index: u16,
    pub scenario: [u8; 64],
    pub challenge_progress: u8,
    pub pad_247: u8,
    /// Palette-indexed thumbnail, row-major
    pub image: Box<[u8; IMAGE_SIZE]>,
    pub challenge_flags: u32,
    pub reserved: [u8; RESERVED_SIZE],
}

impl Default for SaveDetails {
    fn default() -> Self {
        Self {
            company: [0; 256],
            owner: [0; 256],
            date: 0,
            performance_index: 0,
            scenario: [0; 64],
            challenge_progress: 0,
            pad_247: 0,
            image: Box::new([0; IMAGE_SIZE]),
            challenge_flags: 0,
            reserved: [0; RESERVED_SIZE],
        }
    }
}

impl SaveDetails {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, S5Error> {
        if bytes.len() != SAVE_DETAILS_SIZE {
            return Err(S5Error::record_size(
                "save details",
                SAVE_DETAILS_SIZE,
                bytes.len(),
            ));
        }

        let mut details = Self::default();
        let mut cursor = Cursor::new(bytes);
        cursor.read_exact(&mut details.company)?;
        cursor.read_exact(&mut details.owner)?;
        details.date = cursor.read_u32::<LittleEndian>()?;
        details.performance_index = cursor.read_u16::<LittleEndian>()?;
        cursor.read_exact(&mut details.scenario)?;
        details.challenge_progress = cursor.read_u8()?;
        details.pad_247 = cursor.read_u8()?;
        cursor.read_exact(&mut details.image[..])?;
        details.challenge_flags = cursor.read_u32::<LittleEndian>()?;
        cursor.read_exact(&mut details.reserved)?;
        Ok(details)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SAVE_DETAILS_SIZE);
        out.extend_from_slice(&self.company);
        out.extend_from_slice(&self.owner);
        out.extend_from_slice(&self.date.to_le_bytes());
        out.extend_from_slice(&self.performance_index.to_le_bytes());
        out.extend_from_slice(&self.scenario);
        out.push(self.challenge_progress);
        out.push(self.pad_247);
        out.extend_from_slice(&self.image[..]);
        out.extend_from_slice(&self.challenge_flags.to_le_bytes());
        out.extend_from_slice(&self.reserved);
        out
    }

    pub fn company_name(&self) -> String {
        c_string(&self.company)
    }

    pub fn owner_name(&self) -> String {
        c_string(&self.owner)
    }

    pub fn scenario_name(&self) -> String {
        c_string(&self.scenario)
    }

    pub fn set_company_name(&mut self, name: &str) {
        set_c_string(&mut self.company, name);
    }

    pub fn set_owner_name(&mut self, name: &str) {
        set_c_string(&mut self.owner, name);
    }

    pub fn set_scenario_name(&mut self, name: &str) {
        set_c_string(&mut self.scenario, name);
    }
}

impl std::fmt::Debug for SaveDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveDetails")
            .field("company", &self.company_name())
            .field("owner", &self.owner_name())
            .field("date", &self.date)
            .field("performance_index", &self.performance_index)
            .field("scenario", &self.scenario_name())
            .field("challenge_progress", &self.challenge_progress)
            .field("challenge_flags", &self.challenge_flags)
            .finish_non_exhaustive()
    }
}

/// Text up to the first NUL
pub(crate) fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Copy `text` into a NUL-padded fixed field, truncating to leave a terminator.
pub(crate) fn set_c_string(field: &mut [u8], text: &str) {
    field.fill(0);
    let len = text.len().min(field.len().saturating_sub(1));
    field[..len].copy_from_slice(&text.as_bytes()[..len]);
}
