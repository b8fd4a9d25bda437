//! Cartridge ROM image.

use serde::{Deserialize, Serialize};

use crate::error::{CartridgeError, StateError};
use crate::state::{StateReader, StateWriter};

/// PRG ROM bank size (iNES header byte 4 unit).
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// CHR ROM bank size (iNES header byte 5 unit).
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Nametable mirroring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    /// Single screen, first nametable (A).
    SingleScreenLower,
    /// Single screen, second nametable (B).
    SingleScreenUpper,
    FourScreen,
}

/// PRG and CHR contents plus the mirroring the board is soldered for.
///
/// Never changes once built. Bank registers of richer boards live in the
/// mapper, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    prg: Vec<u8>,
    chr: Vec<u8>,
    mirroring: Mirroring,
}

impl RomImage {
    /// PRG must be a non-empty run of 16K banks and CHR must not be empty.
    pub fn new(prg: Vec<u8>, chr: Vec<u8>, mirroring: Mirroring) -> Result<Self, CartridgeError> {
        if prg.is_empty() {
            return Err(CartridgeError::EmptyPrg);
        }
        if prg.len() % PRG_BANK_SIZE != 0 {
            return Err(CartridgeError::PrgNotBankAligned(prg.len()));
        }
        if chr.is_empty() {
            return Err(CartridgeError::EmptyChr);
        }
        Ok(Self {
            prg,
            chr,
            mirroring,
        })
    }

    #[must_use]
    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    #[must_use]
    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    /// Base save-state fields, in order: PRG, CHR, mirroring.
    pub fn save(&self, state: &mut StateWriter<'_>) -> Result<(), StateError> {
        state.write_bytes(&self.prg)?;
        state.write_bytes(&self.chr)?;
        state.write_field(&self.mirroring)
    }

    /// Read the fields written by [`RomImage::save`] and re-validate them.
    pub fn load(state: &mut StateReader<'_>) -> Result<Self, StateError> {
        let prg = state.read_bytes()?;
        let chr = state.read_bytes()?;
        let mirroring: Mirroring = state.read_field()?;
        Ok(Self::new(prg, chr, mirroring)?)
    }
}
