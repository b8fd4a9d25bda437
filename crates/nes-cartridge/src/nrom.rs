//! NROM (Mapper 0): no bank switching.
//!
//! - PRG: 16K mirrored at $8000-$FFFF, or 32K at $8000-$FFFF
//! - CHR: exactly 8K of ROM at PPU $0000-$1FFF
//! - Mirroring: fixed by the board

use log::warn;
use ricoh_ppu_2c02::PatternFetch;

use crate::error::{CartridgeError, StateError};
use crate::mapper::Mapper;
use crate::rom::{CHR_BANK_SIZE, Mirroring, RomImage};
use crate::state::{StateReader, StateWriter};

/// NROM board. The ROM image is its only state.
#[derive(Debug, Clone)]
pub struct Nrom {
    rom: RomImage,
}

impl Nrom {
    /// CHR must be a single 8K bank, so every pattern address maps straight
    /// through without wrapping.
    pub fn new(rom: RomImage) -> Result<Self, CartridgeError> {
        if rom.chr().len() != CHR_BANK_SIZE {
            return Err(CartridgeError::ChrSize {
                expected: CHR_BANK_SIZE,
                found: rom.chr().len(),
            });
        }
        Ok(Self { rom })
    }

    #[must_use]
    pub fn rom(&self) -> &RomImage {
        &self.rom
    }
}

impl Mapper for Nrom {
    fn read_prg(&self, addr: u16) -> u8 {
        match addr {
            // 16K images repeat at $C000; 32K images fill the window.
            0x8000..=0xFFFF => {
                let prg = self.rom.prg();
                prg[addr as usize % prg.len()]
            }
            _ => {
                warn!("nrom: unmapped PRG read at ${addr:04X}");
                0
            }
        }
    }

    fn write_prg(&mut self, _addr: u16, _value: u8) {
        // NROM has no writable PRG area
    }

    fn read_chr(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.rom.chr()[addr as usize],
            _ => {
                warn!("nrom: unmapped CHR read at ${addr:04X}");
                0
            }
        }
    }

    fn write_chr(&mut self, _addr: u16, _value: u8) {
        // CHR ROM is not writable
    }

    fn mirroring(&self) -> Mirroring {
        self.rom.mirroring()
    }

    fn mapper_number(&self) -> u16 {
        0
    }

    fn save(&self, state: &mut StateWriter<'_>) -> Result<(), StateError> {
        self.rom.save(state)
    }

    fn load(&mut self, state: &mut StateReader<'_>) -> Result<(), StateError> {
        *self = Self::new(RomImage::load(state)?)?;
        Ok(())
    }
}

impl PatternFetch for Nrom {
    fn fetch_pattern(&mut self, addr: u16) -> u8 {
        self.read_chr(addr)
    }
}
