//! Mapper trait: the one interface a console sees for every cartridge board.

use ricoh_ppu_2c02::PatternFetch;

use crate::error::StateError;
use crate::rom::Mirroring;
use crate::state::{StateReader, StateWriter};

/// Translates CPU and PPU addresses to cartridge ROM/RAM.
///
/// `read_chr` takes `&mut self` because some boards (MMC2, MMC4) update
/// latches when the PPU reads pattern table addresses.
///
/// ## Save-state order
/// `save` writes the [`RomImage`](crate::RomImage) base fields first (PRG,
/// CHR, mirroring), then the board's own registers in a fixed order that
/// the board documents. `load` reads them back in the same order.
pub trait Mapper {
    /// CPU read, $8000-$FFFF.
    fn read_prg(&self, addr: u16) -> u8;
    /// CPU write, $8000-$FFFF. Bank-switching boards latch registers here.
    fn write_prg(&mut self, addr: u16, value: u8);
    /// PPU read, $0000-$1FFF.
    fn read_chr(&mut self, addr: u16) -> u8;
    /// PPU write, $0000-$1FFF. Only CHR RAM boards store anything.
    fn write_chr(&mut self, addr: u16, value: u8);
    /// Current nametable mirroring. Fixed on simple boards.
    fn mirroring(&self) -> Mirroring;
    /// iNES mapper number, stored in save-state headers.
    fn mapper_number(&self) -> u16;

    /// Return board registers to their power-on values.
    fn reset(&mut self) {}

    /// Called once per scanline (scanline IRQ counters).
    fn scanline_tick(&mut self) {}

    /// Whether the board is asserting the IRQ line. Default: no IRQ.
    fn irq_pending(&self) -> bool {
        false
    }

    fn save(&self, state: &mut StateWriter<'_>) -> Result<(), StateError>;
    fn load(&mut self, state: &mut StateReader<'_>) -> Result<(), StateError>;
}

/// Sprite pattern fetches go through the CHR window.
impl PatternFetch for dyn Mapper + '_ {
    fn fetch_pattern(&mut self, addr: u16) -> u8 {
        self.read_chr(addr)
    }
}
