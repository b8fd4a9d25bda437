//! Cartridge slot: owns the active mapper and forwards bus traffic to it.

use std::io::{Read, Write};

use log::debug;
use ricoh_ppu_2c02::PatternFetch;

use crate::error::{CartridgeError, StateError};
use crate::mapper::Mapper;
use crate::nrom::Nrom;
use crate::rom::{Mirroring, RomImage};
use crate::state::{StateReader, StateWriter};

/// The one cartridge a console holds. Boards are swapped by building a new
/// slot, never by mutating the mapper kind in place.
pub struct Cartridge {
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    #[must_use]
    pub fn new(mapper: Box<dyn Mapper>) -> Self {
        Self { mapper }
    }

    /// Build an NROM cartridge from a ROM image.
    pub fn nrom(rom: RomImage) -> Result<Self, CartridgeError> {
        Ok(Self::new(Box::new(Nrom::new(rom)?)))
    }

    #[must_use]
    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn mapper_mut(&mut self) -> &mut dyn Mapper {
        self.mapper.as_mut()
    }

    /// CPU bus read ($8000-$FFFF).
    #[must_use]
    pub fn cpu_read(&self, addr: u16) -> u8 {
        self.mapper.read_prg(addr)
    }

    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        self.mapper.write_prg(addr, value);
    }

    /// PPU bus read ($0000-$1FFF).
    pub fn ppu_read(&mut self, addr: u16) -> u8 {
        self.mapper.read_chr(addr)
    }

    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        self.mapper.write_chr(addr, value);
    }

    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }

    #[must_use]
    pub fn irq_pending(&self) -> bool {
        self.mapper.irq_pending()
    }

    pub fn scanline_tick(&mut self) {
        self.mapper.scanline_tick();
    }

    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    /// Write a complete save-state: header, then the mapper's fields.
    pub fn save_state<W: Write>(&self, out: &mut W) -> Result<(), StateError> {
        let number = self.mapper.mapper_number();
        let mut state = StateWriter::new(out);
        state.write_header(number)?;
        self.mapper.save(&mut state)?;
        debug!("cartridge: saved state for mapper {number}");
        Ok(())
    }

    /// Restore a save-state written by [`Cartridge::save_state`].
    ///
    /// A state from a different board is rejected before any field is read.
    pub fn load_state<R: Read>(&mut self, input: &mut R) -> Result<(), StateError> {
        let expected = self.mapper.mapper_number();
        let mut state = StateReader::new(input);
        let found = state.read_header()?;
        if found != expected {
            return Err(StateError::MapperMismatch { expected, found });
        }
        self.mapper.load(&mut state)?;
        debug!("cartridge: loaded state for mapper {found}");
        Ok(())
    }
}

impl PatternFetch for Cartridge {
    fn fetch_pattern(&mut self, addr: u16) -> u8 {
        self.mapper.read_chr(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::{CHR_BANK_SIZE, PRG_BANK_SIZE};

    /// Minimal banked board: a PRG bank register latched by writes, saved
    /// after the base ROM fields.
    struct Banked {
        rom: RomImage,
        bank: u8,
    }

    impl Mapper for Banked {
        fn read_prg(&self, addr: u16) -> u8 {
            let offset = usize::from(self.bank) * PRG_BANK_SIZE + usize::from(addr & 0x3FFF);
            self.rom.prg()[offset % self.rom.prg().len()]
        }
        fn write_prg(&mut self, _addr: u16, value: u8) {
            self.bank = value;
        }
        fn read_chr(&mut self, addr: u16) -> u8 {
            self.rom.chr()[usize::from(addr) % self.rom.chr().len()]
        }
        fn write_chr(&mut self, _addr: u16, _value: u8) {}
        fn mirroring(&self) -> Mirroring {
            self.rom.mirroring()
        }
        fn mapper_number(&self) -> u16 {
            2
        }
        fn reset(&mut self) {
            self.bank = 0;
        }
        fn save(&self, state: &mut StateWriter<'_>) -> Result<(), StateError> {
            self.rom.save(state)?;
            state.write_field(&self.bank)
        }
        fn load(&mut self, state: &mut StateReader<'_>) -> Result<(), StateError> {
            self.rom = RomImage::load(state)?;
            self.bank = state.read_field()?;
            Ok(())
        }
    }

    fn two_bank_rom() -> RomImage {
        let mut prg = vec![0u8; 2 * PRG_BANK_SIZE];
        prg[0] = 0x11;
        prg[PRG_BANK_SIZE] = 0x22;
        RomImage::new(prg, vec![0x33; CHR_BANK_SIZE], Mirroring::Horizontal).expect("valid rom")
    }

    fn banked() -> Cartridge {
        Cartridge::new(Box::new(Banked {
            rom: two_bank_rom(),
            bank: 0,
        }))
    }

    fn nrom_cart(fill: u8) -> Cartridge {
        let rom = RomImage::new(
            vec![fill; PRG_BANK_SIZE],
            vec![fill; CHR_BANK_SIZE],
            Mirroring::Vertical,
        )
        .expect("valid rom");
        Cartridge::nrom(rom).expect("nrom")
    }

    #[test]
    fn bus_traffic_reaches_mapper() {
        let mut cart = banked();
        assert_eq!(cart.cpu_read(0x8000), 0x11);
        cart.cpu_write(0x8000, 1);
        assert_eq!(cart.cpu_read(0x8000), 0x22);
        assert_eq!(cart.ppu_read(0x0000), 0x33);
        assert_eq!(cart.fetch_pattern(0x1FFF), 0x33);
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
        assert!(!cart.irq_pending());

        cart.reset();
        assert_eq!(cart.cpu_read(0x8000), 0x11);
    }

    #[test]
    fn nrom_slot_reports_mapper_zero() {
        let cart = nrom_cart(0x42);
        assert_eq!(cart.mapper().mapper_number(), 0);
        assert_eq!(cart.cpu_read(0xFFFF), 0x42);
    }

    #[test]
    fn board_registers_follow_base_fields() {
        let mut source = banked();
        source.cpu_write(0x8000, 1);
        let mut bytes = Vec::new();
        source.save_state(&mut bytes).expect("save");

        // Header, then PRG, CHR, mirroring, then the bank register.
        let mut input = bytes.as_slice();
        let mut reader = StateReader::new(&mut input);
        assert_eq!(reader.read_header().expect("header"), 2);
        assert_eq!(RomImage::load(&mut reader).expect("base"), two_bank_rom());
        assert_eq!(reader.read_field::<u8>().expect("bank"), 1);

        let mut target = banked();
        target.load_state(&mut bytes.as_slice()).expect("load");
        assert_eq!(target.cpu_read(0x8000), 0x22);
    }

    #[test]
    fn nrom_state_round_trip() {
        let source = nrom_cart(0x5A);
        let mut bytes = Vec::new();
        source.save_state(&mut bytes).expect("save");

        let mut target = nrom_cart(0x00);
        target.load_state(&mut bytes.as_slice()).expect("load");
        assert_eq!(target.cpu_read(0x8000), 0x5A);
        assert_eq!(target.ppu_read(0x0123), 0x5A);
        assert_eq!(target.mirroring(), Mirroring::Vertical);
    }

    #[test]
    fn state_from_other_board_is_rejected() {
        let mut bytes = Vec::new();
        banked().save_state(&mut bytes).expect("save");

        let mut cart = nrom_cart(0x77);
        let err = cart
            .load_state(&mut bytes.as_slice())
            .expect_err("mapper 2 state into mapper 0");
        assert!(matches!(
            err,
            StateError::MapperMismatch {
                expected: 0,
                found: 2
            }
        ));
        assert_eq!(cart.cpu_read(0x8000), 0x77);
    }

    #[test]
    fn mapper_trait_object_fetches_patterns() {
        let mut cart = nrom_cart(0x99);
        let mapper: &mut dyn Mapper = cart.mapper_mut();
        assert_eq!(mapper.fetch_pattern(0x0040), 0x99);
    }
}
