//! Palette RAM and the 2C02 system colour table.

use crate::frame::Rgba;

const fn rgb(hex: u32) -> Rgba {
    Rgba::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// The 64 colours the 2C02 can output, indexed by palette RAM values.
#[rustfmt::skip]
pub const SYSTEM_PALETTE: [Rgba; 64] = [
    // $00
    rgb(0x7C7C7C), rgb(0x0000FC), rgb(0x0000BC), rgb(0x4428BC),
    rgb(0x940084), rgb(0xA80020), rgb(0xA81000), rgb(0x881400),
    rgb(0x503000), rgb(0x007800), rgb(0x006800), rgb(0x005800),
    rgb(0x004058), rgb(0x000000), rgb(0x000000), rgb(0x000000),
    // $10
    rgb(0xBCBCBC), rgb(0x0078F8), rgb(0x0058F8), rgb(0x6844FC),
    rgb(0xD800CC), rgb(0xE40058), rgb(0xF83800), rgb(0xE45C10),
    rgb(0xAC7C00), rgb(0x00B800), rgb(0x00A800), rgb(0x00A844),
    rgb(0x008888), rgb(0x000000), rgb(0x000000), rgb(0x000000),
    // $20
    rgb(0xF8F8F8), rgb(0x3CBCFC), rgb(0x6888FC), rgb(0x9878F8),
    rgb(0xF878F8), rgb(0xF85898), rgb(0xF87858), rgb(0xFCA044),
    rgb(0xF8B800), rgb(0xB8F818), rgb(0x58D854), rgb(0x58F898),
    rgb(0x00E8D8), rgb(0x787878), rgb(0x000000), rgb(0x000000),
    // $30
    rgb(0xFCFCFC), rgb(0xA4E4FC), rgb(0xB8B8F8), rgb(0xD8B8F8),
    rgb(0xF8B8F8), rgb(0xF8A4C0), rgb(0xF0D0B0), rgb(0xFCE0A8),
    rgb(0xF8D878), rgb(0xD8F878), rgb(0xB8F8B8), rgb(0xB8F8D8),
    rgb(0x00FCFC), rgb(0xF8D8F8), rgb(0x000000), rgb(0x000000),
];

/// 32 bytes of palette RAM at PPU $3F00-$3FFF.
///
/// $3F00-$3F0F are the background palettes, $3F10-$3F1F the sprite
/// palettes. The whole region mirrors every 32 bytes, and $3F10/$3F14/
/// $3F18/$3F1C alias $3F00/$3F04/$3F08/$3F0C.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PaletteRam {
    bytes: [u8; 32],
}

impl PaletteRam {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[Self::mirror(addr)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[Self::mirror(addr)] = value & 0x3F;
    }

    /// Colour of 2bpp `pixel` (1-3) in sprite palette `selector` (0-3).
    #[must_use]
    pub fn sprite_color(&self, selector: u8, pixel: u8) -> Rgba {
        let addr = 0x3F10 + u16::from(selector) * 4 + u16::from(pixel);
        SYSTEM_PALETTE[usize::from(self.read(addr)) % SYSTEM_PALETTE.len()]
    }

    fn mirror(addr: u16) -> usize {
        let a = (addr & 0x1F) as usize;
        if a & 0x13 == 0x10 {
            a & 0x0F
        } else {
            a
        }
    }
}
