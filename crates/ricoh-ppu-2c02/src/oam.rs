//! Object attribute memory.

/// OAM size in bytes.
pub const OAM_SIZE: usize = 256;

/// Number of sprite entries in OAM.
pub const SPRITE_COUNT: usize = 64;

/// One 4-byte OAM entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OamEntry {
    /// Top edge. The sprite covers lines `y..y + height`.
    pub y: u8,
    pub tile: u8,
    /// Bits 0-1 palette, bit 5 behind background, bit 6 flip X, bit 7 flip Y.
    pub attributes: u8,
    pub x: u8,
}

/// 256 bytes of sprite attributes, written by the CPU via $2004 or DMA.
#[derive(Clone)]
pub struct Oam {
    bytes: [u8; OAM_SIZE],
}

impl Oam {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: [0; OAM_SIZE],
        }
    }

    #[must_use]
    pub fn read(&self, addr: u8) -> u8 {
        self.bytes[addr as usize]
    }

    pub fn write(&mut self, addr: u8, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// $4014 DMA: copy a whole CPU page into OAM.
    pub fn dma(&mut self, page: &[u8; OAM_SIZE]) {
        self.bytes.copy_from_slice(page);
    }

    /// Entry `index` (wrapped to 0-63).
    #[must_use]
    pub fn entry(&self, index: usize) -> OamEntry {
        let base = (index % SPRITE_COUNT) * 4;
        OamEntry {
            y: self.bytes[base],
            tile: self.bytes[base + 1],
            attributes: self.bytes[base + 2],
            x: self.bytes[base + 3],
        }
    }

    /// Set all four bytes of entry `index` (wrapped to 0-63).
    pub fn set_entry(&mut self, index: usize, entry: OamEntry) {
        let base = (index % SPRITE_COUNT) * 4;
        self.bytes[base] = entry.y;
        self.bytes[base + 1] = entry.tile;
        self.bytes[base + 2] = entry.attributes;
        self.bytes[base + 3] = entry.x;
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; OAM_SIZE] {
        &self.bytes
    }
}

impl Default for Oam {
    fn default() -> Self {
        Self::new()
    }
}
