//! Sprite model: one OAM entry decoded into a 2bpp pixel grid.

use crate::oam::OamEntry;
use crate::registers::PpuRegisters;

const ATTR_PALETTE: u8 = 0x03;
const ATTR_BEHIND: u8 = 0x20;
const ATTR_FLIP_X: u8 = 0x40;
const ATTR_FLIP_Y: u8 = 0x80;

/// Sprite pixels indexed `[column][row]`. Values are 0 (transparent) or a
/// palette colour 1-3. Rows past the active sprite height stay 0.
pub type Pixels = [[u8; 16]; 8];

/// Source of pattern-table bytes (PPU $0000-$1FFF).
///
/// A console routes this through the cartridge mapper's CHR window.
pub trait PatternFetch {
    fn fetch_pattern(&mut self, addr: u16) -> u8;
}

/// Flat pattern memory, e.g. a CHR dump. Out-of-range reads return 0.
impl PatternFetch for [u8] {
    fn fetch_pattern(&mut self, addr: u16) -> u8 {
        self.get(addr as usize).copied().unwrap_or(0)
    }
}

/// A sprite selected for a scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// OAM slot (0-63). Slot 0 is the only one that can raise sprite 0 hit.
    pub index: u8,
    /// Unflipped pattern data.
    pub pixels: Pixels,
    /// Sprite palette selector (0-3).
    pub palette: u8,
    pub x: u8,
    pub y: u8,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Background pixels that aren't transparent win over this sprite.
    pub behind_background: bool,
}

impl Sprite {
    pub const EMPTY: Self = Self {
        index: 0,
        pixels: [[0; 16]; 8],
        palette: 0,
        x: 0,
        y: 0,
        flip_x: false,
        flip_y: false,
        behind_background: false,
    };
}

impl Default for Sprite {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Decode OAM entry `index` into a [`Sprite`], fetching every row of its
/// pattern through `fetch`.
///
/// 8x8 sprites use the pattern table chosen by PPUCTRL bit 3. 8x16 sprites
/// take the table from bit 0 of the tile index; the top half is tile
/// `tile & 0xFE` and the bottom half the tile after it.
pub fn decode_sprite<F: PatternFetch + ?Sized>(
    index: usize,
    entry: OamEntry,
    regs: &PpuRegisters,
    fetch: &mut F,
) -> Sprite {
    let height = regs.sprite_height();
    let mut sprite = Sprite {
        index: index as u8,
        pixels: [[0; 16]; 8],
        palette: entry.attributes & ATTR_PALETTE,
        x: entry.x,
        y: entry.y,
        flip_x: entry.attributes & ATTR_FLIP_X != 0,
        flip_y: entry.attributes & ATTR_FLIP_Y != 0,
        behind_background: entry.attributes & ATTR_BEHIND != 0,
    };

    for row in 0..height {
        let addr = if height == 16 {
            let table = u16::from(entry.tile & 1) * 0x1000;
            let mut tile = entry.tile & 0xFE;
            if row >= 8 {
                tile += 1;
            }
            table + u16::from(tile) * 16 + (row & 7)
        } else {
            regs.sprite_pattern_table() + u16::from(entry.tile) * 16 + row
        };

        let lo = fetch.fetch_pattern(addr);
        let hi = fetch.fetch_pattern(addr + 8);

        // Bit 7 of each plane is the leftmost column.
        for (column, pixel_column) in sprite.pixels.iter_mut().enumerate() {
            let shift = 7 - column;
            pixel_column[row as usize] = ((lo >> shift) & 1) | (((hi >> shift) & 1) << 1);
        }
    }

    sprite
}

/// Mirror a pixel grid. Horizontal flip maps column x to 7 - x, vertical
/// flip maps row y to `height - 1 - y`.
#[must_use]
pub fn flip_pixels(pixels: Pixels, flip_x: bool, flip_y: bool, height: u16) -> Pixels {
    if !flip_x && !flip_y {
        return pixels;
    }

    let height = usize::from(height);
    let mut flipped = [[0; 16]; 8];
    for y in 0..height {
        for x in 0..8 {
            let fx = if flip_x { 7 - x } else { x };
            let fy = if flip_y { height - 1 - y } else { y };
            flipped[fx][fy] = pixels[x][y];
        }
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_grid() -> Pixels {
        let mut pixels = [[0; 16]; 8];
        for (x, column) in pixels.iter_mut().enumerate() {
            for (y, pixel) in column.iter_mut().enumerate() {
                *pixel = ((x + y) % 4) as u8;
            }
        }
        pixels
    }

    #[test]
    fn flip_none_is_identity() {
        let pixels = numbered_grid();
        assert_eq!(flip_pixels(pixels, false, false, 8), pixels);
        assert_eq!(flip_pixels(pixels, false, false, 16), pixels);
    }

    #[test]
    fn flip_x_mirrors_columns() {
        let pixels = numbered_grid();
        let flipped = flip_pixels(pixels, true, false, 8);
        for x in 0..8 {
            for y in 0..8 {
                assert_eq!(flipped[x][y], pixels[7 - x][y], "x={x} y={y}");
            }
        }
    }

    #[test]
    fn flip_y_uses_active_height() {
        let pixels = numbered_grid();
        let flipped = flip_pixels(pixels, false, true, 16);
        for x in 0..8 {
            for y in 0..16 {
                assert_eq!(flipped[x][y], pixels[x][15 - y]);
            }
        }

        let short = flip_pixels(pixels, false, true, 8);
        assert_eq!(short[0][0], pixels[0][7]);
        // Rows past the 8x8 height are left clear.
        assert_eq!(short[0][8], 0);
    }

    #[test]
    fn flip_both_rotates_180() {
        let pixels = numbered_grid();
        let flipped = flip_pixels(pixels, true, true, 8);
        assert_eq!(flipped[0][0], pixels[7][7]);
        assert_eq!(flipped[7][0], pixels[0][7]);
    }

    #[test]
    fn decode_8x8_combines_bitplanes() {
        let mut chr = vec![0u8; 0x2000];
        // Tile 1, row 2: columns 0-3 get colours 1, 2, 3, 0.
        chr[0x10 + 2] = 0b1010_0000;
        chr[0x10 + 2 + 8] = 0b0110_0000;

        let regs = PpuRegisters::new();
        let entry = OamEntry {
            y: 20,
            tile: 1,
            attributes: 0b1110_0010,
            x: 30,
        };
        let sprite = decode_sprite(5, entry, &regs, chr.as_mut_slice());

        assert_eq!(sprite.index, 5);
        assert_eq!(sprite.palette, 2);
        assert!(sprite.flip_x && sprite.flip_y && sprite.behind_background);
        assert_eq!((sprite.x, sprite.y), (30, 20));
        assert_eq!(sprite.pixels[0][2], 1);
        assert_eq!(sprite.pixels[1][2], 2);
        assert_eq!(sprite.pixels[2][2], 3);
        assert_eq!(sprite.pixels[3][2], 0);
        assert_eq!(sprite.pixels[0][1], 0);
    }

    #[test]
    fn decode_8x8_uses_ctrl_pattern_table() {
        let mut chr = vec![0u8; 0x2000];
        chr[0x1000 + 0x30] = 0xFF;

        let mut regs = PpuRegisters::new();
        regs.write_ctrl(0x08);
        let entry = OamEntry {
            tile: 3,
            ..OamEntry::default()
        };
        let sprite = decode_sprite(0, entry, &regs, chr.as_mut_slice());
        assert!(sprite.pixels.iter().all(|column| column[0] == 1));
    }

    #[test]
    fn decode_8x16_splits_tiles_and_ignores_ctrl_table() {
        let mut chr = vec![0u8; 0x2000];
        // Tile byte 0x05: table $1000, top tile 4, bottom tile 5.
        chr[0x1000 + 4 * 16] = 0x80; // top half, row 0, low plane
        chr[0x1000 + 5 * 16 + 3 + 8] = 0x01; // bottom half, row 11, high plane
        chr[4 * 16] = 0xFF; // same tile in table $0000 must be ignored

        let mut regs = PpuRegisters::new();
        regs.write_ctrl(0x20);
        let entry = OamEntry {
            tile: 0x05,
            ..OamEntry::default()
        };
        let sprite = decode_sprite(0, entry, &regs, chr.as_mut_slice());
        assert_eq!(sprite.pixels[0][0], 1);
        assert_eq!(sprite.pixels[1][0], 0);
        assert_eq!(sprite.pixels[7][11], 2);
    }
}
