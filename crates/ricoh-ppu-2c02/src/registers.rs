//! PPU register bank.
//!
//! Holds PPUCTRL ($2000), PPUMASK ($2001) and PPUSTATUS ($2002). The sprite
//! pipeline only reads a handful of control/mask bits and raises two status
//! flags; the remaining bits are stored so a console can keep one bank for
//! the whole PPU.

use bitflags::bitflags;

bitflags! {
    // 7  bit  0
    // ---- ----
    // VPHB SINN
    // |||| ||++- Base nametable address
    // |||| |+--- VRAM address increment (0: +1, 1: +32)
    // |||| +---- Sprite pattern table for 8x8 sprites (0: $0000, 1: $1000)
    // |||+------ Background pattern table (0: $0000, 1: $1000)
    // ||+------- Sprite size (0: 8x8, 1: 8x16)
    // |+-------- PPU master/slave select
    // +--------- Generate NMI at start of VBlank
    /// PPUCTRL ($2000).
    #[derive(Default)]
    pub struct Control: u8 {
        const NAMETABLE_X      = 0b0000_0001;
        const NAMETABLE_Y      = 0b0000_0010;
        const VRAM_INCREMENT   = 0b0000_0100;
        const SPRITE_TABLE     = 0b0000_1000;
        const BACKGROUND_TABLE = 0b0001_0000;
        const SPRITE_SIZE      = 0b0010_0000;
        const MASTER_SLAVE     = 0b0100_0000;
        const GENERATE_NMI     = 0b1000_0000;
    }
}

bitflags! {
    // 7  bit  0
    // ---- ----
    // BGRs bMmG
    // |||| |||+- Greyscale
    // |||| ||+-- Show background in leftmost 8 pixels
    // |||| |+--- Show sprites in leftmost 8 pixels
    // |||| +---- Show background
    // |||+------ Show sprites
    // +++------- Colour emphasis (red, green, blue)
    /// PPUMASK ($2001).
    #[derive(Default)]
    pub struct Mask: u8 {
        const GREYSCALE            = 0b0000_0001;
        const SHOW_BACKGROUND_LEFT = 0b0000_0010;
        const SHOW_SPRITES_LEFT    = 0b0000_0100;
        const SHOW_BACKGROUND      = 0b0000_1000;
        const SHOW_SPRITES         = 0b0001_0000;
        const EMPHASIZE_RED        = 0b0010_0000;
        const EMPHASIZE_GREEN      = 0b0100_0000;
        const EMPHASIZE_BLUE       = 0b1000_0000;
    }
}

bitflags! {
    /// PPUSTATUS ($2002). Bits 0-4 are open bus and never stored.
    #[derive(Default)]
    pub struct Status: u8 {
        const SPRITE_OVERFLOW = 0b0010_0000;
        const SPRITE_ZERO_HIT = 0b0100_0000;
        const VBLANK          = 0b1000_0000;
    }
}

/// PPUCTRL, PPUMASK and PPUSTATUS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PpuRegisters {
    ctrl: Control,
    mask: Mask,
    status: Status,
}

impl PpuRegisters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// CPU write to $2000.
    pub fn write_ctrl(&mut self, value: u8) {
        self.ctrl = Control::from_bits_truncate(value);
    }

    /// CPU write to $2001.
    pub fn write_mask(&mut self, value: u8) {
        self.mask = Mask::from_bits_truncate(value);
    }

    /// CPU read of $2002. Returns the status bits and clears vblank.
    pub fn read_status(&mut self) -> u8 {
        let bits = self.status.bits();
        self.status.remove(Status::VBLANK);
        bits
    }

    #[must_use]
    pub fn ctrl(&self) -> Control {
        self.ctrl
    }

    #[must_use]
    pub fn mask(&self) -> Mask {
        self.mask
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Pattern table base for 8x8 sprites. Ignored in 8x16 mode, where
    /// bit 0 of the tile index picks the table.
    #[must_use]
    pub fn sprite_pattern_table(&self) -> u16 {
        if self.ctrl.contains(Control::SPRITE_TABLE) {
            0x1000
        } else {
            0x0000
        }
    }

    /// Sprite height in pixels: 8 or 16.
    #[must_use]
    pub fn sprite_height(&self) -> u16 {
        if self.ctrl.contains(Control::SPRITE_SIZE) {
            16
        } else {
            8
        }
    }

    /// Whether sprites may be drawn in the leftmost 8 pixels.
    #[must_use]
    pub fn show_left_sprites(&self) -> bool {
        self.mask.contains(Mask::SHOW_SPRITES_LEFT)
    }

    #[must_use]
    pub fn status_flag(&self, flag: Status) -> bool {
        self.status.contains(flag)
    }

    pub fn set_status(&mut self, flag: Status, value: bool) {
        self.status.set(flag, value);
    }

    /// Dot 1 of the pre-render line: vblank, sprite 0 hit and sprite
    /// overflow all drop.
    pub fn clear_frame_flags(&mut self) {
        self.status = Status::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_height_follows_ctrl_bit_5() {
        let mut regs = PpuRegisters::new();
        assert_eq!(regs.sprite_height(), 8);
        regs.write_ctrl(0x20);
        assert_eq!(regs.sprite_height(), 16);
    }

    #[test]
    fn sprite_pattern_table_follows_ctrl_bit_3() {
        let mut regs = PpuRegisters::new();
        assert_eq!(regs.sprite_pattern_table(), 0x0000);
        regs.write_ctrl(0x08);
        assert_eq!(regs.sprite_pattern_table(), 0x1000);
    }

    #[test]
    fn show_left_sprites_follows_mask_bit_2() {
        let mut regs = PpuRegisters::new();
        assert!(!regs.show_left_sprites());
        regs.write_mask(0x04);
        assert!(regs.show_left_sprites());
        regs.write_mask(0x18);
        assert!(!regs.show_left_sprites());
    }

    #[test]
    fn status_read_clears_vblank_only() {
        let mut regs = PpuRegisters::new();
        regs.set_status(Status::VBLANK, true);
        regs.set_status(Status::SPRITE_ZERO_HIT, true);
        assert_eq!(regs.read_status(), 0xC0);
        assert!(!regs.status_flag(Status::VBLANK));
        assert!(regs.status_flag(Status::SPRITE_ZERO_HIT));
        assert_eq!(regs.read_status(), 0x40);
    }

    #[test]
    fn pre_render_clears_all_flags() {
        let mut regs = PpuRegisters::new();
        regs.set_status(Status::VBLANK, true);
        regs.set_status(Status::SPRITE_ZERO_HIT, true);
        regs.set_status(Status::SPRITE_OVERFLOW, true);
        regs.clear_frame_flags();
        assert_eq!(regs.status(), Status::empty());
    }
}
