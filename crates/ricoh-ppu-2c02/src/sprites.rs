//! Per-scanline sprite evaluation and rendering.
//!
//! The 2C02 evaluates sprites for line N+1 while it draws line N. The
//! console calls `evaluate` then `render` once per scanline; `render`
//! always draws the set chosen by the *previous* `evaluate`. Two line
//! buffers keep the two phases apart, so skipping or reordering calls puts
//! the sprites one line off, just like the real pipeline.

use log::trace;

use crate::config::SpriteConfig;
use crate::frame::{BackgroundMask, FB_HEIGHT, FB_WIDTH, FrameBuffer};
use crate::oam::{Oam, SPRITE_COUNT};
use crate::palette::PaletteRam;
use crate::registers::{PpuRegisters, Status};
use crate::sprite::{PatternFetch, Sprite, decode_sprite, flip_pixels};

/// Hardware limit on sprites per scanline.
pub const MAX_SPRITES_PER_LINE: usize = 8;

/// Line tag of a buffer that was never filled.
const NO_LINE: u16 = u16::MAX;

/// Sprites selected for one scanline, in OAM order.
///
/// Sized for every OAM slot so that the no-limit mode never allocates.
#[derive(Clone, Copy)]
struct LineBuffer {
    sprites: [Sprite; SPRITE_COUNT],
    len: usize,
    /// Scanline the sprites were selected for.
    line: u16,
}

impl LineBuffer {
    const EMPTY: Self = Self {
        sprites: [Sprite::EMPTY; SPRITE_COUNT],
        len: 0,
        line: NO_LINE,
    };

    fn push(&mut self, sprite: Sprite) {
        self.sprites[self.len] = sprite;
        self.len += 1;
    }

    fn as_slice(&self) -> &[Sprite] {
        &self.sprites[..self.len]
    }
}

/// Sprite evaluation + rendering.
pub struct SpriteUnit {
    config: SpriteConfig,
    buffers: [LineBuffer; 2],
    /// Buffer written by the most recent `evaluate`.
    latest: usize,
}

impl SpriteUnit {
    #[must_use]
    pub fn new(config: SpriteConfig) -> Self {
        Self {
            config,
            buffers: [LineBuffer::EMPTY; 2],
            latest: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> SpriteConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SpriteConfig) {
        self.config = config;
    }

    /// Drop both line buffers (power-on / reset).
    pub fn reset(&mut self) {
        self.buffers = [LineBuffer::EMPTY; 2];
        self.latest = 0;
    }

    /// Sprites chosen by the most recent `evaluate`, i.e. the ones the next
    /// `render` call will draw.
    #[must_use]
    pub fn selected(&self) -> &[Sprite] {
        self.buffers[self.latest].as_slice()
    }

    /// Select the sprites covering `scanline + 1`.
    ///
    /// Scans OAM in slot order. The first eight matches are kept; the ninth
    /// raises sprite overflow and, unless `no_sprite_limit` is set, ends the
    /// scan. With the limit lifted every further match is kept as well and
    /// the flag is still only raised on the ninth.
    ///
    /// Call this on visible lines 0-239. Line 0 has no visible line before
    /// it, so its sprites come from [`SpriteUnit::evaluate_pre_render`].
    /// Without that call line 0 shows no sprites.
    pub fn evaluate<F: PatternFetch + ?Sized>(
        &mut self,
        scanline: u16,
        oam: &Oam,
        regs: &mut PpuRegisters,
        fetch: &mut F,
    ) {
        self.select(scanline.wrapping_add(1), oam, regs, fetch);
    }

    /// Select the sprites for line 0. Call once on the pre-render line,
    /// after [`PpuRegisters::clear_frame_flags`].
    pub fn evaluate_pre_render<F: PatternFetch + ?Sized>(
        &mut self,
        oam: &Oam,
        regs: &mut PpuRegisters,
        fetch: &mut F,
    ) {
        self.select(0, oam, regs, fetch);
    }

    fn select<F: PatternFetch + ?Sized>(
        &mut self,
        next_scanline: u16,
        oam: &Oam,
        regs: &mut PpuRegisters,
        fetch: &mut F,
    ) {
        let height = regs.sprite_height();
        let no_sprite_limit = self.config.no_sprite_limit;

        // The buffer drawn by the upcoming `render` must survive this pass.
        self.latest ^= 1;
        let buffer = &mut self.buffers[self.latest];
        buffer.len = 0;
        buffer.line = next_scanline;
        if usize::from(next_scanline) >= FB_HEIGHT {
            return;
        }

        for index in 0..SPRITE_COUNT {
            let entry = oam.entry(index);
            if next_scanline.wrapping_sub(u16::from(entry.y)) >= height {
                continue;
            }

            if buffer.len == MAX_SPRITES_PER_LINE {
                trace!("sprite overflow on scanline {next_scanline} at OAM slot {index}");
                regs.set_status(Status::SPRITE_OVERFLOW, true);
                if !no_sprite_limit {
                    break;
                }
            }

            buffer.push(decode_sprite(index, entry, regs, fetch));
        }
    }

    /// Composite the sprites selected by the previous `evaluate` onto
    /// `frame` at row `scanline`. Lines 240 and up are not displayed, and
    /// a set selected for some other line is not drawn.
    ///
    /// Sprites are drawn from the highest buffer slot down, so the lowest
    /// OAM slot is drawn last and wins overlaps.
    pub fn render(
        &self,
        scanline: u16,
        regs: &mut PpuRegisters,
        background: &BackgroundMask,
        palette: &PaletteRam,
        frame: &mut FrameBuffer,
    ) {
        let frame_y = usize::from(scanline);
        let buffer = &self.buffers[self.latest ^ 1];
        if frame_y >= FB_HEIGHT || buffer.line != scanline {
            return;
        }

        let height = regs.sprite_height();
        let show_left = regs.show_left_sprites();

        for sprite in buffer.as_slice().iter().rev() {
            let pixels = flip_pixels(sprite.pixels, sprite.flip_x, sprite.flip_y, height);
            // Selection guarantees y <= scanline < y + height.
            let row = usize::from(scanline.wrapping_sub(u16::from(sprite.y)) % height);

            for (column, pixel_column) in pixels.iter().enumerate() {
                let frame_x = usize::from(sprite.x) + column;
                if frame_x >= FB_WIDTH {
                    continue;
                }
                if !show_left && frame_x < 8 {
                    continue;
                }

                let pixel = pixel_column[row];
                if pixel == 0 {
                    continue;
                }

                let background_opaque = !background.is_transparent(frame_x, frame_y);

                // Sprite 0 hit counts even where the background wins.
                if sprite.index == 0 && background_opaque {
                    regs.set_status(Status::SPRITE_ZERO_HIT, true);
                }

                if sprite.behind_background && background_opaque {
                    continue;
                }

                frame.set(frame_x, frame_y, palette.sprite_color(sprite.palette, pixel));
            }
        }
    }
}

impl Default for SpriteUnit {
    fn default() -> Self {
        Self::new(SpriteConfig::default())
    }
}
