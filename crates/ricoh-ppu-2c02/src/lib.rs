//! Ricoh 2C02 sprite pipeline.
//!
//! The 2C02 fetches sprite data one scanline ahead of display. Each visible
//! scanline the owning console calls [`SpriteUnit::evaluate`] and then
//! [`SpriteUnit::render`]; evaluation selects the sprites for the *next*
//! line while rendering composites the set chosen by the previous call.
//! Line 0's sprites are chosen on the pre-render line by
//! [`SpriteUnit::evaluate_pre_render`].
//!
//! ## Pieces
//! - [`PpuRegisters`]: PPUCTRL / PPUMASK / PPUSTATUS bits the pipeline reads
//!   and the two status flags it raises (sprite overflow, sprite 0 hit).
//! - [`Oam`]: the 256-byte object attribute memory (64 × 4-byte entries).
//! - [`Sprite`]: one OAM entry decoded into a 2bpp pixel grid.
//! - [`SpriteUnit`]: evaluation + rendering, double-buffered.
//! - [`PaletteRam`], [`FrameBuffer`], [`BackgroundMask`]: the palette,
//!   output and background-transparency surfaces the renderer touches.
//!
//! Background rendering is not part of this crate. Its only input here is
//! the per-pixel transparency grid it leaves in a [`BackgroundMask`].

mod config;
mod frame;
mod oam;
mod palette;
mod registers;
mod sprite;
mod sprites;

pub use config::SpriteConfig;
pub use frame::{BackgroundMask, FB_HEIGHT, FB_WIDTH, FrameBuffer, Rgba};
pub use oam::{OAM_SIZE, Oam, OamEntry, SPRITE_COUNT};
pub use palette::{PaletteRam, SYSTEM_PALETTE};
pub use registers::{Control, Mask, PpuRegisters, Status};
pub use sprite::{PatternFetch, Pixels, Sprite, decode_sprite, flip_pixels};
pub use sprites::{MAX_SPRITES_PER_LINE, SpriteUnit};
