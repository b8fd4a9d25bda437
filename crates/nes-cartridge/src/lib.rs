//! NES cartridge: ROM images, the mapper abstraction and save-states.
//!
//! A cartridge is a [`RomImage`] (PRG + CHR + board mirroring) wired up by a
//! [`Mapper`] that decodes CPU $8000-$FFFF and PPU $0000-$1FFF. The console
//! holds exactly one mapper, behind a [`Cartridge`] slot, and treats every
//! board the same way: bus reads/writes, mirroring queries, a scanline hook,
//! an IRQ line, and save/load.
//!
//! Only NROM (mapper 0) is implemented here. Banked boards plug in by
//! implementing [`Mapper`] and appending their registers to the save-state
//! after the base ROM fields.

mod cartridge;
mod error;
mod mapper;
mod nrom;
mod rom;
mod state;

pub use cartridge::Cartridge;
pub use error::{CartridgeError, StateError};
pub use mapper::Mapper;
pub use nrom::Nrom;
pub use rom::{CHR_BANK_SIZE, Mirroring, PRG_BANK_SIZE, RomImage};
pub use state::{SAVE_MAGIC, SAVE_VERSION, StateReader, StateWriter};
