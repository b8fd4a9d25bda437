//! Cartridge and save-state errors.

use std::fmt;
use std::io;

/// A ROM image that no board could be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartridgeError {
    EmptyPrg,
    /// PRG length is not a whole number of 16K banks.
    PrgNotBankAligned(usize),
    EmptyChr,
    /// The board needs a different CHR size.
    ChrSize { expected: usize, found: usize },
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPrg => write!(f, "PRG ROM is empty"),
            Self::PrgNotBankAligned(len) => {
                write!(f, "PRG ROM size {len} is not a multiple of 16K")
            }
            Self::EmptyChr => write!(f, "CHR ROM is empty"),
            Self::ChrSize { expected, found } => {
                write!(f, "CHR ROM is {found} bytes, board expects {expected}")
            }
        }
    }
}

impl std::error::Error for CartridgeError {}

/// Save or load failure. Nothing is retried; the caller decides.
#[derive(Debug)]
pub enum StateError {
    Io(io::Error),
    Encode(rmp_serde::encode::Error),
    Decode(rmp_serde::decode::Error),
    BadMagic,
    UnsupportedVersion(u8),
    /// The state was saved from a different board.
    MapperMismatch { expected: u16, found: u16 },
    /// The restored ROM image is not valid for the board.
    Cartridge(CartridgeError),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "save-state I/O error: {e}"),
            Self::Encode(e) => write!(f, "save-state encode error: {e}"),
            Self::Decode(e) => write!(f, "save-state decode error: {e}"),
            Self::BadMagic => write!(f, "not a cartridge save-state"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported save-state version {v}"),
            Self::MapperMismatch { expected, found } => {
                write!(f, "save-state is for mapper {found}, cartridge is mapper {expected}")
            }
            Self::Cartridge(e) => write!(f, "save-state holds an invalid ROM: {e}"),
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Cartridge(e) => Some(e),
            Self::BadMagic | Self::UnsupportedVersion(_) | Self::MapperMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for StateError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<rmp_serde::encode::Error> for StateError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Self::Encode(e)
    }
}

impl From<rmp_serde::decode::Error> for StateError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Self::Decode(e)
    }
}

impl From<CartridgeError> for StateError {
    fn from(e: CartridgeError) -> Self {
        Self::Cartridge(e)
    }
}
