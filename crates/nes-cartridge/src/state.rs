//! Save-state streams.
//!
//! A save-state is a short raw header followed by a sequence of typed
//! fields, each one a self-describing `MessagePack` value:
//!
//! ```text
//! "NESM"            4 bytes, magic
//! version           1 byte
//! mapper number     u16 field
//! PRG, CHR, mirror  base ROM fields (every board)
//! ...               board registers, appended in the board's own order
//! ```
//!
//! Readers consume fields in exactly the order writers produced them.

use std::fmt;
use std::io::{Read, Write};

use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StateError;

/// Magic bytes for cartridge save-state identification.
pub const SAVE_MAGIC: &[u8; 4] = b"NESM";

/// Current save-state format version.
pub const SAVE_VERSION: u8 = 1;

/// Sequential field writer.
pub struct StateWriter<'a> {
    inner: &'a mut dyn Write,
}

impl<'a> StateWriter<'a> {
    #[must_use]
    pub fn new(inner: &'a mut dyn Write) -> Self {
        Self { inner }
    }

    /// Magic, version and the mapper number of the board being saved.
    pub fn write_header(&mut self, mapper_number: u16) -> Result<(), StateError> {
        self.inner.write_all(SAVE_MAGIC)?;
        self.inner.write_all(&[SAVE_VERSION])?;
        self.write_field(&mapper_number)
    }

    pub fn write_field<T: Serialize>(&mut self, value: &T) -> Result<(), StateError> {
        rmp_serde::encode::write(&mut self.inner, value)?;
        Ok(())
    }

    /// ROM-sized byte runs, stored as one `bin` value rather than an
    /// array of integers.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        self.write_field(&RawBytes(bytes))
    }
}

/// Sequential field reader, the mirror of [`StateWriter`].
pub struct StateReader<'a> {
    inner: &'a mut dyn Read,
}

impl<'a> StateReader<'a> {
    #[must_use]
    pub fn new(inner: &'a mut dyn Read) -> Self {
        Self { inner }
    }

    /// Check magic and version, then return the saved mapper number.
    pub fn read_header(&mut self) -> Result<u16, StateError> {
        let mut magic = [0u8; 4];
        self.inner.read_exact(&mut magic)?;
        if &magic != SAVE_MAGIC {
            return Err(StateError::BadMagic);
        }

        let mut version = [0u8; 1];
        self.inner.read_exact(&mut version)?;
        if version[0] != SAVE_VERSION {
            return Err(StateError::UnsupportedVersion(version[0]));
        }

        self.read_field()
    }

    pub fn read_field<T: DeserializeOwned>(&mut self) -> Result<T, StateError> {
        Ok(rmp_serde::decode::from_read(&mut self.inner)?)
    }

    /// Read a run written by [`StateWriter::write_bytes`].
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, StateError> {
        Ok(self.read_field::<ByteBuf>()?.0)
    }
}

struct RawBytes<'a>(&'a [u8]);

impl Serialize for RawBytes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

struct ByteBuf(Vec<u8>);

impl<'de> Deserialize<'de> for ByteBuf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(ByteBufVisitor)
    }
}

struct ByteBufVisitor;

impl Visitor<'_> for ByteBufVisitor {
    type Value = ByteBuf;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte array")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<ByteBuf, E> {
        Ok(ByteBuf(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<ByteBuf, E> {
        Ok(ByteBuf(v))
    }
}
