//! Tagged values: a type byte followed by a payload whose shape the byte selects.

use std::io::{Read, Seek, Write};

use binrw::{binrw, BinRead, BinReaderExt, BinResult, BinWrite, BinWriterExt, Endian};

use crate::error::CatalogError;

use super::lists::{capacity, read_bytes, read_count, write_count, CountWidth};

/// Boolean stored in one byte. Any non-zero byte reads as `true`, and the byte itself is written back unchanged.
#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct ByteBool(pub u8);

impl ByteBool {
    pub const FALSE: Self = Self(0);
    pub const TRUE: Self = Self(1);

    pub fn get(self) -> bool {
        self.0 != 0
    }

    pub fn raw(self) -> u8 {
        self.0
    }
}

impl From<bool> for ByteBool {
    fn from(value: bool) -> Self {
        if value { Self::TRUE } else { Self::FALSE }
    }
}

impl From<ByteBool> for bool {
    fn from(value: ByteBool) -> Self {
        value.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    Bool(ByteBool),
    Byte(u8),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    String(String),
}

impl Default for TaggedValue {
    fn default() -> Self {
        Self::UInt32(0)
    }
}

impl TaggedValue {

    /// Wire discriminant.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Byte(_) => 1,
            Self::Int32(_) => 2,
            Self::UInt32(_) => 3,
            Self::Int64(_) => 4,
            Self::UInt64(_) => 5,
            Self::Float(_) => 6,
            Self::String(_) => 7,
        }
    }
}

impl BinRead for TaggedValue {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        let tag = reader.read_le::<u8>()?;
        let value = match tag {
            0 => Self::Bool(reader.read_le()?),
            1 => Self::Byte(reader.read_le::<u8>()?),
            2 => Self::Int32(reader.read_le::<i32>()?),
            3 => Self::UInt32(reader.read_le::<u32>()?),
            4 => Self::Int64(reader.read_le::<i64>()?),
            5 => Self::UInt64(reader.read_le::<u64>()?),
            6 => Self::Float(reader.read_le::<f32>()?),
            7 => {
                let len = read_count(reader, CountWidth::U32)?;
                let buf = read_bytes(reader, len)?;
                let string = String::from_utf8(buf).map_err(|e| {
                    CatalogError::InvalidMagicOrHeader { offset: pos, reason: format!("tagged string is not UTF-8: {e}") }.into_binrw(pos)
                })?;
                Self::String(string)
            }
            _ => return Err(CatalogError::UnknownValueTag { offset: pos, tag }.into_binrw(pos)),
        };
        Ok(value)
    }
}

impl BinWrite for TaggedValue {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        writer.write_le(&self.tag())?;
        match self {
            Self::Bool(value) => writer.write_le(value),
            Self::Byte(value) => writer.write_le(value),
            Self::Int32(value) => writer.write_le(value),
            Self::UInt32(value) => writer.write_le(value),
            Self::Int64(value) => writer.write_le(value),
            Self::UInt64(value) => writer.write_le(value),
            Self::Float(value) => writer.write_le(value),
            Self::String(value) => {
                write_count(writer, CountWidth::U32, value.len(), "string")?;
                writer.write_all(value.as_bytes())?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaggedEntry {
    pub key: u32,
    pub value: TaggedValue,
}

/// `u32`-counted list of keyed tagged values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaggedValueList {
    pub entries: Vec<TaggedEntry>,
}

impl TaggedValueList {
    pub fn new(entries: Vec<TaggedEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: u32) -> Option<&TaggedValue> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| &entry.value)
    }
}

impl BinRead for TaggedValueList {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let count = read_count(reader, CountWidth::U32)?;
        let mut entries = Vec::with_capacity(capacity(count));
        for _ in 0..count {
            let key = reader.read_le::<u32>()?;
            let value = reader.read_le::<TaggedValue>()?;
            entries.push(TaggedEntry { key, value });
        }
        Ok(Self { entries })
    }
}

impl BinWrite for TaggedValueList {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        write_count(writer, CountWidth::U32, self.entries.len(), "tagged value")?;
        for entry in &self.entries {
            writer.write_le(&entry.key)?;
            writer.write_le(&entry.value)?;
        }
        Ok(())
    }
}
