//! Object definition resource (0xC0DB5AE7).
//!
//! Unlike the catalog resources, this one has no fixed field order. A `u16` version and a pointer to a
//! property table make up the header; each table entry maps a property ID to the absolute offset of its
//! value. The order of the table is kept as decoded, so re-encoding an untouched resource reproduces it.

use std::io::Cursor;

use binrw::BinReaderExt;
use byteorder::{LittleEndian, WriteBytesExt};
use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::error::{CatalogError, Result};
use crate::tgi::{ResourceKey, TgiLayout, TgiReference};

use super::lists::{capacity, read_bytes};
use super::value::ByteBool;
use super::Resource;

pub const DEFAULT_OBJECT_DEFINITION_VERSION: u16 = 2;

/// Size of the version and table position fields.
const HEADER_SIZE: usize = 6;

//---------------------------------------------------------------------------//
//                              Property IDs
//---------------------------------------------------------------------------//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    Name,
    Tuning,
    MaterialVariant,
    TuningId,
    Unknown3,
    Icon,
    Rig,
    Slot,
    Model,
    Footprint,
    Components,
    Unknown1,
    SimoleonPrice,
    ThumbnailGeometryState,
    PositiveEnvironmentScore,
    NegativeEnvironmentScore,
    Unknown2,
    IsBaby,
    EnvironmentScoreEmotionTags,
    EnvironmentScores,
    Unknown4,
    Other(u32),
}

impl PropertyId {
    pub fn id(self) -> u32 {
        match self {
            Self::Name => 0xE7F07786,
            Self::Tuning => 0x790FA4BC,
            Self::MaterialVariant => 0xECD5A95F,
            Self::TuningId => 0xB994039B,
            Self::Unknown3 => 0x52F7F4BC,
            Self::Icon => 0xCADED888,
            Self::Rig => 0xE206AE4F,
            Self::Slot => 0x8A85AFF3,
            Self::Model => 0x8D20ACC6,
            Self::Footprint => 0x6C737AD8,
            Self::Components => 0xE6E421FB,
            Self::Unknown1 => 0xAC8E1BC0,
            Self::SimoleonPrice => 0xE4F4FAA4,
            Self::ThumbnailGeometryState => 0x4233F8A0,
            Self::PositiveEnvironmentScore => 0x7236BEEA,
            Self::NegativeEnvironmentScore => 0x44FC7512,
            Self::Unknown2 => 0xEC3712E6,
            Self::IsBaby => 0xAEE67A1C,
            Self::EnvironmentScoreEmotionTags => 0x2172AEBE,
            Self::EnvironmentScores => 0xDCD08394,
            Self::Unknown4 => 0xF3936A90,
            Self::Other(id) => id,
        }
    }

    /// Shape of the value stored under this ID.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Name | Self::Tuning | Self::MaterialVariant => ValueKind::String,
            Self::TuningId | Self::Unknown3 => ValueKind::UInt64,
            Self::Icon | Self::Rig | Self::Slot | Self::Model | Self::Footprint => ValueKind::TgiList,
            Self::Components => ValueKind::UInt32List,
            Self::Unknown1 => ValueKind::Byte,
            Self::SimoleonPrice | Self::ThumbnailGeometryState => ValueKind::UInt32,
            Self::PositiveEnvironmentScore | Self::NegativeEnvironmentScore => ValueKind::Float,
            Self::Unknown2 | Self::IsBaby => ValueKind::Bool,
            Self::EnvironmentScoreEmotionTags => ValueKind::UInt16List,
            Self::EnvironmentScores => ValueKind::FloatList,
            Self::Unknown4 => ValueKind::Bytes,
            Self::Other(_) => ValueKind::Raw,
        }
    }
}

impl From<u32> for PropertyId {
    fn from(id: u32) -> Self {
        match id {
            0xE7F07786 => Self::Name,
            0x790FA4BC => Self::Tuning,
            0xECD5A95F => Self::MaterialVariant,
            0xB994039B => Self::TuningId,
            0x52F7F4BC => Self::Unknown3,
            0xCADED888 => Self::Icon,
            0xE206AE4F => Self::Rig,
            0x8A85AFF3 => Self::Slot,
            0x8D20ACC6 => Self::Model,
            0x6C737AD8 => Self::Footprint,
            0xE6E421FB => Self::Components,
            0xAC8E1BC0 => Self::Unknown1,
            0xE4F4FAA4 => Self::SimoleonPrice,
            0x4233F8A0 => Self::ThumbnailGeometryState,
            0x7236BEEA => Self::PositiveEnvironmentScore,
            0x44FC7512 => Self::NegativeEnvironmentScore,
            0xEC3712E6 => Self::Unknown2,
            0xAEE67A1C => Self::IsBaby,
            0x2172AEBE => Self::EnvironmentScoreEmotionTags,
            0xDCD08394 => Self::EnvironmentScores,
            0xF3936A90 => Self::Unknown4,
            other => Self::Other(other),
        }
    }
}

impl From<PropertyId> for u32 {
    fn from(id: PropertyId) -> Self {
        id.id()
    }
}

//---------------------------------------------------------------------------//
//                              Property values
//---------------------------------------------------------------------------//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    UInt64,
    TgiList,
    UInt32List,
    Byte,
    UInt32,
    Float,
    Bool,
    UInt16List,
    FloatList,
    Bytes,
    Raw,
}

impl ValueKind {
    pub fn default_value(self) -> PropertyValue {
        match self {
            Self::String => PropertyValue::String(String::new()),
            Self::UInt64 => PropertyValue::UInt64(0),
            Self::TgiList => PropertyValue::TgiList(Vec::new()),
            Self::UInt32List => PropertyValue::UInt32List(Vec::new()),
            Self::Byte => PropertyValue::Byte(0),
            Self::UInt32 => PropertyValue::UInt32(0),
            Self::Float => PropertyValue::Float(0.0),
            Self::Bool => PropertyValue::Bool(ByteBool::FALSE),
            Self::UInt16List => PropertyValue::UInt16List(Vec::new()),
            Self::FloatList => PropertyValue::FloatList(Vec::new()),
            Self::Bytes => PropertyValue::Bytes(Vec::new()),
            Self::Raw => PropertyValue::Raw(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    UInt64(u64),

    /// References stored with the instance halves swapped, behind a byte count.
    TgiList(Vec<TgiReference>),
    UInt32List(Vec<u32>),
    Byte(u8),
    UInt32(u32),
    Float(f32),
    Bool(ByteBool),
    UInt16List(Vec<u16>),
    FloatList(Vec<f32>),

    /// Length-prefixed blob.
    Bytes(Vec<u8>),

    /// Value of an unrecognized property, kept byte for byte.
    Raw(Vec<u8>),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::UInt64(_) => ValueKind::UInt64,
            Self::TgiList(_) => ValueKind::TgiList,
            Self::UInt32List(_) => ValueKind::UInt32List,
            Self::Byte(_) => ValueKind::Byte,
            Self::UInt32(_) => ValueKind::UInt32,
            Self::Float(_) => ValueKind::Float,
            Self::Bool(_) => ValueKind::Bool,
            Self::UInt16List(_) => ValueKind::UInt16List,
            Self::FloatList(_) => ValueKind::FloatList,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Raw(_) => ValueKind::Raw,
        }
    }
}

fn read_value(cursor: &mut Cursor<&[u8]>, kind: ValueKind) -> Result<PropertyValue> {
    let value = match kind {
        ValueKind::String => {
            let pos = cursor.position();
            let len = cursor.read_le::<u32>()? as usize;
            let buf = read_bytes(cursor, len)?;
            let string = String::from_utf8(buf).map_err(|e| CatalogError::InvalidMagicOrHeader {
                offset: pos,
                reason: format!("property string is not UTF-8: {e}"),
            })?;
            PropertyValue::String(string)
        }
        ValueKind::UInt64 => PropertyValue::UInt64(cursor.read_le::<u64>()?),
        ValueKind::TgiList => {
            let pos = cursor.position();
            let byte_count = cursor.read_le::<u32>()? as usize;
            if byte_count % TgiReference::SIZE != 0 {
                return Err(CatalogError::InvalidMagicOrHeader {
                    offset: pos,
                    reason: format!("TGI list byte count {byte_count} is not a multiple of {}", TgiReference::SIZE),
                });
            }

            let count = byte_count / TgiReference::SIZE;
            let mut refs = Vec::with_capacity(capacity(count));
            for _ in 0..count {
                refs.push(cursor.read_le_args::<TgiReference>((TgiLayout::SwappedItg,))?);
            }
            PropertyValue::TgiList(refs)
        }
        ValueKind::UInt32List => {
            let count = cursor.read_le::<u32>()? as usize;
            let mut values = Vec::with_capacity(capacity(count));
            for _ in 0..count {
                values.push(cursor.read_le::<u32>()?);
            }
            PropertyValue::UInt32List(values)
        }
        ValueKind::Byte => PropertyValue::Byte(cursor.read_le()?),
        ValueKind::UInt32 => PropertyValue::UInt32(cursor.read_le::<u32>()?),
        ValueKind::Float => PropertyValue::Float(cursor.read_le::<f32>()?),
        ValueKind::Bool => PropertyValue::Bool(cursor.read_le()?),
        ValueKind::UInt16List => {
            let count = cursor.read_le::<u32>()? as usize;
            let mut values = Vec::with_capacity(capacity(count));
            for _ in 0..count {
                values.push(cursor.read_le::<u16>()?);
            }
            PropertyValue::UInt16List(values)
        }
        ValueKind::FloatList => {
            let count = cursor.read_le::<u32>()? as usize;
            let mut values = Vec::with_capacity(capacity(count));
            for _ in 0..count {
                values.push(cursor.read_le::<f32>()?);
            }
            PropertyValue::FloatList(values)
        }
        ValueKind::Bytes => {
            let len = cursor.read_le::<u32>()? as usize;
            PropertyValue::Bytes(read_bytes(cursor, len)?)
        }

        // Raw spans are cut by the caller, which knows the boundaries.
        ValueKind::Raw => PropertyValue::Raw(Vec::new()),
    };
    Ok(value)
}

fn write_len(out: &mut Vec<u8>, len: usize, field: &'static str) -> Result<()> {
    let len = u32::try_from(len).map_err(|_| CatalogError::CountOverflow { field, len, max: u32::MAX as u64 })?;
    out.write_u32::<LittleEndian>(len)?;
    Ok(())
}

fn write_value(out: &mut Vec<u8>, value: &PropertyValue) -> Result<()> {
    match value {
        PropertyValue::String(value) => {
            write_len(out, value.len(), "property string")?;
            out.extend_from_slice(value.as_bytes());
        }
        PropertyValue::UInt64(value) => out.write_u64::<LittleEndian>(*value)?,
        PropertyValue::TgiList(refs) => {
            write_len(out, refs.len().saturating_mul(TgiReference::SIZE), "property TGI")?;
            for tgi in refs {
                tgi.encode(out, TgiLayout::SwappedItg)?;
            }
        }
        PropertyValue::UInt32List(values) => {
            write_len(out, values.len(), "property u32")?;
            for value in values {
                out.write_u32::<LittleEndian>(*value)?;
            }
        }
        PropertyValue::Byte(value) => out.write_u8(*value)?,
        PropertyValue::UInt32(value) => out.write_u32::<LittleEndian>(*value)?,
        PropertyValue::Float(value) => out.write_f32::<LittleEndian>(*value)?,
        PropertyValue::Bool(value) => out.write_u8(value.raw())?,
        PropertyValue::UInt16List(values) => {
            write_len(out, values.len(), "property u16")?;
            for value in values {
                out.write_u16::<LittleEndian>(*value)?;
            }
        }
        PropertyValue::FloatList(values) => {
            write_len(out, values.len(), "property float")?;
            for value in values {
                out.write_f32::<LittleEndian>(*value)?;
            }
        }
        PropertyValue::Bytes(bytes) => {
            write_len(out, bytes.len(), "property blob")?;
            out.extend_from_slice(bytes);
        }
        PropertyValue::Raw(bytes) => out.extend_from_slice(bytes),
    }
    Ok(())
}

//---------------------------------------------------------------------------//
//                              Resource
//---------------------------------------------------------------------------//

/// Object definition resource (0xC0DB5AE7)
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDefinitionResource {
    pub version: u16,
    properties: IndexMap<u32, PropertyValue>,
}

impl Default for ObjectDefinitionResource {
    fn default() -> Self {
        Self::new(DEFAULT_OBJECT_DEFINITION_VERSION)
    }
}

macro_rules! string_property {
    ($get:ident, $set:ident, $id:ident) => {
        pub fn $get(&self) -> Option<&str> {
            match self.properties.get(&PropertyId::$id.id()) {
                Some(PropertyValue::String(value)) => Some(value.as_str()),
                _ => None,
            }
        }

        pub fn $set(&mut self, value: impl Into<String>) {
            self.properties.insert(PropertyId::$id.id(), PropertyValue::String(value.into()));
        }
    };
}

macro_rules! scalar_property {
    ($get:ident, $set:ident, $id:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self) -> Option<$ty> {
            match self.properties.get(&PropertyId::$id.id()) {
                Some(PropertyValue::$variant(value)) => Some(*value),
                _ => None,
            }
        }

        pub fn $set(&mut self, value: $ty) {
            self.properties.insert(PropertyId::$id.id(), PropertyValue::$variant(value));
        }
    };
}

// Setters store 0 or 1; a decoded byte is kept as read.
macro_rules! bool_property {
    ($get:ident, $set:ident, $id:ident) => {
        pub fn $get(&self) -> Option<bool> {
            match self.properties.get(&PropertyId::$id.id()) {
                Some(PropertyValue::Bool(value)) => Some(value.get()),
                _ => None,
            }
        }

        pub fn $set(&mut self, value: bool) {
            self.properties.insert(PropertyId::$id.id(), PropertyValue::Bool(ByteBool::from(value)));
        }
    };
}

macro_rules! list_property {
    ($get:ident, $set:ident, $id:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self) -> Option<&[$ty]> {
            match self.properties.get(&PropertyId::$id.id()) {
                Some(PropertyValue::$variant(values)) => Some(values.as_slice()),
                _ => None,
            }
        }

        pub fn $set(&mut self, values: Vec<$ty>) {
            self.properties.insert(PropertyId::$id.id(), PropertyValue::$variant(values));
        }
    };
}

impl ObjectDefinitionResource {
    pub const RESOURCE_TYPE: u32 = 0xC0DB5AE7;

    /// Resource with no properties.
    pub fn new(version: u16) -> Self {
        Self { version, properties: IndexMap::new() }
    }

    pub fn has_property(&self, id: PropertyId) -> bool {
        self.properties.contains_key(&id.id())
    }

    /// Adds `id` with the default value of its type. Does nothing if it is already present.
    pub fn add_property(&mut self, id: PropertyId) {
        let id = PropertyId::from(id.id());
        self.properties.entry(id.id()).or_insert_with(|| id.kind().default_value());
    }

    /// Removes `id`, keeping the order of the remaining properties.
    pub fn remove_property(&mut self, id: PropertyId) -> Option<PropertyValue> {
        self.properties.shift_remove(&id.id())
    }

    pub fn property(&self, id: PropertyId) -> Option<&PropertyValue> {
        self.properties.get(&id.id())
    }

    /// Properties in table order.
    pub fn properties(&self) -> impl Iterator<Item = (PropertyId, &PropertyValue)> {
        self.properties.iter().map(|(id, value)| (PropertyId::from(*id), value))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Stores the raw bytes of a property this crate has no type for.
    ///
    /// Known IDs are rejected, as their bytes would be read back as a typed value.
    pub fn set_raw_property(&mut self, id: u32, bytes: Vec<u8>) -> Result<()> {
        if PropertyId::from(id).kind() != ValueKind::Raw {
            return Err(CatalogError::Other(format!("property 0x{id:08X} has a known type and cannot hold raw bytes")));
        }
        self.properties.insert(id, PropertyValue::Raw(bytes));
        Ok(())
    }

    string_property!(name, set_name, Name);
    string_property!(tuning, set_tuning, Tuning);
    string_property!(material_variant, set_material_variant, MaterialVariant);
    scalar_property!(tuning_id, set_tuning_id, TuningId, UInt64, u64);
    scalar_property!(unknown3, set_unknown3, Unknown3, UInt64, u64);
    list_property!(icon, set_icon, Icon, TgiList, TgiReference);
    list_property!(rig, set_rig, Rig, TgiList, TgiReference);
    list_property!(slot, set_slot, Slot, TgiList, TgiReference);
    list_property!(model, set_model, Model, TgiList, TgiReference);
    list_property!(footprint, set_footprint, Footprint, TgiList, TgiReference);
    list_property!(components, set_components, Components, UInt32List, u32);
    scalar_property!(unknown1, set_unknown1, Unknown1, Byte, u8);
    scalar_property!(simoleon_price, set_simoleon_price, SimoleonPrice, UInt32, u32);
    scalar_property!(thumbnail_geometry_state, set_thumbnail_geometry_state, ThumbnailGeometryState, UInt32, u32);
    scalar_property!(positive_environment_score, set_positive_environment_score, PositiveEnvironmentScore, Float, f32);
    scalar_property!(negative_environment_score, set_negative_environment_score, NegativeEnvironmentScore, Float, f32);
    bool_property!(unknown2, set_unknown2, Unknown2);
    bool_property!(is_baby, set_is_baby, IsBaby);
    list_property!(environment_score_emotion_tags, set_environment_score_emotion_tags, EnvironmentScoreEmotionTags, UInt16List, u16);
    list_property!(environment_scores, set_environment_scores, EnvironmentScores, FloatList, f32);
    list_property!(unknown4, set_unknown4, Unknown4, Bytes, u8);

    fn decode(data: &[u8]) -> Result<Self> {
        let len = data.len() as u64;
        let mut cursor = Cursor::new(data);
        let version = cursor.read_le::<u16>()?;
        let table_pos = cursor.read_le::<u32>()? as u64;
        if table_pos >= len {
            return Err(CatalogError::InvalidMagicOrHeader {
                offset: 2,
                reason: format!("property table position {table_pos} is outside the {len} byte buffer"),
            });
        }

        cursor.set_position(table_pos);
        let count = cursor.read_le::<u16>()? as usize;
        let mut entries = Vec::with_capacity(capacity(count));
        for _ in 0..count {
            let entry_pos = cursor.position();
            let id = cursor.read_le::<u32>()?;
            let offset = cursor.read_le::<u32>()? as u64;
            if offset > len {
                return Err(CatalogError::InvalidMagicOrHeader {
                    offset: entry_pos,
                    reason: format!("property 0x{id:08X} points at {offset}, outside the {len} byte buffer"),
                });
            }
            entries.push((id, offset));
        }
        trace!("Property table at {table_pos}: {count} entries");

        let mut properties = IndexMap::with_capacity(entries.len());
        for (index, (id, offset)) in entries.iter().copied().enumerate() {
            let value = match PropertyId::from(id) {
                PropertyId::Other(_) => {

                    // The span runs to the closest value starting after it, the table, or the end of the
                    // buffer. Values are laid out in table order, so a later entry at the same offset means
                    // this one is empty.
                    let end = entries.iter()
                        .enumerate()
                        .filter(|(other, (_, start))| *start > offset || (*start == offset && *other > index))
                        .map(|(_, (_, start))| *start)
                        .chain([table_pos, len].into_iter().filter(|boundary| *boundary >= offset))
                        .min()
                        .unwrap_or(len);

                    warn!("Keeping unknown property 0x{id:08X} as {} raw bytes", end - offset);
                    PropertyValue::Raw(data[offset as usize..end as usize].to_vec())
                }
                known => {
                    cursor.set_position(offset);
                    read_value(&mut cursor, known.kind())?
                }
            };

            if properties.insert(id, value).is_some() {
                return Err(CatalogError::InvalidMagicOrHeader {
                    offset: table_pos,
                    reason: format!("property 0x{id:08X} appears twice in the table"),
                });
            }
        }

        Ok(Self { version, properties })
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_SIZE + 2 + self.properties.len() * 8);
        out.write_u16::<LittleEndian>(self.version)?;
        out.write_u32::<LittleEndian>(0)?;

        let mut table = Vec::with_capacity(self.properties.len());
        for (id, value) in &self.properties {
            table.push((*id, buffer_offset(out.len())?));
            write_value(&mut out, value)?;
        }

        let table_pos = buffer_offset(out.len())?;
        let count = u16::try_from(table.len())
            .map_err(|_| CatalogError::CountOverflow { field: "property", len: table.len(), max: u16::MAX as u64 })?;
        out.write_u16::<LittleEndian>(count)?;
        for (id, offset) in table {
            out.write_u32::<LittleEndian>(id)?;
            out.write_u32::<LittleEndian>(offset)?;
        }

        out[2..HEADER_SIZE].copy_from_slice(&table_pos.to_le_bytes());
        Ok(out)
    }
}

fn buffer_offset(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CatalogError::Other(format!("property data grew past 4 GiB ({len} bytes)")))
}

impl Resource for ObjectDefinitionResource {
    fn from_bytes(key: &ResourceKey, data: &[u8]) -> Result<Self> {
        if key.res_type != Self::RESOURCE_TYPE {
            warn!("Decoding {} as an object definition, whose type is 0x{:08X}", key, Self::RESOURCE_TYPE);
        }

        if data.is_empty() {
            debug!("Creating empty object definition for {}", key);
            return Ok(Self::default());
        }

        debug!("Decoding {} as an object definition ({} bytes)", key, data.len());
        Self::decode(data).map_err(|e| e.at_end(data.len()))
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        self.encode()
    }
}
