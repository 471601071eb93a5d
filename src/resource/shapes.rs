//! The three headers concrete catalog resources start with.
//!
//! A concrete resource holds one of these as its first field and appends its own fields after it; nothing
//! here knows about the concrete types.

use std::io::{Read, Seek, Write};

use binrw::{BinRead, BinReaderExt, BinResult, BinWrite, BinWriterExt, Endian};
use log::trace;

use crate::error::CatalogError;
use crate::tgi::{TgiLayout, TgiReference};

use super::common::{CatalogCommon, FNV32_OFFSET_BASIS};
use super::lists::{CatalogTagList, ColorList, CountWidth, SellingPointList, TagFormat, TgiList};

pub const DEFAULT_SIMPLE_VERSION: u32 = 0x07;
pub const DEFAULT_SIMPLE_COMMON_VERSION: u32 = 0x0A;
pub const DEFAULT_ABSTRACT_VERSION: u32 = 0x19;
pub const DEFAULT_ABSTRACT_COMMON_VERSION: u32 = 0x0B;
pub const DEFAULT_OBJECT_VERSION: u32 = 0x06;
pub const DEFAULT_OBJECT_CATALOG_VERSION: u32 = 0x08;

/// First abstract resource version carrying the fallback object key.
pub const FALLBACK_OBJECT_VERSION: u32 = 0x19;

//---------------------------------------------------------------------------//
//                              Simple
//---------------------------------------------------------------------------//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleCatalogResource {
    pub version: u32,
    pub common: CatalogCommon,
}

impl Default for SimpleCatalogResource {
    fn default() -> Self {
        Self::new(DEFAULT_SIMPLE_VERSION, CatalogCommon::with_version(DEFAULT_SIMPLE_COMMON_VERSION))
    }
}

impl SimpleCatalogResource {
    pub fn new(version: u32, common: CatalogCommon) -> Self {
        Self { version, common }
    }
}

impl BinRead for SimpleCatalogResource {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let version = reader.read_le::<u32>()?;
        let common = reader.read_le::<CatalogCommon>()?;
        Ok(Self { version, common })
    }
}

impl BinWrite for SimpleCatalogResource {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        writer.write_le(&self.version)?;
        writer.write_le(&self.common)
    }
}

//---------------------------------------------------------------------------//
//                              Abstract
//---------------------------------------------------------------------------//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuralMaterials {
    pub version: u8,
    pub materials1: u32,
    pub materials2: u32,
    pub materials3: u32,
}

impl Default for AuralMaterials {
    fn default() -> Self {
        Self {
            version: 1,
            materials1: FNV32_OFFSET_BASIS,
            materials2: FNV32_OFFSET_BASIS,
            materials3: FNV32_OFFSET_BASIS,
        }
    }
}

/// Sound properties. `version` decides how many of the fields exist on the wire (1 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuralProperties {
    pub version: u8,
    pub quality: u32,
    pub ambient_object: u32,
    pub ambience_file_instance_id: u64,
    pub is_override_ambience: u8,
    pub unknown01: u8,
}

impl Default for AuralProperties {
    fn default() -> Self {
        Self {
            version: 2,
            quality: FNV32_OFFSET_BASIS,
            ambient_object: FNV32_OFFSET_BASIS,
            ambience_file_instance_id: 0,
            is_override_ambience: 0,
            unknown01: 0,
        }
    }
}

impl AuralProperties {
    pub const MIN_VERSION: u8 = 1;
    pub const MAX_VERSION: u8 = 4;

    pub fn has_ambient_object(&self) -> bool {
        self.version >= 2
    }

    pub fn has_ambience_file(&self) -> bool {
        self.version >= 3
    }

    pub fn has_unknown01(&self) -> bool {
        self.version >= 4
    }
}

impl BinRead for AuralProperties {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        let version = reader.read_le::<u8>()?;
        if !(Self::MIN_VERSION..=Self::MAX_VERSION).contains(&version) {
            return Err(CatalogError::UnsupportedVersion { offset: pos, field: "aural properties", version: version as u32 }.into_binrw(pos));
        }

        let mut properties = Self { version, ..Self::default() };
        properties.quality = reader.read_le()?;
        if properties.has_ambient_object() {
            properties.ambient_object = reader.read_le()?;
        }
        if properties.has_ambience_file() {
            properties.ambience_file_instance_id = reader.read_le()?;
            properties.is_override_ambience = reader.read_le()?;
        }
        if properties.has_unknown01() {
            properties.unknown01 = reader.read_le()?;
        }
        Ok(properties)
    }
}

impl BinWrite for AuralProperties {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        writer.write_le(&self.version)?;
        writer.write_le(&self.quality)?;
        if self.has_ambient_object() {
            writer.write_le(&self.ambient_object)?;
        }
        if self.has_ambience_file() {
            writer.write_le(&self.ambience_file_instance_id)?;
            writer.write_le(&self.is_override_ambience)?;
        }
        if self.has_unknown01() {
            writer.write_le(&self.unknown01)?;
        }
        Ok(())
    }
}

/// Shared header of placeable objects: Simple header plus sound, placement and behaviour fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractCatalogResource {
    pub version: u32,
    pub common: CatalogCommon,
    pub aural_materials: AuralMaterials,
    pub aural_properties: AuralProperties,
    pub placement_flags_high: u32,
    pub placement_flags_low: u32,
    pub slot_type_set: u64,
    pub slot_deco_size: u8,
    pub catalog_group: u64,
    pub state_usage: u8,
    pub fence_height: u32,
    pub is_stackable: u8,
    pub can_item_depreciate: u8,
    pub colors: ColorList,
    pub fallback_object_key: TgiReference,
    pub unused0: u32,
    pub unused1: u32,
    pub unused2: u32,
}

impl Default for AbstractCatalogResource {
    fn default() -> Self {
        Self::new(DEFAULT_ABSTRACT_VERSION, CatalogCommon::with_version(DEFAULT_ABSTRACT_COMMON_VERSION))
    }
}

impl AbstractCatalogResource {
    pub fn new(version: u32, common: CatalogCommon) -> Self {
        Self {
            version,
            common,
            aural_materials: AuralMaterials::default(),
            aural_properties: AuralProperties::default(),
            placement_flags_high: 0,
            placement_flags_low: 0,
            slot_type_set: 0,
            slot_deco_size: 0,
            catalog_group: 0,
            state_usage: 0,
            fence_height: 0,
            is_stackable: 0,
            can_item_depreciate: 0,
            colors: ColorList::default(),
            fallback_object_key: TgiReference::EMPTY,
            unused0: 0,
            unused1: 0,
            unused2: 0,
        }
    }

    pub fn has_fallback_object_key(&self) -> bool {
        self.version >= FALLBACK_OBJECT_VERSION
    }
}

impl BinRead for AbstractCatalogResource {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let version = reader.read_le::<u32>()?;
        let common = reader.read_le::<CatalogCommon>()?;
        let mut resource = Self::new(version, common);

        resource.aural_materials = AuralMaterials {
            version: reader.read_le()?,
            materials1: reader.read_le()?,
            materials2: reader.read_le()?,
            materials3: reader.read_le()?,
        };
        resource.aural_properties = reader.read_le()?;

        resource.placement_flags_high = reader.read_le()?;
        resource.placement_flags_low = reader.read_le()?;
        resource.slot_type_set = reader.read_le()?;
        resource.slot_deco_size = reader.read_le()?;
        resource.catalog_group = reader.read_le()?;
        resource.state_usage = reader.read_le()?;
        resource.fence_height = reader.read_le()?;
        resource.is_stackable = reader.read_le()?;
        resource.can_item_depreciate = reader.read_le()?;
        resource.colors = reader.read_le()?;

        trace!("Abstract catalog version 0x{version:02X}: fallback key {}", resource.has_fallback_object_key());
        if resource.has_fallback_object_key() {
            resource.fallback_object_key = reader.read_le_args((TgiLayout::Itg,))?;
        }

        resource.unused0 = reader.read_le()?;
        resource.unused1 = reader.read_le()?;
        resource.unused2 = reader.read_le()?;
        Ok(resource)
    }
}

impl BinWrite for AbstractCatalogResource {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        writer.write_le(&self.version)?;
        writer.write_le(&self.common)?;

        writer.write_le(&self.aural_materials.version)?;
        writer.write_le(&self.aural_materials.materials1)?;
        writer.write_le(&self.aural_materials.materials2)?;
        writer.write_le(&self.aural_materials.materials3)?;
        writer.write_le(&self.aural_properties)?;

        writer.write_le(&self.placement_flags_high)?;
        writer.write_le(&self.placement_flags_low)?;
        writer.write_le(&self.slot_type_set)?;
        writer.write_le(&self.slot_deco_size)?;
        writer.write_le(&self.catalog_group)?;
        writer.write_le(&self.state_usage)?;
        writer.write_le(&self.fence_height)?;
        writer.write_le(&self.is_stackable)?;
        writer.write_le(&self.can_item_depreciate)?;
        writer.write_le(&self.colors)?;

        if self.has_fallback_object_key() {
            writer.write_le_args(&self.fallback_object_key, (TgiLayout::Itg,))?;
        }

        writer.write_le(&self.unused0)?;
        writer.write_le(&self.unused1)?;
        writer.write_le(&self.unused2)?;
        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                              Object-style
//---------------------------------------------------------------------------//

/// Older header with its own field order, used by a few legacy-shaped resources. Tags are always 32-bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCatalogResource {
    pub version: u32,
    pub catalog_version: u32,
    pub name_hash: u32,
    pub description_hash: u32,
    pub price: u32,
    pub unknown1: u32,
    pub unknown2: u32,
    pub unknown3: u32,
    pub tgi_list: TgiList,
    pub unknown4: u16,
    pub tags: CatalogTagList,
    pub selling_points: SellingPointList,
    pub unknown5: u64,
    pub unknown6: u16,
    pub unknown7: u64,
}

impl Default for ObjectCatalogResource {
    fn default() -> Self {
        Self::new(DEFAULT_OBJECT_VERSION, DEFAULT_OBJECT_CATALOG_VERSION)
    }
}

impl ObjectCatalogResource {
    pub fn new(version: u32, catalog_version: u32) -> Self {
        Self {
            version,
            catalog_version,
            name_hash: FNV32_OFFSET_BASIS,
            description_hash: FNV32_OFFSET_BASIS,
            price: 0,
            unknown1: 0,
            unknown2: 0,
            unknown3: 0,
            tgi_list: TgiList::default(),
            unknown4: 0,
            tags: CatalogTagList::default(),
            selling_points: SellingPointList::default(),
            unknown5: 0,
            unknown6: 0,
            unknown7: 0,
        }
    }
}

impl BinRead for ObjectCatalogResource {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        Ok(Self {
            version: reader.read_le()?,
            catalog_version: reader.read_le()?,
            name_hash: reader.read_le()?,
            description_hash: reader.read_le()?,
            price: reader.read_le()?,
            unknown1: reader.read_le()?,
            unknown2: reader.read_le()?,
            unknown3: reader.read_le()?,
            tgi_list: reader.read_le_args((CountWidth::U8, TgiLayout::Itg))?,
            unknown4: reader.read_le()?,
            tags: CatalogTagList::read_v11(reader)?,
            selling_points: reader.read_le_args((TagFormat::V11,))?,
            unknown5: reader.read_le()?,
            unknown6: reader.read_le()?,
            unknown7: reader.read_le()?,
        })
    }
}

impl BinWrite for ObjectCatalogResource {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        writer.write_le(&self.version)?;
        writer.write_le(&self.catalog_version)?;
        writer.write_le(&self.name_hash)?;
        writer.write_le(&self.description_hash)?;
        writer.write_le(&self.price)?;
        writer.write_le(&self.unknown1)?;
        writer.write_le(&self.unknown2)?;
        writer.write_le(&self.unknown3)?;
        writer.write_le_args(&self.tgi_list, (CountWidth::U8, TgiLayout::Itg))?;
        writer.write_le(&self.unknown4)?;
        self.tags.write_v11(writer)?;
        writer.write_le_args(&self.selling_points, (TagFormat::V11,))?;
        writer.write_le(&self.unknown5)?;
        writer.write_le(&self.unknown6)?;
        writer.write_le(&self.unknown7)
    }
}
