//! Build-mode structure resources: walls, floors, foundations, stairs and the like.

use std::io::{Read, Seek, Write};

use binrw::{binrw, BinRead, BinReaderExt, BinResult, BinWrite, BinWriterExt, Endian};

use crate::error::CatalogError;
use crate::tgi::{read_tgi_array, write_tgi_array, TgiLayout, TgiReference};

use super::common::{CatalogCommon, FNV32_OFFSET_BASIS};
use super::lists::{read_counted, write_counted, ColorList, CountWidth, TgiList};
use super::shapes::{SimpleCatalogResource, DEFAULT_SIMPLE_VERSION};
use super::CatalogResource;

/// Wall resource (0xD5F0F921)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CwalResource {
    pub base: SimpleCatalogResource,
    pub matd_list: WallMatdList,
    pub img_group_list: WallImgGroupList,
    pub unk01: u32,
    pub colors: ColorList,
    pub unk_iid01: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WallMatdList {
    pub entries: Vec<WallMatdEntry>,
}

impl BinRead for WallMatdList {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        Ok(Self { entries: read_counted(reader, CountWidth::U32)? })
    }
}

impl BinWrite for WallMatdList {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        write_counted(writer, CountWidth::U32, &self.entries, "wall material")
    }
}

#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct WallMatdEntry {
    pub matd_label: u32, // main wall height the material applies to
    #[brw(args(TgiLayout::Itg))]
    pub matd_ref: TgiReference,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WallImgGroupList {
    pub entries: Vec<WallImgGroup>,
}

impl BinRead for WallImgGroupList {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        Ok(Self { entries: read_counted(reader, CountWidth::U32)? })
    }
}

impl BinWrite for WallImgGroupList {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        write_counted(writer, CountWidth::U32, &self.entries, "wall image group")
    }
}

#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct WallImgGroup {
    pub unk01: u32,
    #[brw(args(TgiLayout::Itg))]
    pub img_ref: TgiReference,
}

impl CatalogResource for CwalResource {
    const RESOURCE_TYPE: u32 = 0xD5F0F921;
}

/// Foundation resource (0x2FAE983E)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq)]
#[brw(little)]
pub struct CfndResource {
    pub base: SimpleCatalogResource,
    pub unk01: u8,
    pub unk02: u8,
    #[brw(args(TgiLayout::Itg))]
    pub modl_ref1: TgiReference,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub float1: f32,
    pub float2: f32,
    #[brw(args(TgiLayout::Itg))]
    pub trim_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub modl_ref2: TgiReference,
    pub colors: ColorList,
}

impl CatalogResource for CfndResource {
    const RESOURCE_TYPE: u32 = 0x2FAE983E;
}

/// Stairs resource (0x9A20CD1C)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CstrResource {
    pub base: SimpleCatalogResource,
    pub references: StairReferences,
    pub unk01: u8,
    pub unk02: u8,
    pub unk03: u8,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
    pub unk05: u8,
}

impl CatalogResource for CstrResource {
    const RESOURCE_TYPE: u32 = 0x9A20CD1C;
}

impl CstrResource {

    /// Value of the indicator byte written before the reference block.
    pub fn references_indicator(&self) -> bool {
        matches!(self.references, StairReferences::Keys(_))
    }

    /// Switches to the other reference block. The block being switched to starts from its defaults.
    pub fn set_references_indicator(&mut self, keys: bool) {
        if keys != self.references_indicator() {
            self.references = if keys {
                StairReferences::Keys(StairKeyBlock::default())
            } else {
                StairReferences::Hashes(StairHashBlock::default())
            };
        }
    }

    pub fn key_block(&self) -> Option<&StairKeyBlock> {
        match &self.references {
            StairReferences::Keys(block) => Some(block),
            StairReferences::Hashes(_) => None,
        }
    }

    pub fn hash_block(&self) -> Option<&StairHashBlock> {
        match &self.references {
            StairReferences::Hashes(block) => Some(block),
            StairReferences::Keys(_) => None,
        }
    }
}

/// Stair models are referenced either by full keys or by hashes, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StairReferences {
    Keys(StairKeyBlock),
    Hashes(StairHashBlock),
}

impl Default for StairReferences {
    fn default() -> Self {
        Self::Keys(StairKeyBlock::default())
    }
}

#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct StairKeyBlock {
    #[brw(args(TgiLayout::Itg))]
    pub modl_ref01: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub modl_ref02: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub modl_ref03: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub unk_ref01: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub wall_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub obj_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub railing_ref: TgiReference,
}

#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct StairHashBlock {
    pub modl_hash01: u32,
    pub modl_hash02: u32,
    pub modl_hash03: u32,
    pub wall_hash: u32,
    pub obj_hash: u32,
}

impl Default for StairHashBlock {
    fn default() -> Self {
        Self {
            modl_hash01: FNV32_OFFSET_BASIS,
            modl_hash02: FNV32_OFFSET_BASIS,
            modl_hash03: FNV32_OFFSET_BASIS,
            wall_hash: FNV32_OFFSET_BASIS,
            obj_hash: FNV32_OFFSET_BASIS,
        }
    }
}

impl BinRead for StairReferences {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        match reader.read_le::<u8>()? {
            1 => Ok(Self::Keys(reader.read_le()?)),
            0 => Ok(Self::Hashes(reader.read_le()?)),
            tag => Err(CatalogError::UnknownValueTag { offset: pos, tag }.into_binrw(pos)),
        }
    }
}

impl BinWrite for StairReferences {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        match self {
            Self::Keys(block) => {
                writer.write_le(&1u8)?;
                writer.write_le(block)
            }
            Self::Hashes(block) => {
                writer.write_le(&0u8)?;
                writer.write_le(block)
            }
        }
    }
}

/// Floor resource (0xB4F762C9)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CflrResource {
    pub base: SimpleCatalogResource,
    pub unk01: u8,
    #[brw(args(CountWidth::U32, TgiLayout::Itg))]
    pub materials: TgiList,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
    pub unk02: u32,
}

impl CatalogResource for CflrResource {
    const RESOURCE_TYPE: u32 = 0xB4F762C9;
}

/// First terrain paint version carrying the second data blob.
pub const TERRAIN_BLOB2_VERSION: u32 = 0x19;

/// Terrain paint resource (0xEBCBB16C)
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CtptResource {
    pub base: SimpleCatalogResource,
    pub data_blob1: [u8; 29],
    #[brw(if(base.version >= TERRAIN_BLOB2_VERSION))]
    pub data_blob2: [u8; 16],
}

impl Default for CtptResource {
    fn default() -> Self {
        Self {
            base: SimpleCatalogResource::default(),
            data_blob1: [0; 29],
            data_blob2: [0; 16],
        }
    }
}

impl CtptResource {
    pub fn has_data_blob2(&self) -> bool {
        self.base.version >= TERRAIN_BLOB2_VERSION
    }
}

impl CatalogResource for CtptResource {
    const RESOURCE_TYPE: u32 = 0xEBCBB16C;
}

/// Pool pattern resource (0xA5DFFCF3)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CpmpResource {
    pub base: SimpleCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub material_ref: TgiReference,
    pub unk01: u32,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
}

impl CatalogResource for CpmpResource {
    const RESOURCE_TYPE: u32 = 0xA5DFFCF3;
}

/// Common block version of a freshly created color resource.
pub const DEFAULT_COLOR_COMMON_VERSION: u32 = 0x02;

/// Color resource (0x1D6DF1CF)
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CcolResource {
    pub base: SimpleCatalogResource,
    pub colors: ColorList,
    pub swatch_grouping: u64,
    pub unk01: u32,
}

impl Default for CcolResource {
    fn default() -> Self {
        Self {
            base: SimpleCatalogResource::new(DEFAULT_SIMPLE_VERSION, CatalogCommon::with_version(DEFAULT_COLOR_COMMON_VERSION)),
            colors: ColorList::default(),
            swatch_grouping: 0,
            unk01: 0,
        }
    }
}

impl CatalogResource for CcolResource {
    const RESOURCE_TYPE: u32 = 0x1D6DF1CF;
}

pub const STYLE_REFERENCE_COUNT: usize = 25;

/// Style resource (0x9F5CFF10)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CstlResource {
    pub base: SimpleCatalogResource,
    pub style_refs: [TgiReference; STYLE_REFERENCE_COUNT],
    pub unk01: u32,
    pub unk02: u32,
    pub colors: ColorList,
    pub swatch_grouping: u64,
}

impl CatalogResource for CstlResource {
    const RESOURCE_TYPE: u32 = 0x9F5CFF10;
}

impl BinRead for CstlResource {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        Ok(Self {
            base: reader.read_le()?,
            style_refs: read_tgi_array(reader, TgiLayout::Itg)?,
            unk01: reader.read_le()?,
            unk02: reader.read_le()?,
            colors: reader.read_le()?,
            swatch_grouping: reader.read_le()?,
        })
    }
}

impl BinWrite for CstlResource {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        writer.write_le(&self.base)?;
        write_tgi_array(writer, &self.style_refs, TgiLayout::Itg)?;
        writer.write_le(&self.unk01)?;
        writer.write_le(&self.unk02)?;
        writer.write_le(&self.colors)?;
        writer.write_le(&self.swatch_grouping)
    }
}
