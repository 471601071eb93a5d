//! The common block every Simple and Abstract catalog resource carries after its own version.

use std::io::{Cursor, Read, Seek, Write};

use binrw::{BinRead, BinReaderExt, BinResult, BinWrite, BinWriterExt, Endian};
use bitflags::bitflags;
use log::trace;

use crate::error::{CatalogError, Result};
use crate::tgi::TgiLayout;

use super::lists::{CatalogTagList, CountWidth, SellingPointList, TagFormat, TgiList};

/// FNV-1a 32-bit offset basis, the value of an unset 32-bit hash.
pub const FNV32_OFFSET_BASIS: u32 = 0x811C9DC5;

/// First common block version carrying the pack block.
pub const PACK_FIELDS_VERSION: u32 = 10;

/// First common block version storing tags as 32-bit values.
pub const WIDE_TAGS_VERSION: u32 = 11;

/// Common block version of a freshly created resource.
pub const DEFAULT_COMMON_VERSION: u32 = 0x0B;

bitflags! {

    /// Pack visibility options. Unknown bits are kept as-is.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PackFlags: u8 {
        const HIDE_IF_NOT_OWNED = 0x01;
        const SHOW_IN_CATALOG_PREVIEW = 0x02;
    }
}

/// Pack ownership block, present on the wire from common version 10.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PackInfo {
    pub pack_id: u16,
    pub pack_flags: PackFlags,
    pub reserved: [u8; 9],
}

impl PackInfo {
    pub const SIZE: usize = 12;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCommon {
    pub version: u32,
    pub name_hash: u32,
    pub description_hash: u32,
    pub price: u32,
    pub thumbnail_hash: u64,
    pub dev_category_flags: u32,
    pub product_styles: TgiList,
    pub pack: PackInfo,
    pub tags: CatalogTagList,
    pub selling_points: SellingPointList,
    pub unlock_by_hash: u32,
    pub unlocked_by_hash: u32,
    pub swatch_colors_sort_priority: u16,
    pub variant_thumb_image_hash: u64,
}

impl Default for CatalogCommon {
    fn default() -> Self {
        Self::with_version(DEFAULT_COMMON_VERSION)
    }
}

impl CatalogCommon {

    /// Empty block of the given version, hashes unset.
    pub fn with_version(version: u32) -> Self {
        Self {
            version,
            name_hash: FNV32_OFFSET_BASIS,
            description_hash: FNV32_OFFSET_BASIS,
            price: 0,
            thumbnail_hash: 0,
            dev_category_flags: 0,
            product_styles: TgiList::default(),
            pack: PackInfo::default(),
            tags: CatalogTagList::default(),
            selling_points: SellingPointList::default(),
            unlock_by_hash: FNV32_OFFSET_BASIS,
            unlocked_by_hash: FNV32_OFFSET_BASIS,
            swatch_colors_sort_priority: 0,
            variant_thumb_image_hash: 0,
        }
    }

    pub fn has_pack_fields(&self) -> bool {
        self.version >= PACK_FIELDS_VERSION
    }

    pub fn tag_format(&self) -> TagFormat {
        TagFormat::for_common_version(self.version)
    }

    /// Decodes a block from the start of `data`, returning it with the number of bytes consumed.
    pub fn parse(data: &[u8]) -> Result<(Self, usize)> {
        let mut cursor = Cursor::new(data);
        let common = cursor.read_le::<Self>().map_err(|e| CatalogError::from(e).at_end(data.len()))?;
        Ok((common, cursor.position() as usize))
    }

    /// Appends the encoded block to `out`, returning the number of bytes written.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<usize> {
        let start = out.len();
        let mut cursor = Cursor::new(out);
        cursor.set_position(start as u64);
        cursor.write_le(self)?;
        Ok(cursor.position() as usize - start)
    }

    /// Exact number of bytes `write_to` produces for the current field values.
    pub fn serialized_size(&self) -> usize {
        let format = self.tag_format();
        let pack = if self.has_pack_fields() { PackInfo::SIZE } else { 0 };

        4 + 4 + 4 + 4 + 8 + 4
            + self.product_styles.serialized_size(CountWidth::U8)
            + pack
            + self.tags.serialized_size(format)
            + self.selling_points.serialized_size(format)
            + 4 + 4 + 2 + 8
    }
}

impl BinRead for CatalogCommon {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let version = reader.read_le::<u32>()?;
        let name_hash = reader.read_le::<u32>()?;
        let description_hash = reader.read_le::<u32>()?;
        let price = reader.read_le::<u32>()?;
        let thumbnail_hash = reader.read_le::<u64>()?;
        let dev_category_flags = reader.read_le::<u32>()?;
        let product_styles = reader.read_le_args::<TgiList>((CountWidth::U8, TgiLayout::Itg))?;

        let pack = if version >= PACK_FIELDS_VERSION {
            let pack_id = reader.read_le::<u16>()?;
            let pack_flags = PackFlags::from_bits_retain(reader.read_le::<u8>()?);
            let reserved = reader.read_le::<[u8; 9]>()?;
            PackInfo { pack_id, pack_flags, reserved }
        } else {
            PackInfo::default()
        };

        let format = TagFormat::for_common_version(version);
        trace!("Common block version {version}: pack fields {}, tag format {format:?}", version >= PACK_FIELDS_VERSION);

        let tags = match format {
            TagFormat::Legacy => CatalogTagList::read_legacy(reader)?,
            TagFormat::V11 => CatalogTagList::read_v11(reader)?,
        };
        let selling_points = reader.read_le_args::<SellingPointList>((format,))?;

        Ok(Self {
            version,
            name_hash,
            description_hash,
            price,
            thumbnail_hash,
            dev_category_flags,
            product_styles,
            pack,
            tags,
            selling_points,
            unlock_by_hash: reader.read_le()?,
            unlocked_by_hash: reader.read_le()?,
            swatch_colors_sort_priority: reader.read_le()?,
            variant_thumb_image_hash: reader.read_le()?,
        })
    }
}

impl BinWrite for CatalogCommon {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        writer.write_le(&self.version)?;
        writer.write_le(&self.name_hash)?;
        writer.write_le(&self.description_hash)?;
        writer.write_le(&self.price)?;
        writer.write_le(&self.thumbnail_hash)?;
        writer.write_le(&self.dev_category_flags)?;
        writer.write_le_args(&self.product_styles, (CountWidth::U8, TgiLayout::Itg))?;

        if self.has_pack_fields() {
            writer.write_le(&self.pack.pack_id)?;
            writer.write_le(&self.pack.pack_flags.bits())?;
            writer.write_le(&self.pack.reserved)?;
        }

        let format = self.tag_format();
        match format {
            TagFormat::Legacy => self.tags.write_legacy(writer)?,
            TagFormat::V11 => self.tags.write_v11(writer)?,
        }
        writer.write_le_args(&self.selling_points, (format,))?;

        writer.write_le(&self.unlock_by_hash)?;
        writer.write_le(&self.unlocked_by_hash)?;
        writer.write_le(&self.swatch_colors_sort_priority)?;
        writer.write_le(&self.variant_thumb_image_hash)?;
        Ok(())
    }
}
