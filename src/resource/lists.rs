//! Self-delimiting list codecs shared by the catalog shapes.
//!
//! Every list is a count followed by fixed-size elements. The width of the count is a property of the
//! call site, not of the data, so it travels as a binrw argument.

use std::io::{Read, Seek, Write};

use binrw::{BinRead, BinReaderExt, BinResult, BinWrite, BinWriterExt, Endian};

use crate::error::CatalogError;
use crate::tgi::{TgiLayout, TgiReference};

/// Width of a list's count prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountWidth {
    U8,
    U16,
    U32,
    I32,
}

impl CountWidth {
    fn max(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::I32 => i32::MAX as u64,
        }
    }
}

pub(crate) fn read_count<R: Read + Seek>(reader: &mut R, width: CountWidth) -> BinResult<usize> {
    let pos = reader.stream_position()?;
    let count = match width {
        CountWidth::U8 => reader.read_le::<u8>()? as usize,
        CountWidth::U16 => reader.read_le::<u16>()? as usize,
        CountWidth::U32 => reader.read_le::<u32>()? as usize,
        CountWidth::I32 => {
            let count = reader.read_le::<i32>()?;
            if count < 0 {
                return Err(CatalogError::InvalidMagicOrHeader { offset: pos, reason: format!("negative list count {count}") }.into_binrw(pos));
            }
            count as usize
        }
    };
    Ok(count)
}

pub(crate) fn write_count<W: Write + Seek>(writer: &mut W, width: CountWidth, len: usize, field: &'static str) -> BinResult<()> {
    if len as u64 > width.max() {
        let pos = writer.stream_position()?;
        return Err(CatalogError::CountOverflow { field, len, max: width.max() }.into_binrw(pos));
    }

    match width {
        CountWidth::U8 => writer.write_le(&(len as u8)),
        CountWidth::U16 => writer.write_le(&(len as u16)),
        CountWidth::U32 => writer.write_le(&(len as u32)),
        CountWidth::I32 => writer.write_le(&(len as i32)),
    }
}

/// Reads a list of self-contained elements behind a count of the given width.
pub fn read_counted<R, T>(reader: &mut R, width: CountWidth) -> BinResult<Vec<T>>
where
    R: Read + Seek,
    T: for<'a> BinRead<Args<'a> = ()>,
{
    let count = read_count(reader, width)?;
    let mut items = Vec::with_capacity(capacity(count));
    for _ in 0..count {
        items.push(reader.read_le::<T>()?);
    }
    Ok(items)
}

/// Writes `items` behind a count of the given width. A list too long for the width is a `CountOverflow`.
pub fn write_counted<W, T>(writer: &mut W, width: CountWidth, items: &[T], field: &'static str) -> BinResult<()>
where
    W: Write + Seek,
    T: for<'a> BinWrite<Args<'a> = ()>,
{
    write_count(writer, width, items.len(), field)?;
    for item in items {
        writer.write_le(item)?;
    }
    Ok(())
}

/// Reads exactly `len` bytes without trusting `len` for the allocation.
pub(crate) fn read_bytes<R: Read + Seek>(reader: &mut R, len: usize) -> BinResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(capacity(len));
    (&mut *reader).take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

// Counts come from untrusted data; cap the up-front allocation and let the reads fail instead.
pub(crate) fn capacity(count: usize) -> usize {
    count.min(256)
}

//---------------------------------------------------------------------------//
//                              Colors
//---------------------------------------------------------------------------//

/// Packed ARGB swatch colors, byte-counted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColorList {
    pub colors: Vec<u32>,
}

impl ColorList {
    pub fn new(colors: Vec<u32>) -> Self {
        Self { colors }
    }

    pub fn serialized_size(&self) -> usize {
        1 + self.colors.len() * 4
    }
}

impl BinRead for ColorList {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, _args: Self::Args<'_>) -> BinResult<Self> {
        let count = read_count(reader, CountWidth::U8)?;
        let mut colors = Vec::with_capacity(capacity(count));
        for _ in 0..count {
            colors.push(reader.read_le::<u32>()?);
        }
        Ok(Self { colors })
    }
}

impl BinWrite for ColorList {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, _args: Self::Args<'_>) -> BinResult<()> {
        write_count(writer, CountWidth::U8, self.colors.len(), "color")?;
        for color in &self.colors {
            writer.write_le(color)?;
        }
        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                              Tags
//---------------------------------------------------------------------------//

/// Physical tag encoding. Chosen by the owner of the list from its version, never from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {

    /// 16-bit count, 16-bit tags. Common block versions below 11.
    Legacy,

    /// 32-bit count, 32-bit tags.
    V11,
}

impl TagFormat {
    pub fn for_common_version(version: u32) -> Self {
        if version >= 11 {
            Self::V11
        } else {
            Self::Legacy
        }
    }

    fn width(self) -> CountWidth {
        match self {
            Self::Legacy => CountWidth::U16,
            Self::V11 => CountWidth::U32,
        }
    }

    fn tag_size(self) -> usize {
        match self {
            Self::Legacy => 2,
            Self::V11 => 4,
        }
    }
}

fn read_tag<R: Read + Seek>(reader: &mut R, format: TagFormat) -> BinResult<u32> {
    match format {
        TagFormat::Legacy => Ok(reader.read_le::<u16>()? as u32),
        TagFormat::V11 => reader.read_le::<u32>(),
    }
}

fn write_tag<W: Write + Seek>(writer: &mut W, format: TagFormat, tag: u32) -> BinResult<()> {
    match format {
        TagFormat::Legacy => {
            let narrow = u16::try_from(tag).map_err(|_| {
                let pos = writer.stream_position().unwrap_or_default();
                CatalogError::TagOutOfRange { tag }.into_binrw(pos)
            })?;
            writer.write_le(&narrow)
        }
        TagFormat::V11 => writer.write_le(&tag),
    }
}

/// Catalog tags. Always held as `u32`; the legacy format narrows them on write.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogTagList {
    pub tags: Vec<u32>,
}

impl CatalogTagList {
    pub fn new(tags: Vec<u32>) -> Self {
        Self { tags }
    }

    pub fn read_legacy<R: Read + Seek>(reader: &mut R) -> BinResult<Self> {
        reader.read_le_args((TagFormat::Legacy,))
    }

    pub fn read_v11<R: Read + Seek>(reader: &mut R) -> BinResult<Self> {
        reader.read_le_args((TagFormat::V11,))
    }

    pub fn write_legacy<W: Write + Seek>(&self, writer: &mut W) -> BinResult<()> {
        writer.write_le_args(self, (TagFormat::Legacy,))
    }

    pub fn write_v11<W: Write + Seek>(&self, writer: &mut W) -> BinResult<()> {
        writer.write_le_args(self, (TagFormat::V11,))
    }

    pub fn serialized_size(&self, format: TagFormat) -> usize {
        format.tag_size() + self.tags.len() * format.tag_size()
    }
}

impl BinRead for CatalogTagList {
    type Args<'a> = (TagFormat,);

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, args: Self::Args<'_>) -> BinResult<Self> {
        let format = args.0;
        let count = read_count(reader, format.width())?;
        let mut tags = Vec::with_capacity(capacity(count));
        for _ in 0..count {
            tags.push(read_tag(reader, format)?);
        }
        Ok(Self { tags })
    }
}

impl BinWrite for CatalogTagList {
    type Args<'a> = (TagFormat,);

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, args: Self::Args<'_>) -> BinResult<()> {
        let format = args.0;
        write_count(writer, format.width(), self.tags.len(), "tag")?;
        for tag in &self.tags {
            write_tag(writer, format, *tag)?;
        }
        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                              Selling points
//---------------------------------------------------------------------------//

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SellingPoint {
    pub commodity: u32,
    pub amount: i32,
}

/// Selling points, `i32`-counted. The commodity tag shares the width of the owner's tag list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SellingPointList {
    pub points: Vec<SellingPoint>,
}

impl SellingPointList {
    pub fn new(points: Vec<SellingPoint>) -> Self {
        Self { points }
    }

    pub fn serialized_size(&self, format: TagFormat) -> usize {
        4 + self.points.len() * (format.tag_size() + 4)
    }
}

impl BinRead for SellingPointList {
    type Args<'a> = (TagFormat,);

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, args: Self::Args<'_>) -> BinResult<Self> {
        let count = read_count(reader, CountWidth::I32)?;
        let mut points = Vec::with_capacity(capacity(count));
        for _ in 0..count {
            let commodity = read_tag(reader, args.0)?;
            let amount = reader.read_le::<i32>()?;
            points.push(SellingPoint { commodity, amount });
        }
        Ok(Self { points })
    }
}

impl BinWrite for SellingPointList {
    type Args<'a> = (TagFormat,);

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, args: Self::Args<'_>) -> BinResult<()> {
        write_count(writer, CountWidth::I32, self.points.len(), "selling point")?;
        for point in &self.points {
            write_tag(writer, args.0, point.commodity)?;
            writer.write_le(&point.amount)?;
        }
        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                              TGI references
//---------------------------------------------------------------------------//

/// Counted list of references. Count width and layout are fixed by the field that owns the list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TgiList {
    pub refs: Vec<TgiReference>,
}

impl TgiList {
    pub fn new(refs: Vec<TgiReference>) -> Self {
        Self { refs }
    }

    pub fn serialized_size(&self, width: CountWidth) -> usize {
        let count_size = match width {
            CountWidth::U8 => 1,
            CountWidth::U16 => 2,
            CountWidth::U32 | CountWidth::I32 => 4,
        };
        count_size + self.refs.len() * TgiReference::SIZE
    }
}

impl BinRead for TgiList {
    type Args<'a> = (CountWidth, TgiLayout);

    fn read_options<R: Read + Seek>(reader: &mut R, _options: Endian, args: Self::Args<'_>) -> BinResult<Self> {
        let (width, layout) = args;
        let count = read_count(reader, width)?;
        let mut refs = Vec::with_capacity(capacity(count));
        for _ in 0..count {
            refs.push(reader.read_le_args((layout,))?);
        }
        Ok(Self { refs })
    }
}

impl BinWrite for TgiList {
    type Args<'a> = (CountWidth, TgiLayout);

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _options: Endian, args: Self::Args<'_>) -> BinResult<()> {
        let (width, layout) = args;
        write_count(writer, width, self.refs.len(), "TGI")?;
        for tgi in &self.refs {
            writer.write_le_args(tgi, (layout,))?;
        }
        Ok(())
    }
}
