use std::fmt;
use std::io::{Cursor, Read, Seek, Write};

use binrw::{BinRead, BinReaderExt, BinResult, BinWrite, BinWriterExt, Endian};

use crate::error::{CatalogError, Result};

/// Identity of a resource inside its package. Supplied by the caller, never read from payload bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub res_type: u32,
    pub res_group: u32,
    pub instance: u64,
}

impl ResourceKey {
    pub const fn new(res_type: u32, res_group: u32, instance: u64) -> Self {
        Self { res_type, res_group, instance }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}:{:08X}:{:016X}", self.res_type, self.res_group, self.instance)
    }
}

/// Physical order of the three TGI components on the wire.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TgiLayout {

    /// Type, group, instance.
    Tgi,

    /// Instance, type, group. The usual order inside catalog resources.
    #[default]
    Itg,

    /// Instance with its high and low 32-bit halves exchanged, then type, group.
    SwappedItg,
}

/// Reference to another resource. The all-zero value is the `EMPTY` sentinel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TgiReference {
    pub res_type: u32,
    pub res_group: u32,
    pub instance: u64,
}

impl TgiReference {
    pub const EMPTY: Self = Self { res_type: 0, res_group: 0, instance: 0 };

    /// Encoded size, identical for every layout.
    pub const SIZE: usize = 16;

    pub const fn new(res_type: u32, res_group: u32, instance: u64) -> Self {
        Self { res_type, res_group, instance }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Decodes one reference at `offset`, returning it with the number of bytes consumed.
    pub fn decode(data: &[u8], offset: usize, layout: TgiLayout) -> Result<(Self, usize)> {
        let mut cursor = Cursor::new(data);
        cursor.set_position(offset as u64);
        let tgi = cursor.read_le_args::<Self>((layout,)).map_err(|e| CatalogError::from(e).at_end(data.len()))?;
        Ok((tgi, Self::SIZE))
    }

    /// Appends this reference to `out`, returning the number of bytes written.
    pub fn encode(&self, out: &mut Vec<u8>, layout: TgiLayout) -> Result<usize> {
        let mut cursor = Cursor::new(out);
        cursor.seek(std::io::SeekFrom::End(0))?;
        cursor.write_le_args(self, (layout,))?;
        Ok(Self::SIZE)
    }
}

impl From<ResourceKey> for TgiReference {
    fn from(key: ResourceKey) -> Self {
        Self::new(key.res_type, key.res_group, key.instance)
    }
}

impl From<TgiReference> for ResourceKey {
    fn from(tgi: TgiReference) -> Self {
        Self::new(tgi.res_type, tgi.res_group, tgi.instance)
    }
}

impl fmt::Display for TgiReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}:{:08X}:{:016X}", self.res_type, self.res_group, self.instance)
    }
}

fn swap_halves(instance: u64) -> u64 {
    (instance << 32) | (instance >> 32)
}

impl BinRead for TgiReference {
    type Args<'a> = (TgiLayout,);

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _options: Endian,
        args: Self::Args<'_>,
    ) -> BinResult<Self> {
        match args.0 {
            TgiLayout::Tgi => {
                let res_type = reader.read_le::<u32>()?;
                let res_group = reader.read_le::<u32>()?;
                let instance = reader.read_le::<u64>()?;
                Ok(Self { res_type, res_group, instance })
            }
            TgiLayout::Itg | TgiLayout::SwappedItg => {
                let mut instance = reader.read_le::<u64>()?;
                if args.0 == TgiLayout::SwappedItg {
                    instance = swap_halves(instance);
                }
                let res_type = reader.read_le::<u32>()?;
                let res_group = reader.read_le::<u32>()?;
                Ok(Self { res_type, res_group, instance })
            }
        }
    }
}

impl BinWrite for TgiReference {
    type Args<'a> = (TgiLayout,);

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _options: Endian,
        args: Self::Args<'_>,
    ) -> BinResult<()> {
        match args.0 {
            TgiLayout::Tgi => {
                writer.write_le(&self.res_type)?;
                writer.write_le(&self.res_group)?;
                writer.write_le(&self.instance)?;
            }
            TgiLayout::Itg => {
                writer.write_le(&self.instance)?;
                writer.write_le(&self.res_type)?;
                writer.write_le(&self.res_group)?;
            }
            TgiLayout::SwappedItg => {
                writer.write_le(&swap_halves(self.instance))?;
                writer.write_le(&self.res_type)?;
                writer.write_le(&self.res_group)?;
            }
        }
        Ok(())
    }
}

/// Reads a fixed number of references laid out back to back.
pub(crate) fn read_tgi_array<R: Read + Seek, const N: usize>(reader: &mut R, layout: TgiLayout) -> BinResult<[TgiReference; N]> {
    let mut refs = [TgiReference::EMPTY; N];
    for tgi in refs.iter_mut() {
        *tgi = reader.read_le_args((layout,))?;
    }
    Ok(refs)
}

pub(crate) fn write_tgi_array<W: Write + Seek>(writer: &mut W, refs: &[TgiReference], layout: TgiLayout) -> BinResult<()> {
    for tgi in refs {
        writer.write_le_args(tgi, (layout,))?;
    }
    Ok(())
}
