pub mod common;
pub mod lists;
pub mod object_definition;
pub mod objects;
pub mod shapes;
pub mod structures;
pub mod trims;
pub mod value;

use std::any::type_name;
use std::io::Cursor;

use binrw::{BinRead, BinResult, BinWrite, Endian};
use log::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::tgi::ResourceKey;

pub trait Resource: std::fmt::Debug {

    /// Decodes a resource. An empty buffer yields a freshly created resource with default values.
    fn from_bytes(key: &ResourceKey, data: &[u8]) -> Result<Self> where Self: Sized;

    fn to_bytes(&self) -> Result<Vec<u8>>;
}

/// A fixed-layout catalog resource.
///
/// Implementors only declare their type ID; decoding and encoding come from their binrw layout.
pub trait CatalogResource: Default + std::fmt::Debug {
    const RESOURCE_TYPE: u32;
}

impl<T> Resource for T
where
    T: CatalogResource + for<'a> BinRead<Args<'a> = ()> + for<'a> BinWrite<Args<'a> = ()>,
{
    fn from_bytes(key: &ResourceKey, data: &[u8]) -> Result<Self> {
        if key.res_type != T::RESOURCE_TYPE {
            warn!("Decoding {} as {}, whose type is 0x{:08X}", key, type_name::<T>(), T::RESOURCE_TYPE);
        }

        if data.is_empty() {
            debug!("Creating empty {} for {}", type_name::<T>(), key);
            return Ok(T::default());
        }

        debug!("Decoding {} as {} ({} bytes)", key, type_name::<T>(), data.len());
        decode_exact(data, |cursor| T::read_options(cursor, Endian::Little, ()))
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let mut cursor = Cursor::new(&mut data);
        self.write_options(&mut cursor, Endian::Little, ())?;
        Ok(data)
    }
}

/// Runs `read` over the whole buffer. Bytes left over after it returns are an error, since they would not
/// survive a round trip.
pub(crate) fn decode_exact<T, F>(data: &[u8], read: F) -> Result<T>
where
    F: FnOnce(&mut Cursor<&[u8]>) -> BinResult<T>,
{
    let mut cursor = Cursor::new(data);
    let value = read(&mut cursor).map_err(|e| CatalogError::from(e).at_end(data.len()))?;

    let consumed = cursor.position();
    if consumed != data.len() as u64 {
        return Err(CatalogError::TrailingData { consumed, total: data.len() as u64 });
    }

    Ok(value)
}
