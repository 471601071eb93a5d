//! Errors raised while decoding or encoding catalog resources.

use std::io::ErrorKind;

use thiserror::Error;

/// Custom `Result` type, to always return our custom error.
pub type Result<T, E = CatalogError> = core::result::Result<T, E>;

/// Error type for every codec in the crate.
///
/// Decode errors abort the whole resource; no partially decoded value is ever
/// handed back. The encode-side variants only fire on broken in-memory
/// invariants (a list too long for its count field, a tag too wide for the
/// legacy format).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Unexpected end of data at offset {offset}.")]
    UnexpectedEndOfData { offset: u64 },

    #[error("Invalid header at offset {offset}: {reason}.")]
    InvalidMagicOrHeader { offset: u64, reason: String },

    #[error("Unknown value tag 0x{tag:02X} at offset {offset}.")]
    UnknownValueTag { offset: u64, tag: u8 },

    #[error("Unsupported {field} version {version} at offset {offset}.")]
    UnsupportedVersion { offset: u64, field: &'static str, version: u32 },

    #[error("Decoding stopped at byte {consumed} of {total}; the remaining bytes would be lost on write.")]
    TrailingData { consumed: u64, total: u64 },

    #[error("The {field} list holds {len} entries, but its count field only fits {max}.")]
    CountOverflow { field: &'static str, len: usize, max: u64 },

    #[error("Tag {tag} does not fit the legacy 16-bit tag format.")]
    TagOutOfRange { tag: u32 },

    #[error("{0}")]
    Other(String),
}

impl CatalogError {

    /// Running out of data always happens at the end of the buffer, so I/O level
    /// end-of-file errors (which carry no position) get the buffer length.
    pub(crate) fn at_end(self, len: usize) -> Self {
        match self {
            Self::UnexpectedEndOfData { offset: 0 } => Self::UnexpectedEndOfData { offset: len as u64 },
            other => other,
        }
    }

    /// Wraps this error so it can travel through a `binrw` reader or writer.
    pub(crate) fn into_binrw(self, pos: u64) -> binrw::Error {
        binrw::Error::Custom { pos, err: Box::new(self) }
    }
}

impl From<binrw::Error> for CatalogError {
    fn from(error: binrw::Error) -> Self {
        if let Some(inner) = error.custom_err::<CatalogError>() {
            return inner.clone();
        }

        match error {
            binrw::Error::Io(io) if io.kind() == ErrorKind::UnexpectedEof => Self::UnexpectedEndOfData { offset: 0 },
            binrw::Error::Io(io) => Self::Other(io.to_string()),
            binrw::Error::BadMagic { pos, found } => Self::InvalidMagicOrHeader { offset: pos, reason: format!("bad magic {found:?}") },
            binrw::Error::AssertFail { pos, message } => Self::InvalidMagicOrHeader { offset: pos, reason: message },
            binrw::Error::Backtrace(backtrace) => Self::from(*backtrace.error),
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::UnexpectedEof => Self::UnexpectedEndOfData { offset: 0 },
            _ => Self::Other(error.to_string()),
        }
    }
}
