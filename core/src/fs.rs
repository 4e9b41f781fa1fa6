use alloc::{vec, vec::Vec};

use embedded_io::{ErrorType, Read, ReadExactError, Write};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    /// Create the file, truncating it if it already exists.
    Write,
}

pub trait File: Read + Write {
    fn size(&self) -> usize;
}

/// Host storage the tools read bitmaps from and write them to.
pub trait Filesystem: ErrorType {
    type File: File;

    fn open_file(&self, path: &str, mode: Mode) -> core::result::Result<Self::File, Self::Error>;
    fn exists(&self, path: &str) -> core::result::Result<bool, Self::Error>;
}

/// Reads the remainder of a file opened at its start.
pub fn read_to_end(file: &mut impl File) -> Result<Vec<u8>> {
    let mut data = vec![0u8; file.size()];
    file.read_exact(&mut data).map_err(|err| match err {
        ReadExactError::UnexpectedEof => Error::InvalidFormat,
        ReadExactError::Other(e) => Error::from_io_error(e),
    })?;
    Ok(data)
}
