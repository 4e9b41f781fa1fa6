use crate::color::Class;

/// Header or region field that failed a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
    Width,
    Height,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    IoError(embedded_io::ErrorKind),
    /// A region value is negative, does not fit the header's `i16`, or
    /// reaches past the source image.
    OutOfRange(Field),
    /// A color map was built without an entry for this class.
    IncompleteColorMap(Class),
    /// A color map entry is duplicated or maps to something other than 0/1.
    InvalidColorMap(Class),
    InvalidFormat,
    UnsupportedVersion(u8),
}

impl Error {
    pub fn from_io_error(error: impl embedded_io::Error) -> Self {
        Error::IoError(error.kind())
    }
}

impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Error::IoError(kind) => *kind,
            Error::OutOfRange(_) | Error::IncompleteColorMap(_) | Error::InvalidColorMap(_) => {
                embedded_io::ErrorKind::InvalidInput
            }
            Error::InvalidFormat => embedded_io::ErrorKind::InvalidData,
            Error::UnsupportedVersion(_) => embedded_io::ErrorKind::Unsupported,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
