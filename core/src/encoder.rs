use alloc::{vec, vec::Vec};
use core::ops::Range;

use log::{debug, trace};
use zerocopy::IntoBytes;

use crate::{
    color::ColorMap,
    container::pbi::{HEADER_SIZE, Header},
    error::{Error, Field, Result},
    fs::{Filesystem, Mode},
    image::Image,
    pack::{WORD_BITS, WORD_BYTES, pack_word},
    stats::EncodingStats,
};

/// Area of the source image that ends up in the bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

/// Header and body of one encode, plus what was seen on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBitmap {
    header: Header,
    bytes: Vec<u8>,
    stats: EncodingStats,
}

impl EncodedBitmap {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn body(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    pub fn stats(&self) -> &EncodingStats {
        &self.stats
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

pub struct Encoder {
    region: Region,
    map: ColorMap,
}

impl Encoder {
    /// Encodes the whole of `image`.
    pub fn new(image: &impl Image, map: ColorMap) -> Result<Self> {
        Self::with_region(map, 0, 0, image.width(), image.height())
    }

    /// Rows `y..y + height` are encoded. Columns start at `x` and are clipped
    /// to `width`, counted from the left edge of the image.
    pub fn with_region(map: ColorMap, x: i32, y: i32, width: u32, height: u32) -> Result<Self> {
        let coordinate = |value: i32, field| {
            i16::try_from(value)
                .ok()
                .filter(|v| *v >= 0)
                .ok_or(Error::OutOfRange(field))
        };
        let extent = |value: u32, field| i16::try_from(value).map_err(|_| Error::OutOfRange(field));

        let region = Region {
            x: coordinate(x, Field::X)?,
            y: coordinate(y, Field::Y)?,
            width: extent(width, Field::Width)?,
            height: extent(height, Field::Height)?,
        };
        Ok(Self { region, map })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn header(&self) -> Header {
        let Region { x, y, width, height } = self.region;
        Header::new(x, y, width, height)
    }

    pub fn encode(&self, image: &impl Image) -> Result<EncodedBitmap> {
        self.check_bounds(image)?;
        let header = self.header();

        let mut bytes = Vec::with_capacity(header.encoded_len());
        bytes.extend_from_slice(header.as_bytes());
        bytes.resize(header.encoded_len(), 0);

        let mut stats = EncodingStats::new();
        if header.row_size() > 0 {
            let rows = bytes[HEADER_SIZE..].chunks_exact_mut(header.row_size());
            for (row, out) in self.rows().zip(rows) {
                stats.merge(self.encode_row(image, row, out));
            }
        }

        Ok(EncodedBitmap {
            header,
            bytes,
            stats,
        })
    }

    /// Streams header and rows into `sink` and returns the number of bytes
    /// written.
    pub fn encode_to<W: embedded_io::Write>(
        &self,
        image: &impl Image,
        sink: &mut W,
    ) -> Result<(usize, EncodingStats)> {
        self.check_bounds(image)?;
        let header = self.header();
        header.write_to(sink)?;

        let mut stats = EncodingStats::new();
        let mut row_buffer = vec![0u8; header.row_size()];
        if !row_buffer.is_empty() {
            for row in self.rows() {
                stats.merge(self.encode_row(image, row, &mut row_buffer));
                sink.write_all(&row_buffer).map_err(Error::from_io_error)?;
            }
        }
        sink.flush().map_err(Error::from_io_error)?;

        Ok((header.encoded_len(), stats))
    }

    /// Creates (or truncates) `path` on `fs` and encodes into it.
    pub fn save<Fs: Filesystem>(
        &self,
        fs: &Fs,
        path: &str,
        image: &impl Image,
    ) -> Result<(usize, EncodingStats)> {
        let mut file = fs
            .open_file(path, Mode::Write)
            .map_err(Error::from_io_error)?;
        self.encode_to(image, &mut file)
    }

    fn check_bounds(&self, image: &impl Image) -> Result<()> {
        let Region { y, width, height, .. } = self.region;
        if width as u32 > image.width() {
            return Err(Error::OutOfRange(Field::Width));
        }
        if y as u32 + height as u32 > image.height() {
            return Err(Error::OutOfRange(Field::Height));
        }
        debug!(
            "Encoding {}x{} at ({}, {}) from {}x{} source, alpha: {}",
            width,
            height,
            self.region.x,
            y,
            image.width(),
            image.height(),
            image.has_alpha()
        );
        Ok(())
    }

    fn rows(&self) -> Range<u32> {
        let y = self.region.y as u32;
        y..y + self.region.height as u32
    }

    /// Fills `out` (one row stride) with the packed words of `row`.
    fn encode_row(&self, image: &impl Image, row: u32, out: &mut [u8]) -> EncodingStats {
        let x = self.region.x as u32;
        let width = self.region.width as u32;
        let mut stats = EncodingStats::new();
        for (k, word) in (0u32..).zip(out.chunks_exact_mut(WORD_BYTES)) {
            let x_from = x + k * WORD_BITS;
            let x_to = (x + (k + 1) * WORD_BITS).min(width);
            word.copy_from_slice(&pack_word(image, &self.map, row, x_from, x_to, &mut stats));
        }
        trace!("Row {}: {} pixels", row, stats.total_pixels());
        stats
    }
}
