use embedded_graphics::{
    Pixel,
    image::ImageDrawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, PointsIter, Size},
    primitives::Rectangle,
};
use log::debug;
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout,
    little_endian::{I16, U16},
};

use crate::{
    error::{Error, Result},
    pack::{WORD_BITS, WORD_BYTES},
};

pub const VERSION: u8 = 1;
const VERSION_SHIFT: u16 = 12;
const RESERVED_MASK: u16 = (1 << VERSION_SHIFT) - 1;

pub const HEADER_SIZE: usize = core::mem::size_of::<Header>();
const _: () = assert!(HEADER_SIZE == 12);

/// Little-endian PBI header, stored verbatim in front of the body.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct Header {
    pub row_size_bytes: U16,
    pub info_flags: U16,
    pub x: I16,
    pub y: I16,
    pub width: I16,
    pub height: I16,
}

/// Bytes per row: `width` rounded up to whole 32-bit words.
pub const fn row_size_bytes(width: u16) -> u16 {
    width.div_ceil(WORD_BITS as u16) * WORD_BYTES as u16
}

pub const fn info_flags(version: u8) -> u16 {
    (version as u16) << VERSION_SHIFT
}

impl Header {
    /// `width` and `height` must not be negative.
    pub fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        debug_assert!(width >= 0 && height >= 0);
        Self {
            row_size_bytes: U16::new(row_size_bytes(width as u16)),
            info_flags: U16::new(info_flags(VERSION)),
            x: I16::new(x),
            y: I16::new(y),
            width: I16::new(width),
            height: I16::new(height),
        }
    }

    /// Reads and validates a header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (header, _) = Header::read_from_prefix(bytes).map_err(|_| Error::InvalidFormat)?;
        let flags = header.info_flags.get();
        if header.version() != VERSION {
            return Err(Error::UnsupportedVersion(header.version()));
        }
        if flags & RESERVED_MASK != 0 {
            return Err(Error::InvalidFormat);
        }
        let (width, height) = (header.width.get(), header.height.get());
        if width < 0 || height < 0 {
            return Err(Error::InvalidFormat);
        }
        if header.row_size_bytes.get() != row_size_bytes(width as u16) {
            return Err(Error::InvalidFormat);
        }
        debug!(
            "Parsed PBI header: {}x{} at ({}, {}), row size {}",
            width,
            height,
            header.x.get(),
            header.y.get(),
            header.row_size_bytes.get()
        );
        Ok(header)
    }

    pub fn version(&self) -> u8 {
        (self.info_flags.get() >> VERSION_SHIFT) as u8
    }

    pub fn row_size(&self) -> usize {
        self.row_size_bytes.get() as usize
    }

    pub fn body_len(&self) -> usize {
        self.row_size() * self.height.get().max(0) as usize
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.body_len()
    }

    pub fn write_to(&self, sink: &mut impl embedded_io::Write) -> Result<()> {
        sink.write_all(self.as_bytes()).map_err(Error::from_io_error)
    }
}

/// Read-only view over an encoded PBI.
#[derive(Debug, Clone, Copy)]
pub struct PbiImage<'a> {
    header: Header,
    body: &'a [u8],
}

impl<'a> PbiImage<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let header = Header::parse(bytes)?;
        let body = &bytes[HEADER_SIZE..];
        if body.len() != header.body_len() {
            return Err(Error::InvalidFormat);
        }
        Ok(Self { header, body })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// Stored bit for column `x` of row `y`, counted from the bitmap origin.
    pub fn bit(&self, x: u32, y: u32) -> Option<bool> {
        let Size { width, height } = self.size();
        if x >= width || y >= height {
            return None;
        }
        let offset = y as usize * self.header.row_size() + (x / WORD_BITS) as usize * WORD_BYTES;
        let word = u32::from_le_bytes(self.body[offset..offset + WORD_BYTES].try_into().ok()?);
        Some((word >> (x % WORD_BITS)) & 1 == 1)
    }
}

impl OriginDimensions for PbiImage<'_> {
    fn size(&self) -> Size {
        Size::new(
            self.header.width.get().max(0) as u32,
            self.header.height.get().max(0) as u32,
        )
    }
}

impl ImageDrawable for PbiImage<'_> {
    type Color = BinaryColor;

    fn draw<D>(&self, target: &mut D) -> core::result::Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        self.draw_sub_image(target, &Rectangle::new(Point::zero(), self.size()))
    }

    fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> core::result::Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let visible = area.intersection(&Rectangle::new(Point::zero(), self.size()));
        let origin = area.top_left;
        target.draw_iter(visible.points().map(|point| {
            let on = self.bit(point.x as u32, point.y as u32).unwrap_or(false);
            Pixel(point - origin, BinaryColor::from(on))
        }))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use embedded_graphics::{Drawable, image::Image, mock_display::MockDisplay};

    use super::*;

    fn bytes_of(header: &Header, body: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::from(header.as_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn row_size_rounds_to_words() {
        for (width, expected) in [(0, 0), (1, 4), (31, 4), (32, 4), (33, 8), (64, 8), (65, 12), (144, 20)] {
            assert_eq!(row_size_bytes(width), expected, "width {width}");
            assert_eq!(row_size_bytes(width) % 4, 0);
        }
        assert_eq!(row_size_bytes(i16::MAX as u16), 4096);
    }

    #[test]
    fn header_layout() {
        let header = Header::new(0, 0, 1, 1);
        assert_eq!(header.as_bytes(), &[0x04, 0x00, 0x00, 0x10, 0, 0, 0, 0, 0x01, 0x00, 0x01, 0x00]);
        assert_eq!(header.info_flags.get(), 0x1000);
        assert_eq!(header.encoded_len(), 16);
    }

    #[test]
    fn header_round_trip() {
        let header = Header::new(-3, 7, 144, 168);
        let mut bytes = [0u8; HEADER_SIZE];
        let mut sink = &mut bytes[..];
        header.write_to(&mut sink).unwrap();
        let parsed = Header::parse(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.row_size_bytes.get(), 20);
        assert_eq!(parsed.info_flags.get(), 0x1000);
        assert_eq!((parsed.x.get(), parsed.y.get()), (-3, 7));
        assert_eq!((parsed.width.get(), parsed.height.get()), (144, 168));
        assert_eq!(parsed.body_len(), 20 * 168);
    }

    #[test]
    fn parse_rejects_bad_headers() {
        let good = Header::new(0, 0, 40, 2);
        assert_eq!(Header::parse(&good.as_bytes()[..11]), Err(Error::InvalidFormat));

        let mut other_version = good;
        other_version.info_flags = U16::new(info_flags(2));
        assert_eq!(Header::parse(other_version.as_bytes()), Err(Error::UnsupportedVersion(2)));

        let mut reserved = good;
        reserved.info_flags = U16::new(info_flags(VERSION) | 1);
        assert_eq!(Header::parse(reserved.as_bytes()), Err(Error::InvalidFormat));

        let mut stride = good;
        stride.row_size_bytes = U16::new(6);
        assert_eq!(Header::parse(stride.as_bytes()), Err(Error::InvalidFormat));

        let mut negative = good;
        negative.height = I16::new(-1);
        assert_eq!(Header::parse(negative.as_bytes()), Err(Error::InvalidFormat));
    }

    #[test]
    fn image_requires_exact_body() {
        let header = Header::new(0, 0, 2, 2);
        assert!(PbiImage::new(&bytes_of(&header, &[0; 8])).is_ok());
        assert_eq!(PbiImage::new(&bytes_of(&header, &[0; 7])).err(), Some(Error::InvalidFormat));
        assert_eq!(PbiImage::new(&bytes_of(&header, &[0; 12])).err(), Some(Error::InvalidFormat));
    }

    #[test]
    fn bit_lookup_crosses_words() {
        let header = Header::new(0, 0, 40, 2);
        #[rustfmt::skip]
        let body = [
            0x01, 0x00, 0x00, 0x80,   0x81, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,   0x00, 0x00, 0x00, 0x00,
        ];
        let bytes = bytes_of(&header, &body);
        let image = PbiImage::new(&bytes).unwrap();
        assert_eq!(image.bit(0, 0), Some(true));
        assert_eq!(image.bit(1, 0), Some(false));
        assert_eq!(image.bit(31, 0), Some(true));
        assert_eq!(image.bit(32, 0), Some(true));
        assert_eq!(image.bit(39, 0), Some(true));
        assert_eq!(image.bit(38, 0), Some(false));
        assert_eq!(image.bit(0, 1), Some(false));
        assert_eq!(image.bit(40, 0), None);
        assert_eq!(image.bit(0, 2), None);
    }

    #[test]
    fn draws_onto_target() {
        let header = Header::new(0, 0, 3, 2);
        let body = [0b101, 0, 0, 0, 0b010, 0, 0, 0];
        let bytes = bytes_of(&header, &body);
        let pbi = PbiImage::new(&bytes).unwrap();

        let mut display = MockDisplay::<BinaryColor>::new();
        Image::new(&pbi, Point::zero()).draw(&mut display).unwrap();
        display.assert_pattern(&["#.#", ".#."]);
    }

    #[test]
    fn draws_sub_image() {
        let header = Header::new(0, 0, 3, 2);
        let body = [0b101, 0, 0, 0, 0b010, 0, 0, 0];
        let bytes = bytes_of(&header, &body);
        let pbi = PbiImage::new(&bytes).unwrap();

        let mut display = MockDisplay::<BinaryColor>::new();
        pbi.draw_sub_image(&mut display, &Rectangle::new(Point::new(1, 0), Size::new(5, 1)))
            .unwrap();
        display.assert_pattern(&[".#"]);
    }
}
