/// A single true-color pixel, every channel in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Packs the pixel as `a << 24 | r << 16 | g << 8 | b`.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    pub const fn from_u32(raw: u32) -> Self {
        let [a, r, g, b] = raw.to_be_bytes();
        Self { r, g, b, a }
    }
}

/// Decoded source image handed to the encoder.
///
/// Implementors are expected to have expanded palettes to true color already.
/// `has_alpha` tells the encoder whether the alpha channel carries meaning;
/// when it is `false` every pixel is treated as opaque regardless of `a`.
pub trait Image {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn has_alpha(&self) -> bool;
    /// Callers only ask for `x < width()` and `y < height()`.
    fn pixel_at(&self, x: u32, y: u32) -> Rgba;
}

impl<T: Image + ?Sized> Image for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn has_alpha(&self) -> bool {
        (**self).has_alpha()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba {
        (**self).pixel_at(x, y)
    }
}

/// Borrowed, tightly packed RGBA8 pixel data.
pub struct RgbaBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    has_alpha: bool,
}

impl<'a> RgbaBuffer<'a> {
    /// Returns `None` if `data` is not exactly `width * height * 4` bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32, has_alpha: bool) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            has_alpha,
        })
    }
}

impl Image for RgbaBuffer<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba {
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[index..index + 4];
        Rgba::new(px[0], px[1], px[2], px[3])
    }
}
