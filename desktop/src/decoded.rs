use image::{DynamicImage, RgbaImage};
use pbigen_core::{Image, Rgba};

/// A source image expanded to RGBA8 for the encoder.
pub struct DecodedImage {
    pixels: RgbaImage,
    has_alpha: bool,
}

impl DecodedImage {
    pub fn open(path: &str) -> image::ImageResult<Self> {
        Ok(Self::from_dynamic(image::open(path)?))
    }

    /// Alpha is honoured only if the decoded color type carries it.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let has_alpha = image.color().has_alpha();
        Self {
            pixels: image.into_rgba8(),
            has_alpha,
        }
    }

    pub fn opaque(self) -> Self {
        Self {
            has_alpha: false,
            ..self
        }
    }
}

impl Image for DecodedImage {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba {
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Rgba::new(r, g, b, a)
    }
}
