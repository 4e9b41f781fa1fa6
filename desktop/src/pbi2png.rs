use argh::FromArgs;
use embedded_graphics::{
    Drawable, Pixel,
    image::Image,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
};
use log::{error, info};
use pbigen_core::{PbiImage, fs::{Filesystem, Mode, read_to_end}};

use crate::std_fs::StdFilesystem;

mod std_fs;

#[derive(FromArgs)]
/// Render a PBI bitmap to a grayscale PNG preview
struct Args {
    /// input PBI file path
    #[argh(option, short = 'i')]
    input_path: String,

    /// output PNG file path
    #[argh(option, short = 'o')]
    output_path: String,
}

/// 8-bit gray canvas, set bits become white.
struct GrayCanvas {
    size: Size,
    pixels: Vec<u8>,
}

impl GrayCanvas {
    fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![0u8; size.width as usize * size.height as usize],
        }
    }
}

impl OriginDimensions for GrayCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for GrayCanvas {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            let (x, y) = (coord.x as u32, coord.y as u32);
            if x >= self.size.width || y >= self.size.height {
                continue;
            }
            let index = y as usize * self.size.width as usize + x as usize;
            self.pixels[index] = match color {
                BinaryColor::On => 0xFF,
                BinaryColor::Off => 0x00,
            };
        }
        Ok(())
    }
}

fn render(pbi: &PbiImage) -> GrayCanvas {
    let mut canvas = GrayCanvas::new(pbi.size());
    Image::new(pbi, Point::zero()).draw(&mut canvas).ok();
    canvas
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let fs = StdFilesystem::new_with_base_path(".".into());
    let mut file = fs
        .open_file(&args.input_path, Mode::Read)
        .expect("Failed to open input PBI file");
    let bytes = read_to_end(&mut file).expect("Failed to read input PBI file");
    let pbi = PbiImage::new(&bytes).expect("Input is not a valid PBI bitmap");

    let header = pbi.header();
    info!(
        "PBI {}x{} at ({}, {}), row size {} bytes",
        header.width.get(),
        header.height.get(),
        header.x.get(),
        header.y.get(),
        header.row_size()
    );

    let canvas = render(&pbi);
    if canvas.pixels.is_empty() {
        error!("Bitmap has no pixels, nothing to write");
        std::process::exit(1);
    }
    image::save_buffer(
        std::path::Path::new(&args.output_path),
        &canvas.pixels,
        canvas.size.width,
        canvas.size.height,
        image::ColorType::L8,
    )
    .expect("Failed to save image");
    info!("Wrote {}", args.output_path);
}
