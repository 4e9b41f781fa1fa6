/*!
Encoder for PBI bitmaps, the 1-bit image format read by the Pebble
`gbitmap_create_with_data` API.

A PBI is a 12 byte little-endian header followed by `height` rows of
`row_size_bytes` each. Every row is a run of 32-bit little-endian words and
bit `i` of word `k` holds column `32 * k + i`.

## Usage
```
# use pbigen_core::{ColorMap, Encoder, RgbaBuffer};
# fn main() -> Result<(), pbigen_core::Error> {
let pixels = [255u8, 255, 255, 255];
let image = RgbaBuffer::new(&pixels, 1, 1, true).unwrap();
let encoded = Encoder::new(&image, ColorMap::WHITE)?.encode(&image)?;
assert_eq!(
    encoded.as_bytes(),
    &[4, 0, 0, 0x10, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0]
);
# Ok(())
# }
```
*/

#![no_std]

pub mod color;
pub mod container;
pub mod encoder;
pub mod error;
pub mod fs;
pub mod image;
pub mod pack;
pub mod stats;


extern crate alloc;

pub use color::{Class, ColorMap, MapKind, classify};
pub use container::pbi::{Header, PbiImage};
pub use encoder::{EncodedBitmap, Encoder, Region};
pub use error::{Error, Field};
pub use image::{Image, Rgba, RgbaBuffer};
pub use stats::EncodingStats;
