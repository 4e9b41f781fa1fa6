use crate::{color::ColorMap, image::Image, stats::EncodingStats};

pub const WORD_BITS: u32 = 32;
pub const WORD_BYTES: usize = 4;

/// Packs columns `x_from..x_to` of `row` into one word.
///
/// Column `x_from + i` lands in bit `i`. Bits past the span stay zero, so a
/// short span at the end of a row is padded. An empty span yields `0` and
/// records nothing.
pub fn pack_bits(
    image: &impl Image,
    map: &ColorMap,
    row: u32,
    x_from: u32,
    x_to: u32,
    stats: &mut EncodingStats,
) -> u32 {
    debug_assert!(x_to <= image.width());
    debug_assert!(x_to.saturating_sub(x_from) <= WORD_BITS);

    let has_alpha = image.has_alpha();
    let mut word = 0u32;
    for column in x_from..x_to {
        let pixel = image.pixel_at(column, row);
        stats.observe(pixel.to_u32());
        word |= u32::from(map.value_for(pixel, has_alpha)) << (column - x_from);
    }
    word
}

/// [`pack_bits`] serialized as the little-endian word stored in a row.
pub fn pack_word(
    image: &impl Image,
    map: &ColorMap,
    row: u32,
    x_from: u32,
    x_to: u32,
    stats: &mut EncodingStats,
) -> [u8; WORD_BYTES] {
    pack_bits(image, map, row, x_from, x_to, stats).to_le_bytes()
}
