use strum::IntoEnumIterator;

use crate::{
    error::{Error, Result},
    image::Rgba,
};

/// Alpha and luminance cut-off. Values strictly below it count as
/// transparent or black respectively.
pub const THRESHOLD: u16 = 127;

/// Semantic class of a source pixel before it is mapped to a bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumIter)]
pub enum Class {
    White,
    Black,
    Transparent,
}

pub fn classify(pixel: Rgba, has_alpha: bool) -> Class {
    if has_alpha && u16::from(pixel.a) < THRESHOLD {
        return Class::Transparent;
    }
    let luma = (u16::from(pixel.r) + u16::from(pixel.g) + u16::from(pixel.b)) / 3;
    if luma < THRESHOLD {
        Class::Black
    } else {
        Class::White
    }
}

/// Named color map selection, parsed from `"white"` or `"black"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum MapKind {
    /// White pixels are set bits. Transparent pixels are set as well.
    White,
    /// Black pixels are set bits. Transparent pixels are cleared.
    Black,
}

/// Class to bit lookup used for every pixel of one encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap {
    white: bool,
    black: bool,
    transparent: bool,
}

impl ColorMap {
    pub const WHITE: ColorMap = ColorMap::new(true, false, true);
    pub const BLACK: ColorMap = ColorMap::new(false, true, false);

    pub const fn new(white: bool, black: bool, transparent: bool) -> Self {
        Self {
            white,
            black,
            transparent,
        }
    }

    /// Builds a map from explicit `(class, bit)` pairs.
    ///
    /// Every class must appear exactly once with a bit of `0` or `1`.
    pub fn from_entries(entries: &[(Class, u8)]) -> Result<Self> {
        let mut bits = [false; 3];
        for (slot, class) in Class::iter().enumerate() {
            let mut matching = entries.iter().filter(|(c, _)| *c == class);
            let bit = match matching.next() {
                Some((_, bit)) => *bit,
                None => return Err(Error::IncompleteColorMap(class)),
            };
            if bit > 1 || matching.next().is_some() {
                return Err(Error::InvalidColorMap(class));
            }
            bits[slot] = bit == 1;
        }
        let [white, black, transparent] = bits;
        Ok(Self::new(white, black, transparent))
    }

    pub const fn bit(&self, class: Class) -> u8 {
        let set = match class {
            Class::White => self.white,
            Class::Black => self.black,
            Class::Transparent => self.transparent,
        };
        set as u8
    }

    pub fn value_for(&self, pixel: Rgba, has_alpha: bool) -> u8 {
        self.bit(classify(pixel, has_alpha))
    }
}

impl From<MapKind> for ColorMap {
    fn from(kind: MapKind) -> Self {
        match kind {
            MapKind::White => ColorMap::WHITE,
            MapKind::Black => ColorMap::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;

    #[test]
    fn alpha_wins_over_color() {
        for (r, g, b) in [(255, 255, 255), (0, 0, 0), (127, 200, 3)] {
            for a in [0, 1, 126] {
                let px = Rgba::new(r, g, b, a);
                assert_eq!(classify(px, true), Class::Transparent);
                assert_eq!(ColorMap::WHITE.value_for(px, true), 1);
                assert_eq!(ColorMap::BLACK.value_for(px, true), 0);
            }
        }
    }

    #[test]
    fn alpha_ignored_without_flag() {
        assert_eq!(classify(Rgba::new(255, 255, 255, 0), false), Class::White);
        assert_eq!(classify(Rgba::new(0, 0, 0, 0), false), Class::Black);
    }

    #[test]
    fn alpha_threshold_is_exclusive() {
        assert_eq!(classify(Rgba::new(0, 0, 0, 127), true), Class::Black);
        assert_eq!(classify(Rgba::new(0, 0, 0, 126), true), Class::Transparent);
    }

    #[test]
    fn luminance_uses_floor_average() {
        // 127 + 127 + 126 = 380, 380 / 3 = 126
        assert_eq!(classify(Rgba::opaque(127, 127, 126), false), Class::Black);
        // 381 / 3 = 127
        assert_eq!(classify(Rgba::opaque(127, 127, 127), false), Class::White);
        // 255 + 126 + 0 = 381
        assert_eq!(classify(Rgba::opaque(255, 126, 0), false), Class::White);
        assert_eq!(classify(Rgba::opaque(255, 125, 0), false), Class::Black);
    }

    #[test]
    fn canonical_maps() {
        assert_eq!(ColorMap::WHITE.bit(Class::White), 1);
        assert_eq!(ColorMap::WHITE.bit(Class::Black), 0);
        assert_eq!(ColorMap::WHITE.bit(Class::Transparent), 1);
        assert_eq!(ColorMap::BLACK.bit(Class::White), 0);
        assert_eq!(ColorMap::BLACK.bit(Class::Black), 1);
        assert_eq!(ColorMap::BLACK.bit(Class::Transparent), 0);
    }

    #[test]
    fn from_entries_requires_every_class() {
        let map = ColorMap::from_entries(&[
            (Class::Transparent, 1),
            (Class::White, 1),
            (Class::Black, 0),
        ]);
        assert_eq!(map, Ok(ColorMap::WHITE));

        let missing = ColorMap::from_entries(&[(Class::White, 0), (Class::Black, 1)]);
        assert_eq!(missing, Err(Error::IncompleteColorMap(Class::Transparent)));

        assert_eq!(
            ColorMap::from_entries(&[]),
            Err(Error::IncompleteColorMap(Class::White))
        );
    }

    #[test]
    fn from_entries_rejects_bad_bits() {
        let bad = ColorMap::from_entries(&[
            (Class::White, 2),
            (Class::Black, 0),
            (Class::Transparent, 0),
        ]);
        assert_eq!(bad, Err(Error::InvalidColorMap(Class::White)));

        let duplicate = ColorMap::from_entries(&[
            (Class::White, 1),
            (Class::Black, 0),
            (Class::Black, 1),
            (Class::Transparent, 0),
        ]);
        assert_eq!(duplicate, Err(Error::InvalidColorMap(Class::Black)));
    }

    #[test]
    fn map_kind_names() {
        assert_eq!(MapKind::from_str("white"), Ok(MapKind::White));
        assert_eq!(MapKind::from_str("black"), Ok(MapKind::Black));
        assert!(MapKind::from_str("grey").is_err());
        assert_eq!(ColorMap::from(MapKind::Black), ColorMap::BLACK);
        let name: &'static str = MapKind::White.into();
        assert_eq!(name, "white");
    }
}
