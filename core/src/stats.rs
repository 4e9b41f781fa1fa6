use alloc::collections::BTreeSet;

/// Debug counters collected while packing pixels.
///
/// Nothing here influences the encoded bytes. Partial results from separate
/// rows can be combined with [`EncodingStats::merge`] in any order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncodingStats {
    total_pixels: usize,
    distinct: BTreeSet<u32>,
}

impl EncodingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visited pixel by its raw packed value.
    pub fn observe(&mut self, raw: u32) {
        self.total_pixels += 1;
        self.distinct.insert(raw);
    }

    pub fn merge(&mut self, other: EncodingStats) {
        self.total_pixels += other.total_pixels;
        self.distinct.extend(other.distinct);
    }

    pub fn total_pixels(&self) -> usize {
        self.total_pixels
    }

    pub fn distinct_count(&self) -> usize {
        self.distinct.len()
    }

    pub fn distinct_values(&self) -> impl Iterator<Item = u32> + '_ {
        self.distinct.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_order_does_not_matter() {
        let mut a = EncodingStats::new();
        a.observe(1);
        a.observe(2);
        let mut b = EncodingStats::new();
        b.observe(2);
        b.observe(3);
        b.observe(3);

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);

        assert_eq!(ab, ba);
        assert_eq!(ab.total_pixels(), 5);
        assert_eq!(ab.distinct_count(), 3);
        assert!(ab.distinct_values().eq([1, 2, 3]));
    }
}
