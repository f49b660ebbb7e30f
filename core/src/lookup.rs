use std::ops::Range;

/// Where a query key must reside in the source segment, if it is present.
///
/// All positions are source-segment key indices, never byte offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// The key equals the sampled key at this source index.
    DirectHit(usize),

    /// The key lies in `[left, right)`.
    Range { left: usize, right: usize },

    /// The key sorts before every sampled key, and so before every source key.
    BeforeFirst,

    /// The key lies in `[left, end of segment)`.
    ///
    /// An index holding no samples answers `Unbounded(0)` for every query.
    Unbounded(usize),
}

impl Lookup {
    pub fn is_direct_hit(&self) -> bool {
        matches!(self, Lookup::DirectHit(_))
    }

    /// Whether the key is known to be absent from the segment.
    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::BeforeFirst)
    }

    /// First source index that could hold the key.
    pub fn left(&self) -> usize {
        match *self {
            Lookup::DirectHit(index) => index,
            Lookup::Range { left, .. } => left,
            Lookup::BeforeFirst => 0,
            Lookup::Unbounded(left) => left,
        }
    }

    /// Resolves the bracket into a half-open range over a segment of
    /// `source_key_count` keys.
    pub fn bounds(&self, source_key_count: usize) -> Range<usize> {
        match *self {
            Lookup::DirectHit(index) => index..index + 1,
            Lookup::Range { left, right } => left..right,
            Lookup::BeforeFirst => 0..0,
            Lookup::Unbounded(left) => left..source_key_count.max(left),
        }
    }
}
