use slice_search::{BinarySearch, Search};

use crate::index::SparseKeyIndex;

/// The sorted key sequence of a segment, addressed by key index.
pub trait KeySource {
    fn key_count(&self) -> usize;

    /// The key at `index`, which is below `key_count()`.
    fn key_at(&self, index: usize) -> &[u8];
}

/// An owned, sorted run of keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedKeys {
    keys: Vec<Vec<u8>>,
}

impl SortedKeys {
    /// Sorts and deduplicates `keys`.
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
    {
        let mut keys: Vec<Vec<u8>> = keys.into_iter().map(Into::into).collect();
        keys.sort_unstable();
        keys.dedup();

        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.keys.iter().map(Vec::as_slice)
    }
}

impl KeySource for SortedKeys {
    fn key_count(&self) -> usize {
        self.keys.len()
    }

    fn key_at(&self, index: usize) -> &[u8] {
        &self.keys[index]
    }
}

/// Finds the key index of `key` in `source`, searching only the bracket the
/// index reports.
///
/// `index` must have been built over `source`.
pub fn locate<S: KeySource + ?Sized>(
    index: &SparseKeyIndex,
    source: &S,
    key: &[u8],
) -> Option<usize> {
    let bracket = index.lookup(key);

    if bracket.is_absent() {
        return None;
    }

    if bracket.is_direct_hit() {
        return Some(bracket.left());
    }

    BinarySearch::search_range_by(bracket.bounds(source.key_count()), |i| {
        source.key_at(i).cmp(key)
    })
    .ok()
}
