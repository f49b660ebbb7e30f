use slice_search::{lower_bound, OptimalSearch, Search};
use tracing::{debug, trace};

use crate::arena::KeyArena;
use crate::config::IndexConfig;
use crate::error::Result;
use crate::lookup::Lookup;

/// A sparse, fixed-budget index over the sorted keys of an immutable segment.
///
/// Every `hop + 1`-th source key is copied into a pre-sized [`KeyArena`] during a
/// single forward pass. A lookup binary searches those samples and answers with
/// the narrowest bracket of source key indices that can contain the query key,
/// which the segment reader then searches on its own.
///
/// The index is built by one thread calling [`add`](Self::add) in ascending key
/// order; after that it is read-only and can be shared between readers.
#[derive(Clone, Debug)]
pub struct SparseKeyIndex {
    config: IndexConfig,
    max_samples: usize,
    hop: usize,
    arena: KeyArena,
    closed: bool,
}

impl SparseKeyIndex {
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;

        let max_samples = config.max_samples();
        let hop = config.hop();

        debug!(
            capacity_bytes = config.capacity_bytes,
            source_key_count = config.source_key_count,
            average_key_size = config.average_key_size,
            max_samples,
            hop,
            "sizing sparse key index"
        );

        Ok(Self {
            config,
            max_samples,
            hop,
            arena: KeyArena::with_capacity(config.buffer_len(), max_samples),
            closed: false,
        })
    }

    /// Builds an index over an ordered key sequence, offering keys until the
    /// index reports that it is full.
    pub fn build<I>(config: IndexConfig, keys: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut index = Self::new(config)?;

        for (position, key) in keys.into_iter().enumerate() {
            if !index.add(position, key.as_ref()) {
                break;
            }
        }

        Ok(index)
    }

    /// Offers the source key at `source_key_index` to the index.
    ///
    /// Returns `false` once the index has no room left, after which the caller
    /// must stop offering keys. Returns `true` otherwise, including when the key
    /// was skipped by the hop rule.
    pub fn add(&mut self, source_key_index: usize, key: &[u8]) -> bool {
        if self.closed {
            return false;
        }

        // Capacity is checked before the hop rule, so a key too large for the
        // remaining space closes the index even when it would not be sampled
        if self.arena.len() >= self.max_samples || !self.arena.fits(key.len()) {
            self.close(source_key_index);
            return false;
        }

        if source_key_index % self.stride() == 0 {
            debug_assert!(self
                .arena
                .iter()
                .next_back()
                .map_or(true, |last| last <= key));

            let pushed = self.arena.push(key);
            debug_assert!(pushed, "capacity was checked before sampling");
        }

        true
    }

    fn close(&mut self, source_key_index: usize) {
        self.closed = true;

        debug!(
            source_key_index,
            samples = self.arena.len(),
            bytes_used = self.arena.bytes_used(),
            "sparse key index closed"
        );
    }

    /// Finds the bracket of source key indices that must contain `key` if the
    /// segment holds it.
    pub fn lookup(&self, key: &[u8]) -> Lookup {
        let result = self.search(key);
        trace!(?result, "sparse key index lookup");
        result
    }

    fn search(&self, key: &[u8]) -> Lookup {
        let count = self.arena.len();
        if count == 0 {
            return Lookup::Unbounded(0);
        }

        let stride = self.stride();

        if key < self.arena.key(0) {
            return Lookup::BeforeFirst;
        }

        if key > self.arena.key(count - 1) {
            return Lookup::Unbounded((count - 1) * stride);
        }

        match OptimalSearch::search_range_by(0..count, |h| self.arena.key(h).cmp(key)) {
            Ok(h) => Lookup::DirectHit(h * stride),
            Err(right) => {
                // The first sample sorts below the key, so `right` is at least 1
                let left = lower_bound(Err(right)).unwrap_or(0);
                Lookup::Range {
                    left: left * stride,
                    right: right * stride,
                }
            }
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    pub fn stride(&self) -> usize {
        self.hop + 1
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    pub fn sample_count(&self) -> usize {
        self.arena.len()
    }

    pub fn bytes_used(&self) -> usize {
        self.arena.bytes_used()
    }

    /// Whether the index has stopped accepting keys.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The sampled key at sample position `index`.
    pub fn sample(&self, index: usize) -> Option<&[u8]> {
        self.arena.get(index)
    }

    /// Every sample along with the source key index it was taken from.
    pub fn samples(&self) -> impl DoubleEndedIterator<Item = (usize, &[u8])> + '_ {
        let stride = self.stride();
        self.arena
            .iter()
            .enumerate()
            .map(move |(i, key)| (i * stride, key))
    }

    pub(crate) fn arena(&self) -> &KeyArena {
        &self.arena
    }

    /// Reassembles a restored, read-only index.
    pub(crate) fn from_parts(config: IndexConfig, arena: KeyArena) -> Self {
        Self {
            max_samples: config.max_samples(),
            hop: config.hop(),
            config,
            arena,
            closed: true,
        }
    }
}
