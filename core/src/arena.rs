/// A fixed-size byte arena holding concatenated keys, addressed by an offset table.
///
/// The byte buffer is allocated once and never reallocated: `push` refuses a key
/// that does not fit in the remaining space instead of growing the buffer.
#[derive(Clone, Debug)]
pub struct KeyArena {
    data: Box<[u8]>,
    offsets: Vec<u32>,
    bytes_used: usize,
}

impl KeyArena {
    /// Creates an arena able to hold `capacity` bytes of keys across at most
    /// `max_keys` entries.
    ///
    /// `capacity` must be addressable by a `u32` offset.
    pub fn with_capacity(capacity: usize, max_keys: usize) -> Self {
        debug_assert!(u32::try_from(capacity).is_ok());

        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            offsets: Vec::with_capacity(max_keys),
            bytes_used: 0,
        }
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Total size of the byte buffer.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn bytes_used(&self) -> usize {
        self.bytes_used
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.bytes_used
    }

    /// Whether `len` more bytes can be appended.
    pub fn fits(&self, len: usize) -> bool {
        len <= self.remaining()
    }

    /// Appends a key, returning `false` without touching the arena when it
    /// does not fit.
    pub fn push(&mut self, key: &[u8]) -> bool {
        if !self.fits(key.len()) {
            return false;
        }

        let start = self.bytes_used;
        let end = start + key.len();

        // Cannot truncate, the whole buffer is addressable by a u32
        self.offsets.push(start as u32);
        self.data[start..end].copy_from_slice(key);
        self.bytes_used = end;

        true
    }

    /// Returns the key at position `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        (index < self.len()).then(|| self.key(index))
    }

    /// Returns the key at position `index`, which must be in bounds.
    pub(crate) fn key(&self, index: usize) -> &[u8] {
        let start = self.offsets[index] as usize;
        let end = if index + 1 < self.offsets.len() {
            self.offsets[index + 1] as usize
        } else {
            self.bytes_used
        };

        &self.data[start..end]
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[u8]> + ExactSizeIterator + '_ {
        (0..self.len()).map(move |index| self.key(index))
    }

    /// Start offset of every key, in key order.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The used prefix of the byte buffer.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.bytes_used]
    }
}
