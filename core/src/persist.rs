//! Snapshotting an index so it can be stored next to its segment.
//!
//! A snapshot carries the configuration together with the offset table and the
//! used prefix of the key buffer. Hop and sample limits are recomputed from the
//! configuration on load, so a snapshot can never disagree with its own sizing.
//!
//! A restored index is read-only: its arena is sized to the snapshot's contents
//! rather than to the configured budget, so memory use on load is bounded by the
//! size of the input.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arena::KeyArena;
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::index::SparseKeyIndex;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug)]
struct IndexSnapshot {
    version: u32,
    config: IndexConfig,
    offsets: Vec<u32>,
    data: Vec<u8>,
}

impl IndexSnapshot {
    fn check(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(IndexError::UnsupportedVersion(self.version));
        }

        self.config.validate()?;

        if self.offsets.len() > self.config.max_samples() {
            return Err(IndexError::Corrupt(format!(
                "{} samples exceed the limit of {}",
                self.offsets.len(),
                self.config.max_samples()
            )));
        }

        if self.data.len() > self.config.buffer_len() {
            return Err(IndexError::Corrupt(format!(
                "{} key bytes exceed the buffer of {}",
                self.data.len(),
                self.config.buffer_len()
            )));
        }

        match self.offsets.first() {
            None if !self.data.is_empty() => {
                return Err(IndexError::Corrupt("key bytes without offsets".into()))
            }
            Some(&first) if first != 0 => {
                return Err(IndexError::Corrupt("first offset is not zero".into()))
            }
            _ => {}
        }

        let in_order = self.offsets.windows(2).all(|pair| pair[0] <= pair[1]);
        let in_bounds = self
            .offsets
            .last()
            .map_or(true, |&last| last as usize <= self.data.len());

        if !in_order || !in_bounds {
            return Err(IndexError::Corrupt("malformed offset table".into()));
        }

        Ok(())
    }

    fn key(&self, index: usize) -> &[u8] {
        let start = self.offsets[index] as usize;
        let end = self
            .offsets
            .get(index + 1)
            .map_or(self.data.len(), |&next| next as usize);

        &self.data[start..end]
    }
}

impl SparseKeyIndex {
    /// Encodes the index into a self-describing byte snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let arena = self.arena();

        let snapshot = IndexSnapshot {
            version: SNAPSHOT_VERSION,
            config: *self.config(),
            offsets: arena.offsets().to_vec(),
            data: arena.bytes().to_vec(),
        };

        Ok(bincode::serialize(&snapshot)?)
    }

    /// Restores an index from a snapshot produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: IndexSnapshot = bincode::deserialize(bytes)?;
        snapshot.check()?;

        let config = snapshot.config;
        let mut arena = KeyArena::with_capacity(snapshot.data.len(), snapshot.offsets.len());

        let mut previous: Option<&[u8]> = None;
        for index in 0..snapshot.offsets.len() {
            let key = snapshot.key(index);

            if previous.is_some_and(|previous| previous > key) {
                return Err(IndexError::Corrupt(format!(
                    "sample {index} is out of order"
                )));
            }

            let pushed = arena.push(key);
            debug_assert!(pushed, "arena is sized to the snapshot's keys");
            previous = Some(key);
        }

        debug!(
            samples = arena.len(),
            bytes_used = arena.bytes_used(),
            "restored sparse key index"
        );

        Ok(SparseKeyIndex::from_parts(config, arena))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}
