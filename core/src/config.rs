use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Size in bytes of one entry of the offset table.
pub const OFFSET_FIELD_SIZE: usize = std::mem::size_of::<u32>();

/// Sizing parameters supplied by the segment builder.
///
/// Only `capacity_bytes` and `average_key_size` decide how many samples fit;
/// `source_key_count` decides how far apart they are. A poor estimate of the
/// average key size changes the density of the index, never its correctness.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexConfig {
    /// Memory budget for sampled keys and their offsets.
    pub capacity_bytes: usize,

    /// Exact number of keys in the segment being indexed.
    pub source_key_count: usize,

    /// Estimated average key size.
    pub average_key_size: usize,
}

impl IndexConfig {
    pub fn new(capacity_bytes: usize, source_key_count: usize, average_key_size: usize) -> Self {
        Self {
            capacity_bytes,
            source_key_count,
            average_key_size,
        }
    }

    /// The most samples the budget can hold.
    pub fn max_samples(&self) -> usize {
        self.capacity_bytes / (self.average_key_size + OFFSET_FIELD_SIZE)
    }

    /// Number of source keys skipped between two consecutive samples.
    ///
    /// Only meaningful on a validated config.
    pub fn hop(&self) -> usize {
        self.source_key_count / self.max_samples()
    }

    /// Distance between the source key indices of two consecutive samples.
    pub fn stride(&self) -> usize {
        self.hop() + 1
    }

    /// Size of the pre-allocated key buffer.
    pub fn buffer_len(&self) -> usize {
        self.max_samples().saturating_mul(self.average_key_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity_bytes == 0 {
            return Err(IndexError::InvalidConfig("capacity_bytes must be positive"));
        }

        if self.source_key_count == 0 {
            return Err(IndexError::InvalidConfig(
                "source_key_count must be positive",
            ));
        }

        if self.average_key_size == 0 {
            return Err(IndexError::InvalidConfig(
                "average_key_size must be positive",
            ));
        }

        if self.max_samples() == 0 {
            return Err(IndexError::NoRoomForSample {
                capacity_bytes: self.capacity_bytes,
                average_key_size: self.average_key_size,
            });
        }

        let buffer_len = self.buffer_len();
        if u32::try_from(buffer_len).is_err() {
            return Err(IndexError::BufferTooLarge(buffer_len));
        }

        Ok(())
    }
}
