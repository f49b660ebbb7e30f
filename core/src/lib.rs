//! A sparse, fixed-budget key index for immutable sorted segments.
//!
//! A segment built by a log-structured store holds more keys than can be indexed
//! in memory. [`SparseKeyIndex`] samples every `hop + 1`-th key into a fixed
//! buffer during the segment's build pass; lookups then narrow a query down to
//! a bracket of key indices which the segment reader searches on its own.
//!
//! ```
//! use sparse_index::{IndexConfig, Lookup, SparseKeyIndex};
//!
//! let keys = ["key1", "key10", "key100", "key1000", "key250", "key4000", "key500"];
//! let index = SparseKeyIndex::build(IndexConfig::new(30, keys.len(), 6), keys)?;
//!
//! assert_eq!(index.lookup(b"key1000"), Lookup::DirectHit(3));
//! assert_eq!(index.lookup(b"key400"), Lookup::Range { left: 3, right: 6 });
//! # Ok::<(), sparse_index::IndexError>(())
//! ```

mod arena;
mod config;
mod error;
mod index;
mod lookup;
mod persist;
mod segment;

pub use arena::KeyArena;
pub use config::{IndexConfig, OFFSET_FIELD_SIZE};
pub use error::{IndexError, Result};
pub use index::SparseKeyIndex;
pub use lookup::Lookup;
pub use persist::SNAPSHOT_VERSION;
pub use segment::{locate, KeySource, SortedKeys};
