use thiserror::Error;

/// Errors raised while configuring, persisting or restoring an index.
///
/// Running out of capacity during a build and missing a key during a lookup are
/// not errors: `add` reports the former by returning `false`, and `lookup`
/// always returns a usable bracket.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("invalid index configuration: {0}")]
    InvalidConfig(&'static str),

    #[error(
        "a budget of {capacity_bytes} bytes cannot hold a single sample of average size {average_key_size}"
    )]
    NoRoomForSample {
        capacity_bytes: usize,
        average_key_size: usize,
    },

    #[error("key buffer of {0} bytes is not addressable by 32-bit offsets")]
    BufferTooLarge(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("corrupt index snapshot: {0}")]
    Corrupt(String),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

pub type Result<T> = std::result::Result<T, IndexError>;
