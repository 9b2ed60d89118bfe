use super::{ByteOrder, IdWidth};

/// Errors raised while loading or decoding a compiled buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    #[error("buffer too small: {0} bytes")]
    TooSmall(usize),

    #[error("invalid magic: expected BSCN")]
    InvalidMagic,

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    #[error("unknown byte order tag {0}")]
    UnknownByteOrder(u8),

    #[error("byte order marker does not match the byte order tag")]
    MarkerMismatch,

    #[error("endianness mismatch: buffer is {buffer}-endian, host is {host}-endian")]
    EndiannessMismatch { buffer: ByteOrder, host: ByteOrder },

    #[error("invalid id width {0}")]
    InvalidIdWidth(u8),

    #[error("size mismatch: header says {header} bytes, buffer has {actual}")]
    SizeMismatch { header: u64, actual: usize },

    #[error("checksum mismatch: header has {expected:#010x}, data hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("{what} offset {offset} out of range for {size}-byte buffer")]
    OffsetOutOfRange {
        what: &'static str,
        offset: u64,
        size: usize,
    },

    #[error("truncated record at {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unknown node kind {kind} at {offset}")]
    UnknownNodeKind { offset: u64, kind: u8 },

    #[error("invalid node at {offset}: {reason}")]
    InvalidNode { offset: u64, reason: &'static str },

    #[error("invalid metadata at {offset}")]
    InvalidMetadata { offset: u64 },
}

/// A reference too large for the chosen id width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value {value} does not fit in {width} ids")]
pub struct IdOverflow {
    pub value: u64,
    pub width: IdWidth,
}
