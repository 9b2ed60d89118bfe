//! Errors that can occur while scanning.

use bytescan_bytecode::ModuleError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A record reached during the scan could not be decoded.
    #[error("corrupt buffer: {0}")]
    Module(#[from] ModuleError),

    /// Too many non-advancing hops on one byte; the buffer has a cycle.
    #[error("no progress on byte {byte:#04x} at position {position} after {hops} hops")]
    HopLimitExceeded { position: u64, byte: u8, hops: u64 },
}
