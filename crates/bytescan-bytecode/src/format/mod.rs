//! Compiled automaton format.
//!
//! A buffer is a 64-byte [`Header`] followed by node records, output records,
//! and an optional metadata section. Node and output references are absolute
//! offsets into the buffer, stored in the header's id width and byte order; 0
//! means "none".

mod byte_order;
mod error;
mod header;
mod id_width;
mod module;
mod node;
mod output;
mod reader;
mod writer;

#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod module_tests;
#[cfg(test)]
mod node_tests;

pub use byte_order::ByteOrder;
pub use error::{IdOverflow, ModuleError};
pub use header::{BYTE_ORDER_MARKER, Header, checksum};
pub use id_width::IdWidth;
pub use module::{LoadOptions, Module, OutputChain, metadata_len, write_metadata};
pub use node::{HighNode, LowEdge, LowNode, MAX_LOW_DEGREE, NodeBody, NodeEncoding, NodeRecord, Transition};
pub use output::{OutputRecord, encoded_len as output_len, write_output};
pub use reader::{Reader, id_at};
pub use writer::{Writer, padding_for};

/// Magic bytes at offset 0.
pub const MAGIC: [u8; 4] = *b"BSCN";

/// Format version.
pub const VERSION: u8 = 1;

/// Header size in bytes; the first record starts here.
pub const HEADER_SIZE: usize = 64;
