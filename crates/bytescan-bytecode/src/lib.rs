#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled automaton format for bytescan.
//!
//! This crate contains:
//! - The buffer format (header, node and output records, metadata)
//! - Loading and validation ([`Module`])
//! - A human-readable disassembler ([`dump`])

pub mod dump;
pub mod format;


pub use dump::dump;
pub use format::{
    ByteOrder, HEADER_SIZE, Header, HighNode, IdOverflow, IdWidth, LoadOptions, LowEdge, LowNode,
    MAGIC, Module, ModuleError, NodeEncoding, NodeRecord, OutputRecord, Reader, Transition,
    VERSION, Writer,
};
