//! bytescan compiler: construction, optimization, and encoding.
//!
//! This crate turns byte patterns into compiled automata:
//! - `construct` - Aho-Corasick construction of the intermediate graph
//! - `optimize` - edge optimization, output deduplication, and non-advancing
//!   edge translation
//! - `emit` - encoding into the compiled buffer format
//! - `pipeline` - the three stages chained behind one call

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod construct;
pub mod emit;
pub mod optimize;
pub mod pipeline;

#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
pub mod test_utils;

pub use construct::{AhoCorasick, ContentKind};
pub use emit::{CompileStats, Compiled, EmitConfig, EmitError};
pub use optimize::{NonAdvancingMode, OptimizeOptions, OptimizeReport};
pub use pipeline::{compile, compile_json, compile_patterns};

use bytescan_core::GraphError;

/// Errors raised by the compilation pipeline, by stage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The intermediate graph could not be read.
    #[error("invalid automaton: {0}")]
    Interchange(#[from] GraphError),

    /// The graph could not be encoded.
    #[error("encoding failed: {0}")]
    Encode(#[from] EmitError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
