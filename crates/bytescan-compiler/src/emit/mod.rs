//! Encoding of the intermediate graph into the compiled format.
//!
//! This module handles:
//! - Precondition checks (determinism, no epsilon edges, no non-advancing cycles)
//! - Per-node choice between low- and high-degree records
//! - Two-pass layout with id width selection
//! - Buffer assembly, header, and checksum

mod config;
mod emitter;
mod error;
pub mod layout;
pub mod plan;
mod stats;
mod verify;

#[cfg(test)]
mod layout_tests;
#[cfg(test)]
mod verify_tests;

pub use config::EmitConfig;
pub use emitter::{Compiled, emit};
pub use error::EmitError;
pub use stats::CompileStats;
pub use verify::verify;
