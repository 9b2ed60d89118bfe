//! Runtime engine for compiled automata.
//!
//! This module handles:
//! - Scanning input chunks against a loaded buffer, with resumable state
//! - Hop limits that bound work per byte on malformed buffers
//! - Optional tracing of every transition
//! - Whole-buffer verification ahead of scanning

mod error;
mod state;
mod trace;
mod verify;
mod vm;

#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use state::{ScanOutcome, ScanState};
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use verify::{VerifyReport, verify};
pub use vm::{Engine, ScanLimits};
