#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Execution engine for compiled bytescan automata.
//!
//! An [`Engine`] interprets a loaded buffer one input byte at a time and
//! reports every fired output to a callback. Engines are cheap to clone and
//! share the buffer, so many streams can be scanned in parallel, each with
//! its own [`ScanState`].

pub mod engine;

pub use bytescan_bytecode::{LoadOptions, Module, ModuleError};
pub use engine::{
    Engine, NoopTracer, PrintTracer, RuntimeError, ScanLimits, ScanOutcome, ScanState, Tracer,
    VerifyReport, verify,
};
