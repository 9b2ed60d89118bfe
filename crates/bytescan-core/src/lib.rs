#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for bytescan automata.
//!
//! - `bits` - word and byte-array bit helpers, 256-bit byte sets
//! - `graph` - the mutable intermediate graph, traversal, and a reference walker
//! - `interchange` - lossless JSON and binary forms of the graph

pub mod bits;
mod error;
pub mod graph;
pub mod interchange;


pub use bits::{BitWord, Bitmap256};
pub use error::GraphError;
pub use graph::{Automaton, Edge, Node, NodeId, Output, OutputId, Target, Triggers};
