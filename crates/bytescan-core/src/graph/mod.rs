//! Intermediate graph representation.
//!
//! - `automaton` - the owning arena and bulk rewrites
//! - `node` - nodes, edges, and trigger sets
//! - `output` - output records
//! - `traverse` - breadth-first traversal
//! - `walk` - reference interpreter

mod automaton;
mod ids;
mod node;
mod output;
pub mod traverse;
mod walk;

#[cfg(test)]
mod automaton_tests;
#[cfg(test)]
mod traverse_tests;

pub use automaton::{Automaton, Compaction, OutputChain};
pub use ids::{NodeId, OutputId, Target};
pub use node::{BITMAP_THRESHOLD, Edge, Node, Triggers};
pub use output::Output;
pub use traverse::{breadth_first, breadth_first_mut, breadth_first_order, reachable};
pub use walk::{Walker, walk};
