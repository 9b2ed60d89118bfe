//! External representations of the intermediate graph.
//!
//! Both forms carry the same record: format version, start node, flags,
//! metadata, the node arena, and the output pool. Node and output identity is
//! the arena index, so shared targets and cycles survive a round trip.

mod binary;
mod json;
mod raw;

#[cfg(test)]
mod binary_tests;

/// Version written into every interchange document.
pub const FORMAT_VERSION: u32 = 1;
