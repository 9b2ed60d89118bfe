//! Binary form of the intermediate graph using postcard.

use super::raw::RawAutomaton;
use crate::error::GraphError;
use crate::graph::Automaton;

impl Automaton {
    /// Deserialize an automaton from its binary form.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GraphError> {
        let raw: RawAutomaton = postcard::from_bytes(bytes).map_err(GraphError::Binary)?;
        raw.try_into()
    }

    /// Serialize to the binary form.
    pub fn to_binary(&self) -> Vec<u8> {
        postcard::to_allocvec(&RawAutomaton::from(self)).expect("serialization should not fail")
    }
}
