//! JSON form of the intermediate graph.

use super::raw::RawAutomaton;
use crate::error::GraphError;
use crate::graph::Automaton;

impl Automaton {
    /// Parse an automaton from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let raw: RawAutomaton = serde_json::from_str(json).map_err(GraphError::Json)?;
        raw.try_into()
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&RawAutomaton::from(self))
            .expect("serialization should not fail")
    }
}
