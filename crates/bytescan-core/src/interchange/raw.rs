use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FORMAT_VERSION;
use crate::error::GraphError;
use crate::graph::{Automaton, Node, NodeId, Output};

/// Serialized shape of an [`Automaton`].
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct RawAutomaton {
    version: u32,
    start: NodeId,
    #[serde(default)]
    no_advance_no_output: bool,
    #[serde(default)]
    metadata: IndexMap<String, String>,
    nodes: Vec<Node>,
    #[serde(default)]
    outputs: Vec<Output>,
}

impl From<&Automaton> for RawAutomaton {
    fn from(automaton: &Automaton) -> Self {
        Self {
            version: FORMAT_VERSION,
            start: automaton.start,
            no_advance_no_output: automaton.no_advance_no_output,
            metadata: automaton.metadata.clone(),
            nodes: automaton.nodes.clone(),
            outputs: automaton.outputs.clone(),
        }
    }
}

impl TryFrom<RawAutomaton> for Automaton {
    type Error = GraphError;

    fn try_from(raw: RawAutomaton) -> Result<Self, Self::Error> {
        if raw.version != FORMAT_VERSION {
            return Err(GraphError::UnsupportedVersion(raw.version));
        }
        let mut nodes = raw.nodes;
        for node in &mut nodes {
            for edge in node.edges_mut() {
                edge.normalize();
            }
        }
        let automaton = Automaton {
            nodes,
            outputs: raw.outputs,
            start: raw.start,
            no_advance_no_output: raw.no_advance_no_output,
            metadata: raw.metadata,
        };
        automaton.validate()?;
        Ok(automaton)
    }
}
