use serde::{Deserialize, Serialize};

/// Index of a node in its automaton's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

/// Index of an output in its automaton's output pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or_else(|_| panic!("node arena overflow: {index}")))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl OutputId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or_else(|_| panic!("output pool overflow: {index}")))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "o{}", self.0)
    }
}

/// Where a transition leads and whether it consumes the input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub node: NodeId,
    pub advance: bool,
}

impl Target {
    pub fn new(node: NodeId, advance: bool) -> Self {
        Self { node, advance }
    }

    pub fn advancing(node: NodeId) -> Self {
        Self::new(node, true)
    }

    pub fn non_advancing(node: NodeId) -> Self {
        Self::new(node, false)
    }
}
