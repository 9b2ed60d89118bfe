//! Nodes and edges of the intermediate graph.

use serde::{Deserialize, Serialize};

use super::ids::{NodeId, OutputId, Target};
use crate::bits::Bitmap256;

/// Distinct values at which an optimized edge switches to a bitmap.
pub const BITMAP_THRESHOLD: usize = 32;

/// Trigger byte set of an edge.
///
/// `Values` is kept sorted and free of duplicates. An empty `Values` set marks
/// an epsilon edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Triggers {
    Values(Vec<u8>),
    Bitmap(Bitmap256),
}

impl Default for Triggers {
    fn default() -> Self {
        Self::Values(Vec::new())
    }
}

/// A transition rule: trigger bytes, advance flag, and target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    target: NodeId,
    #[serde(default = "default_advance")]
    advance: bool,
    #[serde(default)]
    triggers: Triggers,
}

fn default_advance() -> bool {
    true
}

impl Edge {
    /// Advancing epsilon edge to `target`; add triggers to give it a condition.
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            advance: true,
            triggers: Triggers::default(),
        }
    }

    pub fn from_values(target: NodeId, advance: bool, values: impl IntoIterator<Item = u8>) -> Self {
        let mut values: Vec<u8> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        Self {
            target,
            advance,
            triggers: Triggers::Values(values),
        }
    }

    pub fn from_bitmap(target: NodeId, advance: bool, bitmap: Bitmap256) -> Self {
        Self {
            target,
            advance,
            triggers: Triggers::Bitmap(bitmap),
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn set_target(&mut self, target: NodeId) {
        self.target = target;
    }

    pub fn advance(&self) -> bool {
        self.advance
    }

    pub fn set_advance(&mut self, advance: bool) {
        self.advance = advance;
    }

    /// Target and advance flag as one value.
    pub fn transition(&self) -> Target {
        Target::new(self.target, self.advance)
    }

    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// Add `c` to the trigger set; returns whether it was newly added.
    pub fn add_trigger(&mut self, c: u8) -> bool {
        match &mut self.triggers {
            Triggers::Values(values) => match values.binary_search(&c) {
                Ok(_) => false,
                Err(at) => {
                    values.insert(at, c);
                    true
                }
            },
            Triggers::Bitmap(bitmap) => bitmap.insert(c),
        }
    }

    /// Remove `c` from the trigger set; returns whether it was present.
    pub fn remove_trigger(&mut self, c: u8) -> bool {
        match &mut self.triggers {
            Triggers::Values(values) => match values.binary_search(&c) {
                Ok(at) => {
                    values.remove(at);
                    true
                }
                Err(_) => false,
            },
            Triggers::Bitmap(bitmap) => bitmap.remove(c),
        }
    }

    /// No byte condition: the edge applies to every byte.
    pub fn is_epsilon(&self) -> bool {
        match &self.triggers {
            Triggers::Values(values) => values.is_empty(),
            Triggers::Bitmap(bitmap) => bitmap.is_empty(),
        }
    }

    /// Whether `c` is explicitly in the trigger set. Epsilon edges contain nothing.
    pub fn contains(&self, c: u8) -> bool {
        match &self.triggers {
            Triggers::Values(values) => values.binary_search(&c).is_ok(),
            Triggers::Bitmap(bitmap) => bitmap.contains(c),
        }
    }

    /// Whether the edge applies to `c`, counting epsilon edges as matching everything.
    pub fn matches(&self, c: u8) -> bool {
        self.is_epsilon() || self.contains(c)
    }

    /// Number of trigger values.
    pub fn len(&self) -> usize {
        match &self.triggers {
            Triggers::Values(values) => values.len(),
            Triggers::Bitmap(bitmap) => bitmap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self.triggers, Triggers::Bitmap(_))
    }

    /// Trigger values in ascending order.
    pub fn values(&self) -> Vec<u8> {
        match &self.triggers {
            Triggers::Values(values) => values.clone(),
            Triggers::Bitmap(bitmap) => bitmap.iter().collect(),
        }
    }

    pub fn to_bitmap(&self) -> Bitmap256 {
        match &self.triggers {
            Triggers::Values(values) => values.iter().copied().collect(),
            Triggers::Bitmap(bitmap) => *bitmap,
        }
    }

    pub fn switch_to_bitmap(&mut self) {
        if let Triggers::Values(_) = self.triggers {
            self.triggers = Triggers::Bitmap(self.to_bitmap());
        }
    }

    pub fn switch_to_values(&mut self) {
        if let Triggers::Bitmap(bitmap) = self.triggers {
            self.triggers = Triggers::Values(bitmap.iter().collect());
        }
    }

    /// Restore the sorted, duplicate-free form of an externally supplied set.
    pub(crate) fn normalize(&mut self) {
        if let Triggers::Values(values) = &mut self.triggers {
            values.sort_unstable();
            values.dedup();
        }
    }
}

/// A state of the intermediate graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    default: Option<Target>,
    #[serde(default)]
    first_output: Option<OutputId>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    /// Append an edge and return a handle to it.
    pub fn push_edge(&mut self, edge: Edge) -> &mut Edge {
        self.edges.push(edge);
        let last = self.edges.len() - 1;
        &mut self.edges[last]
    }

    pub fn default_target(&self) -> Option<Target> {
        self.default
    }

    pub fn set_default(&mut self, default: Option<Target>) {
        self.default = default;
    }

    pub fn first_output(&self) -> Option<OutputId> {
        self.first_output
    }

    pub fn set_first_output(&mut self, output: Option<OutputId>) {
        self.first_output = output;
    }

    /// Edges that apply to `c`, epsilon edges included.
    pub fn edges_for(&self, c: u8) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.matches(c))
    }

    /// Every transition the node allows on `c`.
    ///
    /// Matching edges in order; the default only when no edge matches. Empty
    /// when neither exists.
    pub fn targets_for(&self, c: u8) -> Vec<Target> {
        let targets: Vec<Target> = self.edges_for(c).map(Edge::transition).collect();
        if targets.is_empty()
            && let Some(default) = self.default
        {
            return vec![default];
        }
        targets
    }

    /// The transition taken on `c` when the graph is interpreted directly.
    ///
    /// Explicit edges win over epsilon edges, which win over the default.
    pub fn step(&self, c: u8) -> Option<Target> {
        self.edges
            .iter()
            .find(|edge| edge.contains(c))
            .or_else(|| self.edges.iter().find(|edge| edge.is_epsilon()))
            .map(Edge::transition)
            .or(self.default)
    }

    /// Edge targets in order, then the default target.
    pub fn successors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges
            .iter()
            .map(Edge::target)
            .chain(self.default.map(|d| d.node))
    }

    /// At least one edge (not counting the default) does not advance.
    pub fn has_nonadvancing(&self) -> bool {
        self.edges.iter().any(|edge| !edge.advance())
    }
}
