//! The owning container of the intermediate graph.
//!
//! Nodes and outputs live in two arenas owned by [`Automaton`]. Edges,
//! defaults, and output links refer to them by index, so shared targets and
//! cycles need no reference counting. Removing entries is done in bulk
//! (see [`Automaton::retain_reachable`] and [`Automaton::redirect_outputs`]),
//! which renumbers the survivors.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::ids::{NodeId, OutputId, Target};
use super::node::{Edge, Node};
use super::output::Output;
use super::traverse;
use crate::error::GraphError;

/// An automaton in intermediate form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    pub(crate) nodes: Vec<Node>,
    pub(crate) outputs: Vec<Output>,
    pub(crate) start: NodeId,
    pub(crate) no_advance_no_output: bool,
    pub(crate) metadata: IndexMap<String, String>,
}

/// Entries dropped by [`Automaton::retain_reachable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Compaction {
    pub nodes: usize,
    pub outputs: usize,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// Automaton with a single start node and no outputs.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
            outputs: Vec::new(),
            start: NodeId::new(0),
            no_advance_no_output: false,
            metadata: IndexMap::new(),
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn set_start(&mut self, start: NodeId) {
        assert!(start.index() < self.nodes.len(), "start {start} out of range");
        self.start = start;
    }

    /// Outputs fire only when a node is entered through an advancing transition.
    pub fn no_advance_no_output(&self) -> bool {
        self.no_advance_no_output
    }

    pub fn set_no_advance_no_output(&mut self, value: bool) {
        self.no_advance_no_output = value;
    }

    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.metadata
    }

    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new());
        id
    }

    pub fn add_output(&mut self, content: impl Into<Vec<u8>>, next: Option<OutputId>) -> OutputId {
        let id = OutputId::new(self.outputs.len());
        self.outputs.push(Output::new(content, next));
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn output(&self, id: OutputId) -> &Output {
        &self.outputs[id.index()]
    }

    pub fn output_mut(&mut self, id: OutputId) -> &mut Output {
        &mut self.outputs[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    pub fn output_ids(&self) -> impl Iterator<Item = OutputId> + use<> {
        (0..self.outputs.len()).map(OutputId::new)
    }

    /// Add an epsilon edge from `from` to `target` and return it for configuration.
    pub fn create_edge(&mut self, from: NodeId, target: NodeId) -> &mut Edge {
        self.node_mut(from).push_edge(Edge::new(target))
    }

    /// Transitions `node` allows on `c`; see [`Node::targets_for`].
    pub fn targets_for(&self, node: NodeId, c: u8) -> Vec<Target> {
        self.node(node).targets_for(c)
    }

    /// Walk an output chain starting at `first`.
    ///
    /// Stops after visiting every pool entry once, so a malformed cyclic chain
    /// cannot loop forever.
    pub fn output_chain(&self, first: Option<OutputId>) -> OutputChain<'_> {
        OutputChain {
            automaton: self,
            next: first,
            budget: self.outputs.len(),
        }
    }

    /// Outputs attached to `node`, in chain order.
    pub fn outputs_of(&self, node: NodeId) -> OutputChain<'_> {
        self.output_chain(self.node(node).first_output())
    }

    /// Redirect every reference to a key of `redirect` toward its value, then
    /// drop the redirected outputs from the pool.
    ///
    /// Values must not themselves be keys. Returns the number of outputs
    /// removed.
    pub fn redirect_outputs(&mut self, redirect: &HashMap<OutputId, OutputId>) -> usize {
        if redirect.is_empty() {
            return 0;
        }
        debug_assert!(redirect.values().all(|v| !redirect.contains_key(v)));

        let keep: Vec<bool> = self
            .output_ids()
            .map(|id| !redirect.contains_key(&id))
            .collect();
        let renumber = renumbering(&keep);
        let resolve = |id: OutputId| {
            let survivor = redirect.get(&id).copied().unwrap_or(id);
            renumber[survivor.index()].map(OutputId::new)
        };

        for node in &mut self.nodes {
            if let Some(first) = node.first_output() {
                node.set_first_output(resolve(first));
            }
        }
        let old = std::mem::take(&mut self.outputs);
        for (index, mut output) in old.into_iter().enumerate() {
            if !keep[index] {
                continue;
            }
            if let Some(next) = output.next() {
                output.set_next(resolve(next));
            }
            self.outputs.push(output);
        }

        redirect.len()
    }

    /// Drop nodes unreachable from the start and outputs no surviving node
    /// refers to. Survivors are renumbered; the start node keeps index 0 of
    /// the visit order.
    pub fn retain_reachable(&mut self) -> Compaction {
        let order = traverse::breadth_first_order(self, [self.start]);
        let mut new_index: Vec<Option<usize>> = vec![None; self.nodes.len()];
        for (index, id) in order.iter().enumerate() {
            new_index[id.index()] = Some(index);
        }

        let mut live_outputs = vec![false; self.outputs.len()];
        for id in &order {
            let first = self.nodes[id.index()].first_output();
            for output in self.output_chain_ids(first) {
                live_outputs[output.index()] = true;
            }
        }
        let output_index = renumbering(&live_outputs);

        let remap_node = |id: NodeId| {
            NodeId::new(new_index[id.index()].expect("successor of a reachable node is reachable"))
        };
        let remap_output = |id: OutputId| output_index[id.index()].map(OutputId::new);

        let mut old_nodes: Vec<Option<Node>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for id in &order {
            let mut node = old_nodes[id.index()].take().unwrap_or_default();
            for edge in node.edges_mut() {
                edge.set_target(remap_node(edge.target()));
            }
            if let Some(default) = node.default_target() {
                node.set_default(Some(Target::new(remap_node(default.node), default.advance)));
            }
            if let Some(first) = node.first_output() {
                node.set_first_output(remap_output(first));
            }
            nodes.push(node);
        }

        let old_outputs = std::mem::take(&mut self.outputs);
        let mut outputs = Vec::new();
        for (index, mut output) in old_outputs.into_iter().enumerate() {
            if !live_outputs[index] {
                continue;
            }
            if let Some(next) = output.next() {
                output.set_next(remap_output(next));
            }
            outputs.push(output);
        }

        let compaction = Compaction {
            nodes: old_nodes.len() - nodes.len(),
            outputs: live_outputs.len() - outputs.len(),
        };
        self.nodes = nodes;
        self.outputs = outputs;
        self.start = NodeId::new(0);
        compaction
    }

    /// Check that every id refers to an existing node or output.
    pub fn validate(&self) -> Result<(), GraphError> {
        let node_ok = |id: NodeId| id.index() < self.nodes.len();
        let output_ok = |id: OutputId| id.index() < self.outputs.len();

        if !node_ok(self.start) {
            return Err(GraphError::MissingStart(self.start.index()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            for target in node.successors() {
                if !node_ok(target) {
                    return Err(GraphError::DanglingNode {
                        from: index,
                        target: target.index(),
                    });
                }
            }
            if let Some(first) = node.first_output()
                && !output_ok(first)
            {
                return Err(GraphError::DanglingOutput {
                    from: format!("node {index}"),
                    output: first.index(),
                });
            }
        }
        for (index, output) in self.outputs.iter().enumerate() {
            if let Some(next) = output.next()
                && !output_ok(next)
            {
                return Err(GraphError::DanglingOutput {
                    from: format!("output {index}"),
                    output: next.index(),
                });
            }
        }
        Ok(())
    }

    fn output_chain_ids(&self, first: Option<OutputId>) -> Vec<OutputId> {
        let mut ids = Vec::new();
        let mut next = first;
        while let Some(id) = next {
            if ids.len() > self.outputs.len() {
                break;
            }
            ids.push(id);
            next = self.outputs[id.index()].next();
        }
        ids
    }
}

/// Map each kept index to its position among the kept entries.
fn renumbering(keep: &[bool]) -> Vec<Option<usize>> {
    let mut next = 0;
    keep.iter()
        .map(|&k| {
            k.then(|| {
                next += 1;
                next - 1
            })
        })
        .collect()
}

/// Iterator over an output chain.
pub struct OutputChain<'a> {
    automaton: &'a Automaton,
    next: Option<OutputId>,
    budget: usize,
}

impl<'a> Iterator for OutputChain<'a> {
    type Item = &'a Output;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        let output = self.automaton.output(id);
        self.next = output.next();
        Some(output)
    }
}
