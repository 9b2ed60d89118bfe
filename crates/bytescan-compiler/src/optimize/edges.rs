//! Edge optimization.
//!
//! Edges that share a `(target, advance)` pair are merged into one. A merged
//! set of at least [`BITMAP_THRESHOLD`] values is stored as a bitmap, smaller
//! ones as a sorted list. Epsilon edges are deduplicated per pair; when the
//! node has no default, the first one becomes the default.

use bytescan_core::graph::{BITMAP_THRESHOLD, breadth_first_mut};
use bytescan_core::{Automaton, Bitmap256, Edge, Node, Target};
use indexmap::{IndexMap, IndexSet};

/// Optimize the edges of every reachable node; returns how many changed.
pub fn optimize_edges(automaton: &mut Automaton) -> usize {
    let mut changed = 0;
    breadth_first_mut(automaton, |_, node| {
        if optimize_node(node) {
            changed += 1;
        }
    });
    changed
}

/// Rewrite one node's edges in optimized form; returns whether anything changed.
pub fn optimize_node(node: &mut Node) -> bool {
    let mut groups: IndexMap<Target, Bitmap256> = IndexMap::new();
    let mut epsilons: IndexSet<Target> = IndexSet::new();
    for edge in node.edges() {
        if edge.is_epsilon() {
            epsilons.insert(edge.transition());
            continue;
        }
        let values = groups.entry(edge.transition()).or_default();
        for c in edge.values() {
            values.insert(c);
        }
    }

    let mut default = node.default_target();
    let mut epsilons = epsilons.into_iter();
    if default.is_none() {
        default = epsilons.next();
    }

    let mut edges: Vec<Edge> = groups
        .into_iter()
        .map(|(t, values)| {
            if values.len() >= BITMAP_THRESHOLD {
                Edge::from_bitmap(t.node, t.advance, values)
            } else {
                Edge::from_values(t.node, t.advance, values.iter())
            }
        })
        .collect();
    edges.extend(epsilons.map(|t| {
        let mut edge = Edge::new(t.node);
        edge.set_advance(t.advance);
        edge
    }));

    if edges == node.edges() && default == node.default_target() {
        return false;
    }
    *node.edges_mut() = edges;
    node.set_default(default);
    true
}
