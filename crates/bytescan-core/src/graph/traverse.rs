//! Breadth-first traversal.
//!
//! Nodes are visited in order of distance from the roots; successors are
//! queued in edge order with the default last. A visited set keyed by arena
//! index makes cycles terminate.

use std::collections::VecDeque;

use super::automaton::Automaton;
use super::ids::NodeId;
use super::node::Node;

/// Node ids reachable from `roots`, in breadth-first order.
pub fn breadth_first_order(
    automaton: &Automaton,
    roots: impl IntoIterator<Item = NodeId>,
) -> Vec<NodeId> {
    let mut order = Vec::new();
    walk(automaton.node_count(), roots, |id| {
        order.push(id);
        automaton.node(id).successors().collect()
    });
    order
}

/// Visit every node reachable from the start node once.
pub fn breadth_first(automaton: &Automaton, mut visit: impl FnMut(NodeId, &Node)) {
    walk(automaton.node_count(), [automaton.start()], |id| {
        let node = automaton.node(id);
        visit(id, node);
        node.successors().collect()
    });
}

/// Like [`breadth_first`], but each node may be rewritten in place.
///
/// Successors are read after `visit` returns, so the traversal follows the
/// rewritten edges.
pub fn breadth_first_mut(automaton: &mut Automaton, mut visit: impl FnMut(NodeId, &mut Node)) {
    let count = automaton.node_count();
    let start = automaton.start();
    walk(count, [start], |id| {
        let node = automaton.node_mut(id);
        visit(id, node);
        node.successors().collect()
    });
}

/// Reachability from the start node, indexed by node id.
pub fn reachable(automaton: &Automaton) -> Vec<bool> {
    let mut seen = vec![false; automaton.node_count()];
    for id in breadth_first_order(automaton, [automaton.start()]) {
        seen[id.index()] = true;
    }
    seen
}

fn walk(
    node_count: usize,
    roots: impl IntoIterator<Item = NodeId>,
    mut step: impl FnMut(NodeId) -> Vec<NodeId>,
) {
    let mut queued = vec![false; node_count];
    let mut todo = VecDeque::new();

    for root in roots {
        if !queued[root.index()] {
            queued[root.index()] = true;
            todo.push_back(root);
        }
    }

    while let Some(id) = todo.pop_front() {
        for next in step(id) {
            if !queued[next.index()] {
                queued[next.index()] = true;
                todo.push_back(next);
            }
        }
    }
}
