//! Encoder preconditions.
//!
//! The compiled format stores at most one transition per byte and has no
//! epsilon edges, and a matcher must make progress on every byte. The graph
//! is checked for all three before anything is laid out.

use bytescan_core::graph::breadth_first_order;
use bytescan_core::{Automaton, NodeId};

use super::EmitError;

pub fn verify(automaton: &Automaton) -> Result<(), EmitError> {
    let order = breadth_first_order(automaton, [automaton.start()]);

    for &id in &order {
        let node = automaton.node(id);
        if node.edges().iter().any(|edge| edge.is_epsilon()) {
            return Err(EmitError::EpsilonEdge { node: id });
        }
        for c in 0..=255u8 {
            if node.edges_for(c).nth(1).is_some() {
                return Err(EmitError::NonDeterministic { node: id, byte: c });
            }
        }
    }

    for id in automaton.output_ids() {
        let len = automaton.output(id).content().len();
        if u32::try_from(len).is_err() {
            return Err(EmitError::OutputTooLong { output: id, len });
        }
    }

    for c in 0..=255u8 {
        if let Some(node) = nonadvancing_cycle(automaton, &order, c) {
            return Err(EmitError::NonAdvancingCycle { node, byte: c });
        }
    }
    Ok(())
}

/// A node on a cycle of non-advancing transitions taken on `c`, if any.
///
/// On a fixed byte every node has at most one transition, so the
/// non-advancing ones form a functional graph; a cycle shows up as a path
/// that reaches a node still on the current path.
fn nonadvancing_cycle(automaton: &Automaton, order: &[NodeId], c: u8) -> Option<NodeId> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unseen,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unseen; automaton.node_count()];
    for &start in order {
        let mut path = Vec::new();
        let mut current = start;
        loop {
            match marks[current.index()] {
                Mark::Done => break,
                Mark::OnPath => return Some(current),
                Mark::Unseen => {}
            }
            marks[current.index()] = Mark::OnPath;
            path.push(current);
            match automaton.node(current).step(c) {
                Some(t) if !t.advance => current = t.node,
                _ => break,
            }
        }
        for id in path {
            marks[id.index()] = Mark::Done;
        }
    }
    None
}
