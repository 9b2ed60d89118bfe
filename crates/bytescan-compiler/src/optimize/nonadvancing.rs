//! Non-advancing edge translation.
//!
//! A non-advancing transition `n -c-> m` makes the matcher reprocess `c` at
//! `m`. When `m` has no outputs that such an entry would fire, the pair of
//! hops can be replaced by a direct transition from `n` to wherever `m` sends
//! `c`. If `m` has no transition for `c` at all, the byte is consumed at `m`,
//! so the transition becomes an advancing one into `m`.
//!
//! Rewrites happen per node and byte (conservative and aggressive modes) or
//! per edge (structural mode), and repeat until a round changes nothing.

use std::collections::HashMap;

use bytescan_core::graph::breadth_first_order;
use bytescan_core::{Automaton, Edge, NodeId, Target};

use super::edges::optimize_node;

/// How eagerly non-advancing transitions are rewritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NonAdvancingMode {
    /// Leave non-advancing transitions alone.
    #[default]
    None,
    /// Collapse a transition only when the intermediate node has exactly one
    /// transition for the byte.
    Conservative,
    /// Also redirect to every transition when the intermediate node has
    /// several.
    Aggressive,
    /// Retarget whole edges whose bytes all lead to one common node.
    Structural,
}

/// Rewrite non-advancing transitions; returns the number of rewrites.
pub fn translate_nonadvancing(automaton: &mut Automaton, mode: NonAdvancingMode) -> usize {
    if mode == NonAdvancingMode::None {
        return 0;
    }

    let max_rounds = automaton.node_count() + 1;
    let mut total = 0;
    for _ in 0..max_rounds {
        let count = match mode {
            NonAdvancingMode::None => 0,
            NonAdvancingMode::Conservative => translate_round(automaton, false),
            NonAdvancingMode::Aggressive => translate_round(automaton, true),
            NonAdvancingMode::Structural => structural_round(automaton),
        };
        if count == 0 {
            return total;
        }
        total += count;
    }

    log::warn!("non-advancing translation stopped after {max_rounds} rounds");
    total
}

/// Whether `c` may be looked up again at `target.node` instead of entering it.
fn bypassable(automaton: &Automaton, target: Target) -> bool {
    !target.advance
        && (automaton.no_advance_no_output()
            || automaton.node(target.node).first_output().is_none())
}

/// Replacement transitions for a non-advancing hop on `c`, or `None` to keep it.
fn resolve(
    automaton: &Automaton,
    from: NodeId,
    hop: Target,
    c: u8,
    aggressive: bool,
) -> Option<Vec<Target>> {
    if !bypassable(automaton, hop) {
        return None;
    }
    let next = automaton.targets_for(hop.node, c);
    if next.is_empty() {
        // The byte is consumed at the intermediate node; entering it by an
        // advancing transition must not fire outputs the hop did not.
        if automaton.node(hop.node).first_output().is_some() {
            return None;
        }
        return Some(vec![Target::advancing(hop.node)]);
    }
    if next.len() > 1 && !aggressive {
        return None;
    }
    let stuck = next
        .iter()
        .any(|&t| t == hop || t == Target::non_advancing(from));
    if stuck {
        return None;
    }
    Some(next)
}

fn translate_round(automaton: &mut Automaton, aggressive: bool) -> usize {
    let mut count = 0;
    for id in breadth_first_order(automaton, [automaton.start()]) {
        let mut table: Vec<Vec<Target>> = Vec::with_capacity(256);
        let mut changed = false;
        for c in 0..=255u8 {
            let mut targets = Vec::new();
            for hop in automaton.targets_for(id, c) {
                match resolve(automaton, id, hop, c, aggressive) {
                    Some(next) => {
                        changed = true;
                        count += 1;
                        targets.extend(next);
                    }
                    None => targets.push(hop),
                }
            }
            table.push(targets);
        }
        if changed {
            rebuild(automaton, id, &table);
        }
    }
    count
}

/// Replace a node's transitions with `table` (per byte, in byte order).
///
/// A node that had a default gets the most common single target as its new
/// default; every other byte becomes an explicit edge.
fn rebuild(automaton: &mut Automaton, id: NodeId, table: &[Vec<Target>]) {
    let node = automaton.node_mut(id);

    let default = if node.default_target().is_some() {
        let mut frequency: HashMap<Target, usize> = HashMap::new();
        for targets in table {
            if let [single] = targets.as_slice() {
                *frequency.entry(*single).or_default() += 1;
            }
        }
        let mut ranked: Vec<(Target, usize)> = frequency.into_iter().collect();
        // Deterministic tie break: lowest node, advancing first.
        ranked.sort_by_key(|&(t, n)| (std::cmp::Reverse(n), t.node, !t.advance));
        ranked.first().map(|&(t, _)| t)
    } else {
        None
    };

    let mut edges = Vec::new();
    for (c, targets) in table.iter().enumerate() {
        if let (Some(d), [single]) = (default, targets.as_slice())
            && *single == d
        {
            continue;
        }
        for t in targets {
            edges.push(Edge::from_values(t.node, t.advance, [c as u8]));
        }
    }

    *node.edges_mut() = edges;
    node.set_default(default);
    optimize_node(node);
}

/// Which part of a node handles a byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Edge(usize),
    Default,
}

fn slot_for(automaton: &Automaton, id: NodeId, c: u8) -> Option<Slot> {
    let node = automaton.node(id);
    let edges = node.edges();
    edges
        .iter()
        .position(|edge| edge.contains(c))
        .or_else(|| edges.iter().position(Edge::is_epsilon))
        .map(Slot::Edge)
        .or(node.default_target().map(|_| Slot::Default))
}

fn structural_round(automaton: &mut Automaton) -> usize {
    let mut count = 0;
    for id in breadth_first_order(automaton, [automaton.start()]) {
        let mut bytes: HashMap<Slot, Vec<u8>> = HashMap::new();
        for c in 0..=255u8 {
            if let Some(slot) = slot_for(automaton, id, c) {
                bytes.entry(slot).or_default().push(c);
            }
        }

        let mut slots: Vec<(Slot, Vec<u8>)> = bytes.into_iter().collect();
        slots.sort_by_key(|(slot, _)| match slot {
            Slot::Edge(i) => *i,
            Slot::Default => usize::MAX,
        });

        let mut changed = false;
        for (slot, bytes) in slots {
            let node = automaton.node(id);
            let hop = match slot {
                Slot::Edge(i) => node.edges()[i].transition(),
                Slot::Default => match node.default_target() {
                    Some(d) => d,
                    None => continue,
                },
            };
            let Some(replacement) = common_target(automaton, id, hop, &bytes) else {
                continue;
            };
            let node = automaton.node_mut(id);
            match slot {
                Slot::Edge(i) => {
                    let edge = &mut node.edges_mut()[i];
                    edge.set_target(replacement.node);
                    edge.set_advance(replacement.advance);
                }
                Slot::Default => node.set_default(Some(replacement)),
            }
            changed = true;
            count += 1;
        }
        if changed {
            optimize_node(automaton.node_mut(id));
        }
    }
    count
}

/// The single transition every byte of `bytes` resolves to through `hop`.
fn common_target(automaton: &Automaton, from: NodeId, hop: Target, bytes: &[u8]) -> Option<Target> {
    let mut common = None;
    for &c in bytes {
        let next = resolve(automaton, from, hop, c, false)?;
        let [t] = next.as_slice() else {
            return None;
        };
        match common {
            None => common = Some(*t),
            Some(prev) if prev == *t => {}
            Some(_) => return None,
        }
    }
    common
}
