//! Direct interpretation of the intermediate graph.
//!
//! The compiled engine must agree with this walker on every input; tests in
//! the compiler and vm crates use it as the reference.

use super::automaton::Automaton;
use super::ids::{NodeId, Target};

/// Streaming matcher over an [`Automaton`].
#[derive(Clone, Debug)]
pub struct Walker<'a> {
    automaton: &'a Automaton,
    node: NodeId,
    position: u64,
    started: bool,
}

impl<'a> Walker<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            node: automaton.start(),
            position: 0,
            started: false,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Consume `input`, reporting `(content, end position)` per fired output.
    pub fn feed(&mut self, input: &[u8], mut on_output: impl FnMut(&[u8], u64)) {
        if !self.started {
            self.started = true;
            self.emit(self.node, &mut on_output);
        }

        // A well-formed graph never needs more hops than it has nodes.
        let hop_limit = self.automaton.node_count() + 1;
        for &c in input {
            let mut hops = 0;
            loop {
                let Some(Target { node, advance }) = self.automaton.node(self.node).step(c) else {
                    self.position += 1;
                    break;
                };
                self.node = node;
                if advance {
                    self.position += 1;
                }
                if advance || !self.automaton.no_advance_no_output() {
                    self.emit(node, &mut on_output);
                }
                if advance {
                    break;
                }
                hops += 1;
                if hops > hop_limit {
                    self.position += 1;
                    break;
                }
            }
        }
    }

    fn emit(&self, node: NodeId, on_output: &mut impl FnMut(&[u8], u64)) {
        for output in self.automaton.outputs_of(node) {
            on_output(output.content(), self.position);
        }
    }
}

/// Run `automaton` over `input` from a fresh state and collect every match.
pub fn walk(automaton: &Automaton, input: &[u8]) -> Vec<(Vec<u8>, u64)> {
    let mut matches = Vec::new();
    Walker::new(automaton).feed(input, |content, position| {
        matches.push((content.to_vec(), position));
    });
    matches
}
