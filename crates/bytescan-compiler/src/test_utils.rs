//! Test helpers shared by the pass and encoder tests.

use bytescan_core::Automaton;
use bytescan_core::graph::walk;

use crate::construct::build;
use crate::optimize::{self, NonAdvancingMode, OptimizeOptions};

/// The classic Aho-Corasick example set.
pub const CLASSIC: [&str; 4] = ["he", "she", "his", "hers"];

/// Walk `input` and return `(content, position)` pairs with text content,
/// sorted so chain order does not matter.
pub fn matches(automaton: &Automaton, input: &str) -> Vec<(String, u64)> {
    let mut found: Vec<(String, u64)> = walk(automaton, input.as_bytes())
        .into_iter()
        .map(|(content, position)| (String::from_utf8_lossy(&content).into_owned(), position))
        .collect();
    found.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    found
}

/// Shorthand for expected match lists.
pub fn expected(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    let mut pairs: Vec<(String, u64)> = pairs.iter().map(|&(s, p)| (s.to_owned(), p)).collect();
    pairs.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// Build over `patterns` and run every pass with `mode`.
pub fn optimized(patterns: &[&str], mode: NonAdvancingMode) -> Automaton {
    let mut automaton = build(patterns);
    optimize::run(&mut automaton, &OptimizeOptions::new().nonadvancing(mode));
    automaton
}

/// Check that `module` encodes exactly the transitions and output chains of
/// `automaton`, node by node from the entry.
pub fn equivalent(automaton: &Automaton, module: &bytescan_bytecode::Module) -> Result<(), String> {
    use std::collections::{HashMap, VecDeque};

    let start = automaton.start();
    let mut offsets = HashMap::from([(start, module.entry())]);
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        let record = module.node(offsets[&id]).map_err(|e| e.to_string())?;

        let want: Vec<&[u8]> = automaton.outputs_of(id).map(|o| o.content()).collect();
        let got = module
            .output_chain(record.first_output)
            .map(|r| r.map(|r| r.content))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        if want != got {
            return Err(format!("{id}: outputs {want:?} encoded as {got:?}"));
        }

        for c in 0..=255u8 {
            let want = automaton.node(id).step(c);
            let got = record.transition(c).map_err(|e| e.to_string())?;
            match (want, got) {
                (None, None) => {}
                (Some(t), Some(g)) if t.advance == g.advance => match offsets.get(&t.node) {
                    Some(&offset) if offset == g.target => {}
                    Some(&offset) => {
                        return Err(format!("{id} on {c:#04x}: expected @{offset}, found @{}", g.target));
                    }
                    None => {
                        offsets.insert(t.node, g.target);
                        queue.push_back(t.node);
                    }
                },
                _ => return Err(format!("{id} on {c:#04x}: expected {want:?}, found {got:?}")),
            }
        }
    }
    Ok(())
}
