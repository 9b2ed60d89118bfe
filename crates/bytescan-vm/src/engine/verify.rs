//! Whole-buffer verification.
//!
//! Scanning decodes records lazily and only reports a corrupt record when a
//! scan reaches it. Verification decodes every node reachable from the entry
//! and every output in their chains up front.

use std::collections::{HashSet, VecDeque};

use bytescan_bytecode::{Module, ModuleError};

/// What verification visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub nodes: usize,
    pub outputs: usize,
    /// Nodes encoded as high-degree records.
    pub high_nodes: usize,
}

/// Decode every reachable record; returns the first error found.
pub fn verify(module: &Module) -> Result<VerifyReport, ModuleError> {
    let mut report = VerifyReport::default();
    let mut outputs = HashSet::new();
    let mut seen = HashSet::from([module.entry()]);
    let mut queue = VecDeque::from([module.entry()]);

    while let Some(offset) = queue.pop_front() {
        let node = module.node(offset)?;
        report.nodes += 1;
        if node.is_high() {
            report.high_nodes += 1;
        }

        for c in 0..=255u8 {
            node.transition(c)?;
        }
        for output in module.output_chain(node.first_output) {
            outputs.insert(output?.offset);
        }
        for next in node.successors() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    report.outputs = outputs.len();
    log::debug!(
        "verified {} nodes and {} outputs",
        report.nodes,
        report.outputs
    );
    Ok(report)
}
