//! Optimization passes over the intermediate graph.
//!
//! Passes run in a fixed order: edge optimization, output deduplication,
//! then non-advancing edge translation. Each pass is idempotent and may be
//! skipped without changing what the automaton matches.

mod dedup;
mod edges;
mod nonadvancing;

#[cfg(test)]
mod dedup_tests;

pub use dedup::deduplicate_outputs;
pub use edges::{optimize_edges, optimize_node};
pub use nonadvancing::{NonAdvancingMode, translate_nonadvancing};

use bytescan_core::Automaton;
use bytescan_core::graph::Compaction;

/// Which passes to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub edges: bool,
    pub dedup: bool,
    pub nonadvancing: NonAdvancingMode,
    /// Drop unreachable nodes and outputs afterwards.
    pub compact: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            edges: true,
            dedup: true,
            nonadvancing: NonAdvancingMode::None,
            compact: false,
        }
    }
}

impl OptimizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// No passes at all.
    pub fn none() -> Self {
        Self {
            edges: false,
            dedup: false,
            nonadvancing: NonAdvancingMode::None,
            compact: false,
        }
    }

    pub fn edges(mut self, value: bool) -> Self {
        self.edges = value;
        self
    }

    pub fn dedup(mut self, value: bool) -> Self {
        self.dedup = value;
        self
    }

    pub fn nonadvancing(mut self, mode: NonAdvancingMode) -> Self {
        self.nonadvancing = mode;
        self
    }

    pub fn compact(mut self, value: bool) -> Self {
        self.compact = value;
        self
    }
}

/// What each pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    pub nodes_changed: usize,
    pub outputs_removed: usize,
    pub edges_translated: usize,
    pub compaction: Compaction,
}

/// Run the selected passes in order.
pub fn run(automaton: &mut Automaton, options: &OptimizeOptions) -> OptimizeReport {
    let mut report = OptimizeReport::default();

    if options.edges {
        report.nodes_changed = optimize_edges(automaton);
        log::debug!("edge optimization: {} nodes changed", report.nodes_changed);
    }
    if options.dedup {
        report.outputs_removed = deduplicate_outputs(automaton);
        log::debug!("output deduplication: {} outputs removed", report.outputs_removed);
    }
    if options.nonadvancing != NonAdvancingMode::None {
        report.edges_translated = translate_nonadvancing(automaton, options.nonadvancing);
        log::debug!(
            "non-advancing translation ({:?}): {} rewrites",
            options.nonadvancing,
            report.edges_translated
        );
    }
    if options.compact {
        report.compaction = automaton.retain_reachable();
        log::debug!(
            "compaction: {} nodes and {} outputs dropped",
            report.compaction.nodes,
            report.compaction.outputs
        );
    }

    report
}
