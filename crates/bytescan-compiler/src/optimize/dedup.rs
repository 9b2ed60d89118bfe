//! Output deduplication.
//!
//! Outputs with equal content and equal `next` link are interchangeable.
//! Each pass maps every duplicate to the first equal output and redirects all
//! references. Merging can make earlier outputs equal (their `next` links now
//! agree), so passes repeat until one merges nothing.

use std::collections::HashMap;

use bytescan_core::{Automaton, OutputId};

/// Merge structurally equal outputs; returns how many were removed.
pub fn deduplicate_outputs(automaton: &mut Automaton) -> usize {
    let mut removed = 0;
    loop {
        let mut survivors: HashMap<(&[u8], Option<OutputId>), OutputId> = HashMap::new();
        let mut redirect: HashMap<OutputId, OutputId> = HashMap::new();
        for id in automaton.output_ids() {
            let output = automaton.output(id);
            let survivor = *survivors.entry((output.content(), output.next())).or_insert(id);
            if survivor != id {
                redirect.insert(id, survivor);
            }
        }

        if redirect.is_empty() {
            return removed;
        }
        removed += automaton.redirect_outputs(&redirect);
    }
}
