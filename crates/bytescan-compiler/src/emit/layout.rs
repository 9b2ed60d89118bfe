//! Buffer layout.
//!
//! Nodes are placed in breadth-first order from the start node, so the entry
//! record comes first, each aligned to `align_to`. Output records reachable
//! from the placed nodes follow in pool order, then the metadata section.
//!
//! Record sizes depend on the id width and the id width depends on the total
//! size, so the layout is computed per candidate width and the narrowest
//! width whose largest offset fits is kept.

use std::collections::HashMap;

use bytescan_bytecode::format::{HEADER_SIZE, metadata_len, output_len, padding_for};
use bytescan_bytecode::IdWidth;
use bytescan_core::graph::breadth_first_order;
use bytescan_core::{Automaton, NodeId, OutputId};

use super::plan::NodePlan;
use super::{EmitConfig, EmitError};

/// Offsets of every record for one id width.
#[derive(Clone, Debug)]
pub struct Layout {
    pub width: IdWidth,
    /// Nodes in placement order, entry first.
    pub nodes: Vec<(NodeId, NodePlan)>,
    pub node_offsets: HashMap<NodeId, u64>,
    /// Reachable outputs in placement order.
    pub outputs: Vec<OutputId>,
    pub output_offsets: HashMap<OutputId, u64>,
    pub outputs_offset: u64,
    pub metadata_offset: Option<u64>,
    pub padding: usize,
    pub total_size: u64,
}

impl Layout {
    /// Lay out `automaton` with the configured or narrowest fitting width.
    pub fn compute(automaton: &Automaton, config: &EmitConfig) -> Result<Self, EmitError> {
        if !config.align_to.is_power_of_two() {
            return Err(EmitError::InvalidAlignment(config.align_to));
        }

        if let Some(width) = config.id_width {
            let layout = Self::for_width(automaton, config, width);
            if !width.fits(layout.total_size - 1) {
                return Err(EmitError::IdWidthTooSmall {
                    width,
                    needed: layout.total_size,
                });
            }
            return Ok(layout);
        }

        let mut needed = 0;
        for width in IdWidth::ALL {
            let layout = Self::for_width(automaton, config, width);
            if width.fits(layout.total_size - 1) {
                log::debug!("id width {width}: {} bytes", layout.total_size);
                return Ok(layout);
            }
            log::trace!("id width {width} too small for {} bytes", layout.total_size);
            needed = layout.total_size;
        }
        Err(EmitError::TooLarge { needed })
    }

    /// Lay out every record assuming ids of `width`.
    pub fn for_width(automaton: &Automaton, config: &EmitConfig, width: IdWidth) -> Self {
        let order = breadth_first_order(automaton, [automaton.start()]);

        let mut offset = HEADER_SIZE;
        let mut padding = 0;
        let mut nodes = Vec::with_capacity(order.len());
        let mut node_offsets = HashMap::with_capacity(order.len());
        for id in order {
            let plan = NodePlan::new(automaton.node(id), width, config.high_node_weight);
            let pad = padding_for(offset, config.align_to);
            padding += pad;
            offset += pad;
            node_offsets.insert(id, offset as u64);
            offset += plan.encoded_len(width);
            nodes.push((id, plan));
        }

        let mut live = vec![false; automaton.output_count()];
        for (_, plan) in &nodes {
            let mut next = plan.first_output;
            while let Some(id) = next {
                if live[id.index()] {
                    break;
                }
                live[id.index()] = true;
                next = automaton.output(id).next();
            }
        }

        let outputs_offset = offset as u64;
        let mut outputs = Vec::new();
        let mut output_offsets = HashMap::new();
        for id in automaton.output_ids().filter(|id| live[id.index()]) {
            output_offsets.insert(id, offset as u64);
            offset += output_len(automaton.output(id).content().len(), width);
            outputs.push(id);
        }

        let metadata_offset = if automaton.metadata().is_empty() {
            None
        } else {
            let at = offset as u64;
            offset += metadata_len(automaton.metadata().iter().map(|(k, v)| (k.as_str(), v.as_str())));
            Some(at)
        };

        Self {
            width,
            nodes,
            node_offsets,
            outputs,
            output_offsets,
            outputs_offset,
            metadata_offset,
            padding,
            total_size: offset as u64,
        }
    }

    pub fn node_offset(&self, id: NodeId) -> u64 {
        self.node_offsets[&id]
    }

    pub fn output_offset(&self, id: OutputId) -> u64 {
        self.output_offsets[&id]
    }
}
