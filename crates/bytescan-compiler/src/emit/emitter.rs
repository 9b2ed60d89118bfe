//! Buffer assembly.

use bytescan_bytecode::format::{HEADER_SIZE, write_metadata, write_output};
use bytescan_bytecode::{Header, Writer};
use bytescan_core::Automaton;

use super::layout::Layout;
use super::verify::verify;
use super::{CompileStats, EmitConfig, EmitError};

/// An encoded automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compiled {
    pub bytes: Vec<u8>,
    pub stats: CompileStats,
}

/// Encode an optimized automaton.
///
/// Nothing is returned unless the whole buffer was written.
pub fn emit(automaton: &Automaton, config: &EmitConfig) -> Result<Compiled, EmitError> {
    verify(automaton)?;
    let layout = Layout::compute(automaton, config)?;
    let width = layout.width;

    let mut stats = CompileStats {
        bytes: layout.total_size as usize,
        id_width: width,
        padding: layout.padding,
        low_nodes: 0,
        low_bytes: 0,
        high_nodes: 0,
        high_bytes: 0,
        outputs: layout.outputs.len(),
        output_bytes: 0,
        metadata_bytes: 0,
    };

    let mut w = Writer::with_capacity(config.byte_order, layout.total_size as usize);
    w.zeroes(HEADER_SIZE);

    for (id, plan) in &layout.nodes {
        w.pad_to(config.align_to);
        debug_assert_eq!(w.len() as u64, layout.node_offset(*id));
        let record = plan.encode(|n| layout.node_offset(n), |o| layout.output_offset(o));
        let start = w.len();
        record.write(&mut w, width)?;
        let len = w.len() - start;
        if plan.is_high() {
            stats.high_nodes += 1;
            stats.high_bytes += len;
        } else {
            stats.low_nodes += 1;
            stats.low_bytes += len;
        }
    }

    let outputs_start = w.len();
    debug_assert_eq!(outputs_start as u64, layout.outputs_offset);
    for &id in &layout.outputs {
        let output = automaton.output(id);
        let next = output.next().map(|n| layout.output_offset(n));
        write_output(&mut w, output.content(), next, width)?;
    }
    stats.output_bytes = w.len() - outputs_start;

    if let Some(offset) = layout.metadata_offset {
        debug_assert_eq!(w.len() as u64, offset);
        let pairs = automaton.metadata().iter().map(|(k, v)| (k.as_str(), v.as_str()));
        write_metadata(&mut w, pairs);
        stats.metadata_bytes = w.len() - offset as usize;
    }

    let mut header = Header::new(config.byte_order, width);
    header.no_advance_no_output = automaton.no_advance_no_output();
    header.entry = layout.node_offset(automaton.start());
    header.node_count = layout.nodes.len() as u64;
    header.output_count = layout.outputs.len() as u64;
    header.outputs_offset = layout.outputs_offset;
    header.metadata_offset = layout.metadata_offset.unwrap_or(0);

    let mut bytes = w.into_inner();
    debug_assert_eq!(bytes.len() as u64, layout.total_size);
    header.seal(&mut bytes);

    log::debug!(
        "encoded {} nodes ({} high) and {} outputs into {} bytes with {width} ids",
        layout.nodes.len(),
        stats.high_nodes,
        stats.outputs,
        stats.bytes
    );
    Ok(Compiled { bytes, stats })
}
