//! Human-readable dump of a compiled buffer.
//!
//! Sections: the header, every node reachable from the entry in
//! breadth-first order, the output records in file order, and metadata.
//! Explicit transitions are grouped into byte ranges that share a target.

use std::collections::{HashSet, VecDeque};
use std::fmt::Write as _;

use crate::format::{Module, ModuleError, NodeRecord, Transition};

/// Disassemble `module`.
pub fn dump(module: &Module) -> Result<String, ModuleError> {
    let mut out = String::new();
    dump_header(&mut out, module);
    dump_nodes(&mut out, module)?;
    dump_outputs(&mut out, module)?;
    dump_metadata(&mut out, module)?;
    Ok(out)
}

fn dump_header(out: &mut String, module: &Module) {
    let h = module.header();
    writeln!(out, "[header]").unwrap();
    writeln!(out, "version = {}", h.version).unwrap();
    writeln!(out, "byte_order = {}", h.byte_order).unwrap();
    writeln!(out, "id_width = {}", h.id_width).unwrap();
    writeln!(out, "no_advance_no_output = {}", h.no_advance_no_output).unwrap();
    writeln!(out, "size = {}", h.total_size).unwrap();
    writeln!(out, "checksum = {:#010x}", h.checksum).unwrap();
    writeln!(out, "entry = @{}", h.entry).unwrap();
    writeln!(out, "nodes = {}", h.node_count).unwrap();
    writeln!(out, "outputs = {}", h.output_count).unwrap();
}

fn dump_nodes(out: &mut String, module: &Module) -> Result<(), ModuleError> {
    writeln!(out, "\n[nodes]").unwrap();

    let mut seen = HashSet::from([module.entry()]);
    let mut queue = VecDeque::from([module.entry()]);
    while let Some(offset) = queue.pop_front() {
        let node = module.node(offset)?;
        dump_node(out, &node)?;
        for next in node.successors() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    Ok(())
}

fn dump_node(out: &mut String, node: &NodeRecord<'_>) -> Result<(), ModuleError> {
    let kind = if node.is_high() { "high" } else { "low" };
    write!(out, "@{} {kind} degree={}", node.offset, node.degree()).unwrap();
    if let Some(output) = node.first_output {
        write!(out, " out=@{output}").unwrap();
    }
    if let Some(default) = node.default {
        write!(out, " default={}", transition_label(default)).unwrap();
    }
    out.push('\n');

    let mut run: Option<(u8, u8, Transition)> = None;
    for c in 0..=255u8 {
        let Some(t) = node.explicit(c)? else {
            flush_run(out, run.take());
            continue;
        };
        run = match run {
            Some((lo, _, prev)) if prev == t => Some((lo, c, t)),
            other => {
                flush_run(out, other);
                Some((c, c, t))
            }
        };
    }
    flush_run(out, run);
    Ok(())
}

fn flush_run(out: &mut String, run: Option<(u8, u8, Transition)>) {
    let Some((lo, hi, t)) = run else {
        return;
    };
    if lo == hi {
        writeln!(out, "  {} -> {}", byte_label(lo), transition_label(t)).unwrap();
    } else {
        writeln!(out, "  {}..{} -> {}", byte_label(lo), byte_label(hi), transition_label(t)).unwrap();
    }
}

fn dump_outputs(out: &mut String, module: &Module) -> Result<(), ModuleError> {
    writeln!(out, "\n[outputs]").unwrap();
    for record in module.outputs()? {
        write!(out, "@{} {:?}", record.offset, String::from_utf8_lossy(record.content)).unwrap();
        if let Some(next) = record.next {
            write!(out, " next=@{next}").unwrap();
        }
        out.push('\n');
    }
    Ok(())
}

fn dump_metadata(out: &mut String, module: &Module) -> Result<(), ModuleError> {
    let pairs = module.metadata()?;
    if pairs.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n[metadata]").unwrap();
    for (key, value) in pairs {
        writeln!(out, "{key} = {value:?}").unwrap();
    }
    Ok(())
}

pub fn transition_label(t: Transition) -> String {
    if t.advance {
        format!("@{}", t.target)
    } else {
        format!("@{} (stay)", t.target)
    }
}

/// Quoted printable ASCII, hex otherwise.
pub fn byte_label(c: u8) -> String {
    if c.is_ascii_graphic() {
        format!("'{}'", c as char)
    } else {
        format!("{c:#04x}")
    }
}
