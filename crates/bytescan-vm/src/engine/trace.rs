//! Tracing of scan execution.
//!
//! `NoopTracer` methods are `#[inline(always)]` empty functions, so a scan
//! without tracing pays nothing for the hooks. `PrintTracer` collects one
//! line per event for the CLI `--trace` flag and for tests.

use bytescan_bytecode::Transition;
use bytescan_bytecode::dump::{byte_label, transition_label};

/// Tracer trait for scan instrumentation.
///
/// Node arguments are record offsets, as in a dump of the same buffer.
pub trait Tracer {
    /// Called when `node` has a transition on `byte`.
    fn trace_transition(&mut self, node: u64, byte: u8, to: Transition);

    /// Called when `node` has no transition on `byte` and the byte is skipped.
    fn trace_no_transition(&mut self, node: u64, byte: u8);

    /// Called for every fired output, before the match callback.
    fn trace_output(&mut self, node: u64, content: &[u8], position: u64);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_transition(&mut self, _node: u64, _byte: u8, _to: Transition) {}

    #[inline(always)]
    fn trace_no_transition(&mut self, _node: u64, _byte: u8) {}

    #[inline(always)]
    fn trace_output(&mut self, _node: u64, _content: &[u8], _position: u64) {}
}

/// Tracer that collects a human-readable trace.
#[derive(Debug, Default)]
pub struct PrintTracer {
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Tracer for PrintTracer {
    fn trace_transition(&mut self, node: u64, byte: u8, to: Transition) {
        self.lines
            .push(format!("@{node} {} -> {}", byte_label(byte), transition_label(to)));
    }

    fn trace_no_transition(&mut self, node: u64, byte: u8) {
        self.lines.push(format!("@{node} {} skipped", byte_label(byte)));
    }

    fn trace_output(&mut self, node: u64, content: &[u8], position: u64) {
        self.lines.push(format!(
            "  match {:?} at {position} (@{node})",
            String::from_utf8_lossy(content)
        ));
    }
}
