//! Byte-at-a-time interpreter over a loaded buffer.

use std::ops::ControlFlow;

use bytescan_bytecode::{LoadOptions, Module, ModuleError};

use super::error::RuntimeError;
use super::state::{ScanOutcome, ScanState};
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for scanning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanLimits {
    /// Maximum non-advancing hops on one byte (default: node count + 1).
    pub(crate) max_hops_per_byte: Option<u64>,
}

impl ScanLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_hops_per_byte(mut self, hops: u64) -> Self {
        self.max_hops_per_byte = Some(hops);
        self
    }

    pub fn get_max_hops_per_byte(&self) -> Option<u64> {
        self.max_hops_per_byte
    }

    /// A well-formed buffer never needs more hops than it has nodes.
    fn hop_limit(&self, module: &Module) -> u64 {
        self.max_hops_per_byte
            .unwrap_or_else(|| module.header().node_count.saturating_add(1))
    }
}

/// A compiled automaton ready to scan.
#[derive(Clone, Debug)]
pub struct Engine {
    module: Module,
    limits: ScanLimits,
}

impl Engine {
    /// Load a buffer written in the host byte order.
    pub fn open(bytes: &[u8]) -> Result<Self, ModuleError> {
        Self::open_with(bytes, LoadOptions::default())
    }

    pub fn open_with(bytes: &[u8], options: LoadOptions) -> Result<Self, ModuleError> {
        let module = Module::load_with(bytes, options)?;
        log::debug!(
            "loaded {} bytes: {} nodes, {} outputs, {} ids",
            module.header().total_size,
            module.header().node_count,
            module.header().output_count,
            module.header().id_width
        );
        Ok(Self::from_module(module))
    }

    pub fn from_module(module: Module) -> Self {
        Self {
            module,
            limits: ScanLimits::default(),
        }
    }

    pub fn limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// A fresh state positioned at the entry node.
    pub fn start(&self) -> ScanState {
        ScanState::new(self.module.entry())
    }

    pub fn metadata(&self) -> Result<Vec<(&str, &str)>, ModuleError> {
        self.module.metadata()
    }

    pub fn metadata_value(&self, key: &str) -> Result<Option<&str>, ModuleError> {
        self.module.metadata_value(key)
    }

    /// Scan `input`, calling `on_match(content, end_position)` for every
    /// fired output.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn scan<F>(
        &self,
        state: &mut ScanState,
        input: &[u8],
        on_match: F,
    ) -> Result<ScanOutcome, RuntimeError>
    where
        F: FnMut(&[u8], u64) -> ControlFlow<()>,
    {
        self.scan_with(state, input, on_match, &mut NoopTracer)
    }

    /// Scan `input` and report every transition to `tracer`.
    ///
    /// When the callback breaks, the outputs after the one that stopped the
    /// scan are not reported, and the state is left where resuming with the
    /// unconsumed rest of the chunk continues the scan.
    pub fn scan_with<F, T>(
        &self,
        state: &mut ScanState,
        input: &[u8],
        mut on_match: F,
        tracer: &mut T,
    ) -> Result<ScanOutcome, RuntimeError>
    where
        F: FnMut(&[u8], u64) -> ControlFlow<()>,
        T: Tracer,
    {
        let mut node = self.module.node(state.node)?;
        if !state.started {
            state.started = true;
            if self
                .fire(state.node, node.first_output, state.position, &mut on_match, tracer)?
                .is_break()
            {
                return Ok(ScanOutcome::Stopped { consumed: 0 });
            }
        }

        let quiet_stay = self.module.no_advance_no_output();
        let hop_limit = self.limits.hop_limit(&self.module);
        for (i, &c) in input.iter().enumerate() {
            let mut hops = 0;
            loop {
                let Some(t) = node.transition(c)? else {
                    tracer.trace_no_transition(state.node, c);
                    state.position += 1;
                    break;
                };
                tracer.trace_transition(state.node, c, t);
                node = self.module.node(t.target)?;
                state.node = t.target;
                if t.advance {
                    state.position += 1;
                }

                if (t.advance || !quiet_stay)
                    && self
                        .fire(state.node, node.first_output, state.position, &mut on_match, tracer)?
                        .is_break()
                {
                    let consumed = if t.advance { i + 1 } else { i };
                    return Ok(ScanOutcome::Stopped { consumed });
                }

                if t.advance {
                    break;
                }
                hops += 1;
                if hops > hop_limit {
                    return Err(RuntimeError::HopLimitExceeded {
                        position: state.position,
                        byte: c,
                        hops,
                    });
                }
            }
        }
        Ok(ScanOutcome::Exhausted)
    }

    /// Scan `input` from a fresh state and collect every match.
    pub fn find_all(&self, input: &[u8]) -> Result<Vec<(Vec<u8>, u64)>, RuntimeError> {
        let mut matches = Vec::new();
        self.scan(&mut self.start(), input, |content, position| {
            matches.push((content.to_vec(), position));
            ControlFlow::Continue(())
        })?;
        Ok(matches)
    }

    fn fire<F, T>(
        &self,
        node: u64,
        first: Option<u64>,
        position: u64,
        on_match: &mut F,
        tracer: &mut T,
    ) -> Result<ControlFlow<()>, RuntimeError>
    where
        F: FnMut(&[u8], u64) -> ControlFlow<()>,
        T: Tracer,
    {
        for output in self.module.output_chain(first) {
            let output = output?;
            tracer.trace_output(node, output.content, position);
            if on_match(output.content, position).is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}
