//! The full pipeline: construction, optimization, encoding.

use bytescan_core::Automaton;

use crate::Result;
use crate::construct::AhoCorasick;
use crate::emit::{Compiled, EmitConfig, emit};
use crate::optimize::{self, OptimizeOptions};

/// Optimize `automaton` in place and encode it.
pub fn compile(
    automaton: &mut Automaton,
    options: &OptimizeOptions,
    config: &EmitConfig,
) -> Result<Compiled> {
    optimize::run(automaton, options);
    Ok(emit(automaton, config)?)
}

/// Build, optimize, and encode a matcher for `patterns`.
pub fn compile_patterns<I, P>(
    patterns: I,
    builder: &AhoCorasick,
    options: &OptimizeOptions,
    config: &EmitConfig,
) -> Result<Compiled>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut automaton = builder.build(patterns);
    compile(&mut automaton, options, config)
}

/// Read a graph in JSON interchange form, then optimize and encode it.
pub fn compile_json(json: &str, options: &OptimizeOptions, config: &EmitConfig) -> Result<Compiled> {
    let mut automaton = Automaton::from_json(json)?;
    compile(&mut automaton, options, config)
}
