use std::io::Write;
use std::path::PathBuf;

use bytescan_compiler::OptimizeOptions;
use bytescan_compiler::optimize;

use super::Result;
use super::files::{GraphFormat, load_graph, read_all, save_graph, write_output};

pub struct OptimizeArgs {
    pub graph: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub options: OptimizeOptions,
    pub format: GraphFormat,
}

pub fn run(args: OptimizeArgs, out: &mut dyn Write) -> Result<()> {
    let mut automaton = load_graph(&read_all(args.graph.as_deref())?)?;

    let report = optimize::run(&mut automaton, &args.options);
    log::debug!(
        "{} nodes changed, {} outputs removed, {} edges translated",
        report.nodes_changed,
        report.outputs_removed,
        report.edges_translated
    );

    write_output(args.output.as_deref(), &save_graph(&automaton, args.format), out)
}
