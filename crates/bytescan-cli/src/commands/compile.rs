use std::io::Write;
use std::path::PathBuf;

use bytescan_compiler::{EmitConfig, OptimizeOptions, compile};

use super::files::{load_graph, read_all, write_output};
use super::{CliError, Result};

pub struct CompileArgs {
    pub graph: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub options: OptimizeOptions,
    pub config: EmitConfig,
}

/// Default output path: the graph path with an `.e` extension.
pub fn default_output(graph: Option<&PathBuf>) -> Option<PathBuf> {
    graph
        .filter(|p| p.as_os_str() != "-")
        .map(|p| p.with_extension("e"))
}

pub fn run(args: CompileArgs, out: &mut dyn Write) -> Result<()> {
    let mut automaton = load_graph(&read_all(args.graph.as_deref())?)?;
    let compiled = compile(&mut automaton, &args.options, &args.config)?;

    let output = args.output.or_else(|| default_output(args.graph.as_ref()));
    write_output(output.as_deref(), &compiled.bytes, out)?;

    // Stats go to stdout only when the buffer did not.
    match output.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            writeln!(out, "wrote {}", path.display()).map_err(CliError::Write)?;
            writeln!(out, "{}", compiled.stats).map_err(CliError::Write)
        }
        None => {
            eprintln!("{}", compiled.stats);
            Ok(())
        }
    }
}
