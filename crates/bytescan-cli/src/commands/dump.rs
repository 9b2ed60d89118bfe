use std::io::Write;
use std::path::PathBuf;

use bytescan_bytecode::dump;
use bytescan_vm::{LoadOptions, Module};

use super::files::read_all;
use super::{CliError, Result};

pub struct DumpArgs {
    pub automaton: PathBuf,
    pub foreign: bool,
}

pub fn run(args: DumpArgs, out: &mut dyn Write) -> Result<()> {
    let bytes = read_all(Some(args.automaton.as_path()))?;
    let options = LoadOptions {
        allow_foreign_byte_order: args.foreign,
    };
    let module = Module::load_with(&bytes, options)?;
    write!(out, "{}", dump(&module)?).map_err(CliError::Write)
}
