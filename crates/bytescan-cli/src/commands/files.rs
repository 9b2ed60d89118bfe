//! Reading inputs and writing outputs.
//!
//! A path of `-` (or no path) means stdin for inputs and stdout for
//! outputs. Scan inputs read from files are memory-mapped.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::ops::Deref;
use std::path::Path;

use bytescan_core::Automaton;
use memmap2::Mmap;

use super::{CliError, Result};

/// Serialized form of an intermediate graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GraphFormat {
    #[default]
    Json,
    Binary,
}

impl GraphFormat {
    pub fn from_name(name: &str) -> Self {
        match name {
            "binary" => Self::Binary,
            _ => Self::Json,
        }
    }
}

/// Input bytes, mapped or read into memory.
pub enum Input {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Input {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => map,
            Self::Owned(bytes) => bytes,
        }
    }
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf).map_err(CliError::Stdin)?;
    Ok(buf)
}

/// Read a whole file, or stdin.
pub fn read_all(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if !is_stdin(Some(path)) => fs::read(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        _ => read_stdin(),
    }
}

/// Map a file for scanning, or read stdin.
pub fn read_input(path: Option<&Path>) -> Result<Input> {
    let Some(path) = path.filter(|p| p.as_os_str() != "-") else {
        return read_stdin().map(Input::Owned);
    };
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    if file.metadata().map_err(read_error)?.len() == 0 {
        return Ok(Input::Owned(Vec::new()));
    }
    // SAFETY: the mapping is read-only and the file is assumed not to be
    // modified while it is scanned.
    let map = unsafe { Mmap::map(&file) }.map_err(read_error)?;
    Ok(Input::Mapped(map))
}

/// Write `bytes` to `path`, or to `out` when there is no path.
pub fn write_output(path: Option<&Path>, bytes: &[u8], out: &mut dyn Write) -> Result<()> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::write(path, bytes).map_err(CliError::Write),
        _ => out.write_all(bytes).map_err(CliError::Write),
    }
}

/// Parse a graph in either serialized form.
///
/// JSON documents start with `{`; anything else is read as binary.
pub fn load_graph(bytes: &[u8]) -> Result<Automaton> {
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'{') {
        let text = std::str::from_utf8(bytes).map_err(CliError::GraphText)?;
        Ok(Automaton::from_json(text)?)
    } else {
        Ok(Automaton::from_binary(bytes)?)
    }
}

pub fn save_graph(automaton: &Automaton, format: GraphFormat) -> Vec<u8> {
    match format {
        GraphFormat::Json => {
            let mut text = automaton.to_json();
            text.push('\n');
            text.into_bytes()
        }
        GraphFormat::Binary => automaton.to_binary(),
    }
}
