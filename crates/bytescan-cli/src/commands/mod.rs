pub mod compile;
pub mod dump;
pub mod exec;
pub mod files;
pub mod generate;
pub mod optimize;


use std::io;
use std::path::PathBuf;

use bytescan_core::GraphError;
use bytescan_vm::{ModuleError, RuntimeError};

/// Errors reported by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("failed to write output: {0}")]
    Write(io::Error),

    #[error("graph is neither JSON nor binary: {0}")]
    GraphText(std::str::Utf8Error),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Compile(#[from] bytescan_compiler::Error),

    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("line {line}: {reason}")]
    InvalidPattern { line: usize, reason: &'static str },

    #[error("{kind} outputs hold 4 bytes, found {len}")]
    OutputContent { kind: &'static str, len: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
