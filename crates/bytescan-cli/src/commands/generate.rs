use std::io::Write;
use std::path::PathBuf;

use bytescan_compiler::{AhoCorasick, ContentKind};

use super::files::{GraphFormat, read_all, save_graph, write_output};
use super::{CliError, Result};

pub struct GenerateArgs {
    pub patterns: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub content: ContentKind,
    pub hex: bool,
    pub format: GraphFormat,
}

pub fn run(args: GenerateArgs, out: &mut dyn Write) -> Result<()> {
    let text = read_all(args.patterns.as_deref())?;
    let patterns = parse_patterns(&text, args.hex)?;

    let automaton = AhoCorasick::new().content(args.content).build(&patterns);
    log::debug!(
        "{} patterns: {} nodes, {} outputs",
        patterns.len(),
        automaton.node_count(),
        automaton.output_count()
    );

    write_output(args.output.as_deref(), &save_graph(&automaton, args.format), out)
}

/// One pattern per line; a trailing `\r` is dropped.
///
/// Blank lines are kept so pattern indices match line numbers; construction
/// skips them.
pub fn parse_patterns(text: &[u8], hex: bool) -> Result<Vec<Vec<u8>>> {
    let mut lines: Vec<&[u8]> = text.split(|&b| b == b'\n').collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if hex {
                decode_hex(line).map_err(|reason| CliError::InvalidPattern { line: i + 1, reason })
            } else {
                Ok(line.to_vec())
            }
        })
        .collect()
}

/// Hex digits, whitespace ignored.
fn decode_hex(line: &[u8]) -> std::result::Result<Vec<u8>, &'static str> {
    let digits: Vec<u8> = line
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| match b {
            b'0'..=b'9' => Ok(b - b'0'),
            b'a'..=b'f' => Ok(b - b'a' + 10),
            b'A'..=b'F' => Ok(b - b'A' + 10),
            _ => Err("invalid hex digit"),
        })
        .collect::<std::result::Result<_, _>>()?;
    if digits.len() % 2 != 0 {
        return Err("odd number of hex digits");
    }
    Ok(digits.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect())
}
