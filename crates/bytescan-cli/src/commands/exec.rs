//! Running a compiled matcher over input.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use bytescan_compiler::construct::OUTPUT_TYPE_KEY;
use bytescan_vm::{
    Engine, LoadOptions, NoopTracer, PrintTracer, ScanLimits, ScanOutcome, Tracer,
};
use serde::Serialize;

use super::files::{read_all, read_input};
use super::{CliError, Result};

/// How output content is turned into text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputType {
    /// Read the matcher's `Output-Type` metadata, else `String`.
    #[default]
    Auto,
    String,
    /// Content is a little-endian `u32` length; the matched input is shown.
    Length,
    /// Content is a little-endian `u32`.
    Integer,
    /// Content is ignored.
    Nop,
}

impl OutputType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "length" => Self::Length,
            "integer" => Self::Integer,
            "nop" => Self::Nop,
            _ => Self::Auto,
        }
    }

    fn resolve(self, engine: &Engine) -> Result<Self> {
        if self != Self::Auto {
            return Ok(self);
        }
        let declared = engine.metadata_value(OUTPUT_TYPE_KEY)?;
        log::debug!("output type from metadata: {declared:?}");
        Ok(match declared {
            Some("length") => Self::Length,
            Some("integer") => Self::Integer,
            _ => Self::String,
        })
    }

    /// Text for a match of `content` ending at `position` in `input`.
    pub(super) fn render(self, content: &[u8], position: u64, input: &[u8]) -> Result<String> {
        match self {
            Self::Auto | Self::String => Ok(content.escape_ascii().to_string()),
            Self::Integer => Ok(read_u32(content, "integer")?.to_string()),
            Self::Length => {
                let len = read_u32(content, "length")? as usize;
                let end = usize::try_from(position).unwrap_or(usize::MAX).min(input.len());
                let start = end.saturating_sub(len);
                Ok(input[start..end].escape_ascii().to_string())
            }
            Self::Nop => Ok(String::new()),
        }
    }

    /// Text for an output record on its own, without input.
    pub(super) fn describe(self, content: &[u8]) -> Result<String> {
        match self {
            Self::Length => Ok(read_u32(content, "length")?.to_string()),
            other => other.render(content, 0, &[]),
        }
    }
}

fn read_u32(content: &[u8], kind: &'static str) -> Result<u32> {
    let bytes: [u8; 4] = content.try_into().map_err(|_| CliError::OutputContent {
        kind,
        len: content.len(),
    })?;
    Ok(u32::from_le_bytes(bytes))
}

/// What is done with each match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Record {
    /// One line per match: position and text.
    #[default]
    List,
    /// Match counts per text, printed after the scan.
    Count,
    /// One JSON object per line.
    Json,
    /// Matches are scanned for but not printed.
    Nop,
}

impl Record {
    pub fn from_name(name: &str) -> Self {
        match name {
            "count" => Self::Count,
            "json" => Self::Json,
            "nop" => Self::Nop,
            _ => Self::List,
        }
    }
}

#[derive(Serialize)]
struct MatchLine<'a> {
    position: u64,
    output: &'a str,
}

pub struct ExecArgs {
    pub automaton: PathBuf,
    pub input: Option<PathBuf>,
    pub output_type: OutputType,
    pub record: Record,
    pub block_size: usize,
    pub trace: bool,
    pub list_outputs: bool,
    pub max_hops: Option<u64>,
    pub foreign: bool,
}

pub fn run(args: ExecArgs, out: &mut dyn Write) -> Result<()> {
    let bytes = read_all(Some(args.automaton.as_path()))?;
    let options = LoadOptions {
        allow_foreign_byte_order: args.foreign,
    };
    let mut limits = ScanLimits::new();
    if let Some(hops) = args.max_hops {
        limits = limits.max_hops_per_byte(hops);
    }
    let engine = Engine::open_with(&bytes, options)?.limits(limits);
    let output_type = args.output_type.resolve(&engine)?;

    if args.list_outputs {
        return list_outputs(&engine, output_type, out);
    }

    let input = read_input(args.input.as_deref())?;
    let mut recorder = Recorder::new(args.record, output_type, out);

    if args.trace {
        let mut tracer = PrintTracer::new();
        let result = scan_all(&engine, &input, args.block_size, &mut recorder, &mut tracer);
        let mut stderr = io::stderr().lock();
        for line in tracer.lines() {
            // Tracing is best effort; a closed stderr is not an error.
            let _ = writeln!(stderr, "{line}");
        }
        result?;
    } else {
        scan_all(&engine, &input, args.block_size, &mut recorder, &mut NoopTracer)?;
    }
    recorder.finish()
}

/// Scan `input` in blocks of `block_size` bytes, carrying state across
/// blocks.
fn scan_all<T: Tracer>(
    engine: &Engine,
    input: &[u8],
    block_size: usize,
    recorder: &mut Recorder<'_>,
    tracer: &mut T,
) -> Result<()> {
    let mut state = engine.start();
    // The empty block fires entry outputs even for empty input.
    let blocks = std::iter::once(&input[..0]).chain(input.chunks(block_size.max(1)));
    for block in blocks {
        let outcome = engine.scan_with(
            &mut state,
            block,
            |content, position| recorder.record(content, position, input),
            tracer,
        )?;
        if let ScanOutcome::Stopped { .. } = outcome {
            break;
        }
    }
    recorder.take_error()
}

struct Recorder<'w> {
    record: Record,
    output_type: OutputType,
    out: &'w mut dyn Write,
    counts: BTreeMap<String, u64>,
    error: Option<CliError>,
}

impl<'w> Recorder<'w> {
    fn new(record: Record, output_type: OutputType, out: &'w mut dyn Write) -> Self {
        Self {
            record,
            output_type,
            out,
            counts: BTreeMap::new(),
            error: None,
        }
    }

    /// Record one match; breaks the scan on the first failure.
    fn record(&mut self, content: &[u8], position: u64, input: &[u8]) -> ControlFlow<()> {
        match self.try_record(content, position, input) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }

    fn try_record(&mut self, content: &[u8], position: u64, input: &[u8]) -> Result<()> {
        if self.record == Record::Nop {
            return Ok(());
        }
        let text = self.output_type.render(content, position, input)?;
        match self.record {
            Record::List => writeln!(self.out, "{position:>8}: {text}").map_err(CliError::Write),
            Record::Count => {
                *self.counts.entry(text).or_default() += 1;
                Ok(())
            }
            Record::Json => {
                let line = MatchLine {
                    position,
                    output: &text,
                };
                serde_json::to_writer(&mut *self.out, &line)?;
                writeln!(self.out).map_err(CliError::Write)
            }
            Record::Nop => Ok(()),
        }
    }

    fn take_error(&mut self) -> Result<()> {
        self.error.take().map_or(Ok(()), Err)
    }

    fn finish(self) -> Result<()> {
        for (text, count) in &self.counts {
            writeln!(self.out, "{text:>20} {count}").map_err(CliError::Write)?;
        }
        self.out.flush().map_err(CliError::Write)
    }
}

fn list_outputs(engine: &Engine, output_type: OutputType, out: &mut dyn Write) -> Result<()> {
    for output in engine.module().outputs()? {
        let text = output_type.describe(output.content)?;
        writeln!(out, "{:>8}: {text}", output.offset).map_err(CliError::Write)?;
    }
    Ok(())
}
