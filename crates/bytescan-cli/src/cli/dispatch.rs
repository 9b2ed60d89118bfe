//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs populated from clap, with option names still as strings
//! - `from_matches()` extractors
//! - `From<*Params>` impls mapping names onto library types for the handlers

use std::path::PathBuf;

use bytescan_bytecode::{ByteOrder, IdWidth};
use bytescan_compiler::{ContentKind, EmitConfig, NonAdvancingMode, OptimizeOptions};
use clap::ArgMatches;

use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::{ExecArgs, OutputType, Record};
use crate::commands::files::GraphFormat;
use crate::commands::generate::GenerateArgs;
use crate::commands::optimize::OptimizeArgs;

pub struct GenerateParams {
    pub patterns: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub content: String,
    pub hex: bool,
    pub format: String,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            patterns: m.get_one::<PathBuf>("patterns").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            content: get_string(m, "content"),
            hex: m.get_flag("hex"),
            format: get_string(m, "format"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            patterns: p.patterns,
            output: p.output,
            content: parse_content(&p.content),
            hex: p.hex,
            format: GraphFormat::from_name(&p.format),
        }
    }
}

/// Pass selection shared by `optimize` and `compile`.
pub struct PassParams {
    pub translate: String,
    pub no_edges: bool,
    pub no_dedup: bool,
    pub compact: bool,
}

impl PassParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            translate: get_string(m, "translate"),
            no_edges: m.get_flag("no_edges"),
            no_dedup: m.get_flag("no_dedup"),
            // compile has no --compact; emit skips unreachable records anyway.
            compact: m
                .try_get_one::<bool>("compact")
                .ok()
                .flatten()
                .copied()
                .unwrap_or(false),
        }
    }
}

impl From<PassParams> for OptimizeOptions {
    fn from(p: PassParams) -> Self {
        OptimizeOptions::new()
            .edges(!p.no_edges)
            .dedup(!p.no_dedup)
            .nonadvancing(parse_translate(&p.translate))
            .compact(p.compact)
    }
}

pub struct OptimizeParams {
    pub graph: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub passes: PassParams,
    pub format: String,
}

impl OptimizeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph: m.get_one::<PathBuf>("graph").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            passes: PassParams::from_matches(m),
            format: get_string(m, "format"),
        }
    }
}

impl From<OptimizeParams> for OptimizeArgs {
    fn from(p: OptimizeParams) -> Self {
        Self {
            graph: p.graph,
            output: p.output,
            options: p.passes.into(),
            format: GraphFormat::from_name(&p.format),
        }
    }
}

pub struct CompileParams {
    pub graph: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub passes: PassParams,
    pub id_width: String,
    pub align: usize,
    pub high_node_weight: f64,
    pub byte_order: String,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph: m.get_one::<PathBuf>("graph").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            passes: PassParams::from_matches(m),
            id_width: get_string(m, "id_width"),
            align: m.get_one::<usize>("align").copied().unwrap_or(1),
            high_node_weight: m.get_one::<f64>("high_node_weight").copied().unwrap_or(1.0),
            byte_order: get_string(m, "byte_order"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        let config = EmitConfig::new()
            .id_width(parse_id_width(&p.id_width))
            .align_to(p.align)
            .high_node_weight(p.high_node_weight)
            .byte_order(parse_byte_order(&p.byte_order));
        Self {
            graph: p.graph,
            output: p.output,
            options: p.passes.into(),
            config,
        }
    }
}

pub struct ExecParams {
    pub automaton: PathBuf,
    pub input: Option<PathBuf>,
    pub output_type: String,
    pub record: String,
    pub block_size: u64,
    pub trace: bool,
    pub list_outputs: bool,
    pub max_hops: Option<u64>,
    pub foreign: bool,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            automaton: m.get_one::<PathBuf>("automaton").cloned().unwrap_or_default(),
            input: m.get_one::<PathBuf>("input").cloned(),
            output_type: get_string(m, "type"),
            record: get_string(m, "record"),
            block_size: m.get_one::<u64>("block_size").copied().unwrap_or(1024),
            trace: m.get_flag("trace"),
            list_outputs: m.get_flag("list_outputs"),
            max_hops: m.get_one::<u64>("max_hops").copied(),
            foreign: m.get_flag("foreign"),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        Self {
            automaton: p.automaton,
            input: p.input,
            output_type: OutputType::from_name(&p.output_type),
            record: Record::from_name(&p.record),
            block_size: usize::try_from(p.block_size).unwrap_or(usize::MAX),
            trace: p.trace,
            list_outputs: p.list_outputs,
            max_hops: p.max_hops,
            foreign: p.foreign,
        }
    }
}

pub struct DumpParams {
    pub automaton: PathBuf,
    pub foreign: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            automaton: m.get_one::<PathBuf>("automaton").cloned().unwrap_or_default(),
            foreign: m.get_flag("foreign"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            automaton: p.automaton,
            foreign: p.foreign,
        }
    }
}

fn get_string(m: &ArgMatches, id: &str) -> String {
    m.get_one::<String>(id).cloned().unwrap_or_default()
}

fn parse_content(name: &str) -> ContentKind {
    match name {
        "index" => ContentKind::Index,
        "length" => ContentKind::Length,
        _ => ContentKind::Pattern,
    }
}

fn parse_translate(name: &str) -> NonAdvancingMode {
    match name {
        "conservative" => NonAdvancingMode::Conservative,
        "aggressive" => NonAdvancingMode::Aggressive,
        "structural" => NonAdvancingMode::Structural,
        _ => NonAdvancingMode::None,
    }
}

/// `0` (or anything unrecognized) picks the narrowest width.
fn parse_id_width(bytes: &str) -> Option<IdWidth> {
    bytes.parse().ok().and_then(IdWidth::from_bytes)
}

fn parse_byte_order(name: &str) -> ByteOrder {
    match name {
        "little" => ByteOrder::Little,
        "big" => ByteOrder::Big,
        _ => ByteOrder::native(),
    }
}
