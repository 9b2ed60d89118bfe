//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Raise log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log pass results (-v) or everything (-vv)")
}

/// Patterns file, one pattern per line (positional).
pub fn patterns_path_arg() -> Arg {
    Arg::new("patterns")
        .value_name("PATTERNS")
        .value_parser(value_parser!(PathBuf))
        .help("Patterns file, one per line (\"-\" or omitted for stdin)")
}

/// Intermediate graph file (positional).
pub fn graph_path_arg() -> Arg {
    Arg::new("graph")
        .value_name("GRAPH")
        .value_parser(value_parser!(PathBuf))
        .help("Intermediate graph, JSON or binary (\"-\" or omitted for stdin)")
}

/// Compiled automaton file (positional, required).
pub fn automaton_path_arg() -> Arg {
    Arg::new("automaton")
        .value_name("AUTOMATON")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Compiled automaton")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file instead of stdout")
}

/// Graph serialization (--format).
pub fn graph_format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("json")
        .value_parser(["json", "binary"])
        .help("Graph output format")
}

/// Output content of constructed patterns (--content).
pub fn content_arg() -> Arg {
    Arg::new("content")
        .long("content")
        .value_name("KIND")
        .default_value("pattern")
        .value_parser(["pattern", "index", "length"])
        .help("What each output holds: pattern bytes, pattern index, or pattern length")
}

/// Interpret pattern lines as hex (--hex).
pub fn hex_arg() -> Arg {
    Arg::new("hex")
        .long("hex")
        .action(ArgAction::SetTrue)
        .help("Patterns are hex-encoded bytes")
}

/// Non-advancing translation mode (-t/--translate).
pub fn translate_arg() -> Arg {
    Arg::new("translate")
        .short('t')
        .long("translate")
        .value_name("MODE")
        .default_value("none")
        .value_parser(["none", "conservative", "aggressive", "structural"])
        .help("Non-advancing edge translation")
}

/// Skip edge optimization (--no-edges).
pub fn no_edges_arg() -> Arg {
    Arg::new("no_edges")
        .long("no-edges")
        .action(ArgAction::SetTrue)
        .help("Skip edge optimization")
}

/// Skip output deduplication (--no-dedup).
pub fn no_dedup_arg() -> Arg {
    Arg::new("no_dedup")
        .long("no-dedup")
        .action(ArgAction::SetTrue)
        .help("Skip output deduplication")
}

/// Drop unreachable nodes and outputs (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Drop nodes and outputs unreachable from the start node")
}

/// Fixed id width in bytes (-w/--id-width).
pub fn id_width_arg() -> Arg {
    Arg::new("id_width")
        .short('w')
        .long("id-width")
        .value_name("BYTES")
        .default_value("0")
        .value_parser(["0", "1", "2", "4", "8"])
        .help("Id width in bytes; 0 picks the smallest that fits")
}

/// Node record alignment (-a/--align).
pub fn align_arg() -> Arg {
    Arg::new("align")
        .short('a')
        .long("align")
        .value_name("BYTES")
        .default_value("1")
        .value_parser(value_parser!(usize))
        .help("Align node records to multiples of this many bytes")
}

/// Cost multiplier for high-degree records (--high-node-weight).
pub fn high_node_weight_arg() -> Arg {
    Arg::new("high_node_weight")
        .long("high-node-weight")
        .value_name("WEIGHT")
        .default_value("1.0")
        .value_parser(value_parser!(f64))
        .help("Multiplier on high-degree record cost; above 1 favors low-degree records")
}

/// Byte order of the compiled buffer (--byte-order).
pub fn byte_order_arg() -> Arg {
    Arg::new("byte_order")
        .long("byte-order")
        .value_name("ORDER")
        .default_value("native")
        .value_parser(["native", "little", "big"])
        .help("Byte order of the compiled buffer")
}

/// Accept buffers of the other byte order (--foreign).
pub fn foreign_arg() -> Arg {
    Arg::new("foreign")
        .long("foreign")
        .action(ArgAction::SetTrue)
        .help("Accept automata written in the other byte order")
}

/// Input to scan (-i/--input).
pub fn input_file_arg() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Input to scan (default: stdin)")
}

/// How output content is rendered (--type).
pub fn output_type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .default_value("auto")
        .value_parser(["auto", "string", "length", "integer", "nop"])
        .help("Output content type; auto reads the automaton's Output-Type")
}

/// How matches are reported (-r/--record).
pub fn record_arg() -> Arg {
    Arg::new("record")
        .short('r')
        .long("record")
        .value_name("RECORD")
        .default_value("list")
        .value_parser(["list", "count", "json", "nop"])
        .help("Match report: one line per match, counts per output, JSON lines, or nothing")
}

/// Chunk size for scanning (-s/--block-size).
pub fn block_size_arg() -> Arg {
    Arg::new("block_size")
        .short('s')
        .long("block-size")
        .value_name("BYTES")
        .default_value("1024")
        .value_parser(value_parser!(u64).range(1..))
        .help("Feed the input to the engine in chunks of this size")
}

/// Print every transition (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print every transition to stderr")
}

/// List the automaton's outputs and exit (-L/--list-outputs).
pub fn list_outputs_arg() -> Arg {
    Arg::new("list_outputs")
        .short('L')
        .long("list-outputs")
        .action(ArgAction::SetTrue)
        .help("List every output of the automaton and exit")
}

/// Hop limit per byte (--max-hops).
pub fn max_hops_arg() -> Arg {
    Arg::new("max_hops")
        .long("max-hops")
        .value_name("N")
        .value_parser(value_parser!(u64))
        .help("Non-advancing hops allowed per byte (default: node count + 1)")
}
