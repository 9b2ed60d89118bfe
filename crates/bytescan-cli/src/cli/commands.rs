//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! The stages chain through files: `generate` and `optimize` write graphs,
//! `compile` writes automata, `exec` and `dump` read them.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("bytescan")
        .about("Build, compile, and run byte-pattern automata")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(optimize_command())
        .subcommand(compile_command())
        .subcommand(exec_command())
        .subcommand(dump_command())
}

/// Build an Aho-Corasick graph from patterns.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Build an Aho-Corasick graph from a patterns file")
        .override_usage(
            "\
  bytescan generate [PATTERNS] [-o <FILE>]
  bytescan generate --hex [PATTERNS] --content index",
        )
        .after_help(
            r#"EXAMPLES:
  bytescan generate words.txt -o words.json      # one pattern per line
  bytescan generate --hex sigs.txt --content index
  cat words.txt | bytescan generate --format binary -o words.graph"#,
        )
        .arg(patterns_path_arg())
        .arg(output_file_arg())
        .arg(content_arg())
        .arg(hex_arg())
        .arg(graph_format_arg())
}

/// Run optimization passes on a graph.
pub fn optimize_command() -> Command {
    Command::new("optimize")
        .about("Run optimization passes on an intermediate graph")
        .after_help(
            r#"EXAMPLES:
  bytescan optimize words.json -o words.opt.json
  bytescan optimize words.json -t aggressive --compact"#,
        )
        .arg(graph_path_arg())
        .arg(output_file_arg())
        .arg(translate_arg())
        .arg(no_edges_arg())
        .arg(no_dedup_arg())
        .arg(compact_arg())
        .arg(graph_format_arg())
}

/// Encode a graph into a compiled automaton.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Optimize and encode a graph into a compiled automaton")
        .after_help(
            r#"EXAMPLES:
  bytescan compile words.json -o words.e
  bytescan compile words.json -t conservative -w 4 -a 8
  bytescan compile words.json --byte-order big -o words.be.e"#,
        )
        .arg(graph_path_arg())
        .arg(output_file_arg())
        .arg(translate_arg())
        .arg(no_edges_arg())
        .arg(no_dedup_arg())
        .arg(id_width_arg())
        .arg(align_arg())
        .arg(high_node_weight_arg())
        .arg(byte_order_arg())
}

/// Scan input with a compiled automaton.
pub fn exec_command() -> Command {
    Command::new("exec")
        .about("Scan input with a compiled automaton")
        .after_help(
            r#"EXAMPLES:
  bytescan exec words.e -i corpus.txt             # one line per match
  bytescan exec words.e -i corpus.txt -r count    # matches per output
  bytescan exec words.e --type length < corpus.txt
  bytescan exec words.e -L                        # list outputs"#,
        )
        .arg(automaton_path_arg())
        .arg(input_file_arg())
        .arg(output_type_arg())
        .arg(record_arg())
        .arg(block_size_arg())
        .arg(trace_arg())
        .arg(list_outputs_arg())
        .arg(max_hops_arg())
        .arg(foreign_arg())
}

/// Disassemble a compiled automaton.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the records of a compiled automaton")
        .arg(automaton_path_arg())
        .arg(foreign_arg())
}
