mod cli;
mod commands;

use std::io::{self, Write};
use std::process;

use cli::{CompileParams, DumpParams, ExecParams, GenerateParams, OptimizeParams, build_cli};
use log::LevelFilter;

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let result = match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into(), &mut out)
        }
        Some(("optimize", m)) => {
            let params = OptimizeParams::from_matches(m);
            commands::optimize::run(params.into(), &mut out)
        }
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into(), &mut out)
        }
        Some(("exec", m)) => {
            let params = ExecParams::from_matches(m);
            commands::exec::run(params.into(), &mut out)
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into(), &mut out)
        }
        _ => unreachable!("clap should have caught this"),
    };

    let result = result.and_then(|()| out.flush().map_err(commands::CliError::Write));
    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Warnings by default; `-v` for debug, `-vv` for trace. `RUST_LOG`
/// overrides both.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
