use std::ops::ControlFlow;

use bytescan_compiler::emit::emit;
use bytescan_compiler::{AhoCorasick, EmitConfig, OptimizeOptions, compile_patterns};
use bytescan_core::{Automaton, Target};

use super::{Engine, PrintTracer};

fn trace(engine: &Engine, input: &[u8]) -> Vec<String> {
    let mut tracer = PrintTracer::new();
    engine
        .scan_with(&mut engine.start(), input, |_, _| ControlFlow::Continue(()), &mut tracer)
        .unwrap();
    tracer.into_lines()
}

#[test]
fn transitions_and_matches() {
    let compiled = compile_patterns(["ab"], &AhoCorasick::new(), &OptimizeOptions::new(), &EmitConfig::new()).unwrap();
    let engine = Engine::open(&compiled.bytes).unwrap();

    let lines = trace(&engine, b"xab");

    assert_eq!(lines.len(), 4, "{lines:#?}");
    assert_eq!(lines[0], "@64 'x' -> @64");
    assert!(lines[1].starts_with("@64 'a' -> @"));
    assert!(lines[2].contains(" 'b' -> @"));
    assert!(lines[3].starts_with("  match \"ab\" at 3 (@"));
}

#[test]
fn skipped_bytes_and_stays() {
    let mut a = Automaton::new();
    let root = a.start();
    let x = a.add_node();
    a.create_edge(root, x).add_trigger(b'a');
    a.node_mut(x).set_default(Some(Target::non_advancing(root)));
    let out = a.add_output("a", None);
    a.node_mut(x).set_first_output(Some(out));
    a.set_no_advance_no_output(true);
    let engine = Engine::open(&emit(&a, &EmitConfig::new()).unwrap().bytes).unwrap();
    let x_offset = engine.module().node(64).unwrap().successors()[0];

    let lines = trace(&engine, b"a\n");

    assert_eq!(
        lines,
        vec![
            format!("@64 'a' -> @{x_offset}"),
            format!("  match \"a\" at 1 (@{x_offset})"),
            format!("@{x_offset} 0x0a -> @64 (stay)"),
            "@64 0x0a skipped".to_owned(),
        ]
    );
}

#[test]
fn tracing_does_not_change_matches() {
    let compiled = compile_patterns(["he", "she"], &AhoCorasick::new(), &OptimizeOptions::new(), &EmitConfig::new()).unwrap();
    let engine = Engine::open(&compiled.bytes).unwrap();
    let mut traced = Vec::new();

    engine
        .scan_with(
            &mut engine.start(),
            b"ushe",
            |content, position| {
                traced.push((content.to_vec(), position));
                ControlFlow::Continue(())
            },
            &mut PrintTracer::new(),
        )
        .unwrap();

    assert_eq!(traced, engine.find_all(b"ushe").unwrap());
}
