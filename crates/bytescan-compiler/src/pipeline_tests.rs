use bytescan_bytecode::{IdWidth, Module};
use bytescan_core::Automaton;
use indoc::indoc;

use crate::construct::{AhoCorasick, ContentKind, OUTPUT_TYPE_KEY, build};
use crate::test_utils::{CLASSIC, equivalent, expected, matches};
use crate::{EmitConfig, EmitError, Error, NonAdvancingMode, OptimizeOptions, compile, compile_json, compile_patterns};

#[test]
fn patterns_to_module() {
    let options = OptimizeOptions::new().nonadvancing(NonAdvancingMode::Conservative);

    let compiled = compile_patterns(CLASSIC, &AhoCorasick::new(), &options, &EmitConfig::new()).unwrap();
    let module = Module::load(&compiled.bytes).unwrap();

    assert_eq!(module.header().output_count, 4);
    assert_eq!(compiled.stats.bytes, compiled.bytes.len());
}

#[test]
fn compile_optimizes_in_place() {
    let mut a = build(CLASSIC);
    let options = OptimizeOptions::new().nonadvancing(NonAdvancingMode::Aggressive);

    let compiled = compile(&mut a, &options, &EmitConfig::new()).unwrap();
    let module = Module::load(&compiled.bytes).unwrap();

    assert_eq!(equivalent(&a, &module), Ok(()));
    assert_eq!(
        matches(&a, "ushers"),
        expected(&[("she", 4), ("he", 4), ("hers", 6)])
    );
}

#[test]
fn content_kind_reaches_metadata() {
    let builder = AhoCorasick::new().content(ContentKind::Length);

    let compiled = compile_patterns(["ab", "abc"], &builder, &OptimizeOptions::new(), &EmitConfig::new()).unwrap();
    let module = Module::load(&compiled.bytes).unwrap();

    assert_eq!(module.metadata_value(OUTPUT_TYPE_KEY).unwrap(), Some("length"));
}

#[test]
fn json_to_module() {
    let json = build(["abc", "bc"]).to_json();

    let compiled = compile_json(&json, &OptimizeOptions::new(), &EmitConfig::new()).unwrap();
    let module = Module::load(&compiled.bytes).unwrap();

    assert_eq!(module.header().output_count, 2);
    assert_eq!(module.header().id_width, IdWidth::U8);
}

#[test]
fn json_with_dangling_target() {
    let json = indoc! {r#"
        {
            "version": 1,
            "start": 0,
            "nodes": [{ "default": { "node": 9, "advance": true } }],
            "outputs": []
        }
    "#};

    let err = compile_json(json, &OptimizeOptions::new(), &EmitConfig::new()).unwrap_err();

    assert!(matches!(err, Error::Interchange(_)));
}

#[test]
fn json_that_is_not_json() {
    let err = compile_json("{ nodes", &OptimizeOptions::new(), &EmitConfig::new()).unwrap_err();

    assert!(matches!(err, Error::Interchange(_)));
}

#[test]
fn encoding_errors_surface() {
    let mut a = build((0..120).map(|i: u32| format!("{i:03}")));
    let config = EmitConfig::new().id_width(Some(IdWidth::U8));

    let err = compile(&mut a, &OptimizeOptions::new(), &config).unwrap_err();

    assert!(matches!(
        err,
        Error::Encode(EmitError::IdWidthTooSmall { width: IdWidth::U8, .. })
    ));
    assert!(err.to_string().starts_with("encoding failed: "));
}

#[test]
fn empty_graph_document() {
    let mut a = Automaton::new();

    let compiled = compile(&mut a, &OptimizeOptions::new(), &EmitConfig::new()).unwrap();
    let module = Module::load(&compiled.bytes).unwrap();

    assert_eq!(module.header().node_count, 1);
    assert!(module.metadata().unwrap().is_empty());
}
