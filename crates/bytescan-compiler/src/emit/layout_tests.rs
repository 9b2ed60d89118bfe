use bytescan_bytecode::IdWidth;
use bytescan_bytecode::format::HEADER_SIZE;
use bytescan_core::{Automaton, Target};

use super::layout::Layout;
use super::{EmitConfig, EmitError};
use crate::construct::build;
use crate::test_utils::CLASSIC;

/// `count` distinct three-letter words.
fn words(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let b = i as u8;
            String::from_utf8(vec![b'a' + b % 26, b'a' + (b / 26) % 26, b'q']).unwrap()
        })
        .collect()
}

#[test]
fn entry_is_first_record() {
    let a = build(CLASSIC);

    let layout = Layout::compute(&a, &EmitConfig::new()).unwrap();

    assert_eq!(layout.nodes[0].0, a.start());
    assert_eq!(layout.node_offset(a.start()), HEADER_SIZE as u64);
    assert_eq!(layout.nodes.len(), a.node_count());
    assert_eq!(layout.outputs.len(), a.output_count());
}

#[test]
fn narrowest_width_that_fits() {
    let small = build(CLASSIC);
    let large = build(words(120));

    assert_eq!(Layout::compute(&small, &EmitConfig::new()).unwrap().width, IdWidth::U8);
    let layout = Layout::compute(&large, &EmitConfig::new()).unwrap();
    assert_eq!(layout.width, IdWidth::U16);
    assert!(layout.total_size > 256);
}

#[test]
fn fixed_width_too_small() {
    let large = build(words(120));
    let config = EmitConfig::new().id_width(Some(IdWidth::U8));

    let err = Layout::compute(&large, &config).unwrap_err();

    assert!(matches!(err, EmitError::IdWidthTooSmall { width: IdWidth::U8, .. }));
}

#[test]
fn fixed_width_wider_than_needed() {
    let a = build(CLASSIC);
    let config = EmitConfig::new().id_width(Some(IdWidth::U32));

    assert_eq!(Layout::compute(&a, &config).unwrap().width, IdWidth::U32);
}

#[test]
fn alignment_pads_node_records() {
    let a = build(CLASSIC);
    let config = EmitConfig::new().align_to(8);

    let layout = Layout::compute(&a, &config).unwrap();

    for (id, _) in &layout.nodes {
        assert_eq!(layout.node_offset(*id) % 8, 0, "{id}");
    }
    assert!(layout.padding > 0);
}

#[test]
fn alignment_must_be_power_of_two() {
    let a = build(CLASSIC);

    let err = Layout::compute(&a, &EmitConfig::new().align_to(3)).unwrap_err();

    assert_eq!(err, EmitError::InvalidAlignment(3));
}

#[test]
fn unreachable_records_are_skipped() {
    let mut a = Automaton::new();
    let root = a.start();
    a.node_mut(root).set_default(Some(Target::advancing(root)));
    let orphan = a.add_node();
    let out = a.add_output("never", None);
    a.node_mut(orphan).set_first_output(Some(out));

    let layout = Layout::compute(&a, &EmitConfig::new()).unwrap();

    assert_eq!(layout.nodes.len(), 1);
    assert!(layout.outputs.is_empty());
    assert_eq!(layout.metadata_offset, None);
}

#[test]
fn metadata_follows_outputs() {
    let a = build(CLASSIC);

    let layout = Layout::compute(&a, &EmitConfig::new()).unwrap();

    let metadata = layout.metadata_offset.unwrap();
    assert!(metadata > layout.outputs_offset);
    assert!(metadata < layout.total_size);
}
