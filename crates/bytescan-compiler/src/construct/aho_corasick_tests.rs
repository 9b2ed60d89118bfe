use bytescan_core::Target;

use super::*;
use crate::test_utils::{CLASSIC, expected, matches};

#[test]
fn classic_ushers() {
    let automaton = build(CLASSIC);

    assert_eq!(
        matches(&automaton, "ushers"),
        expected(&[("he", 4), ("she", 4), ("hers", 6)])
    );
}

#[test]
fn suffix_outputs_follow_own_outputs() {
    let automaton = build(CLASSIC);
    let mut order = Vec::new();
    bytescan_core::graph::Walker::new(&automaton).feed(b"she", |content, _| {
        order.push(content.to_vec());
    });

    assert_eq!(order, vec![b"she".to_vec(), b"he".to_vec()]);
}

#[test]
fn overlapping_repeats() {
    let automaton = build(["aa"]);

    assert_eq!(
        matches(&automaton, "aaaa"),
        expected(&[("aa", 2), ("aa", 3), ("aa", 4)])
    );
}

#[test]
fn no_patterns() {
    let automaton = build(Vec::<&[u8]>::new());

    assert_eq!(automaton.node_count(), 1);
    assert_eq!(automaton.output_count(), 0);
    assert!(matches(&automaton, "anything at all").is_empty());
}

#[test]
fn empty_pattern_is_ignored() {
    let automaton = build(["", "ab"]);

    assert_eq!(automaton.output_count(), 1);
    assert_eq!(matches(&automaton, "xab"), expected(&[("ab", 3)]));
}

#[test]
fn whole_input_match() {
    let automaton = build(["needle"]);

    assert_eq!(matches(&automaton, "needle"), expected(&[("needle", 6)]));
}

#[test]
fn duplicate_patterns_chain() {
    let automaton = AhoCorasick::new()
        .content(ContentKind::Index)
        .build(["ab", "ab"]);

    let found = bytescan_core::graph::walk(&automaton, b"ab");

    assert_eq!(
        found,
        vec![(0u32.to_le_bytes().to_vec(), 2), (1u32.to_le_bytes().to_vec(), 2)]
    );
}

#[test]
fn length_content() {
    let automaton = AhoCorasick::new()
        .content(ContentKind::Length)
        .build(["abc"]);

    let found = bytescan_core::graph::walk(&automaton, b"zabc");

    assert_eq!(found, vec![(3u32.to_le_bytes().to_vec(), 4)]);
    assert_eq!(
        automaton.metadata().get(OUTPUT_TYPE_KEY).map(String::as_str),
        Some("length")
    );
}

#[test]
fn caller_content() {
    let automaton = AhoCorasick::build_with_content([("cat", "feline"), ("dog", "canine")]);

    let found = bytescan_core::graph::walk(&automaton, b"hotdog");

    assert_eq!(found, vec![(b"canine".to_vec(), 6)]);
    assert!(automaton.metadata().is_empty());
}

#[test]
fn binary_patterns() {
    let automaton = build([[0u8, 255].as_slice(), &[255, 0]]);

    let found = bytescan_core::graph::walk(&automaton, &[0, 255, 0]);

    assert_eq!(found, vec![(vec![0, 255], 2), (vec![255, 0], 3)]);
}

#[test]
fn failure_links() {
    let automaton = build(CLASSIC);
    let root = automaton.start();

    assert_eq!(automaton.node(root).default_target(), Some(Target::advancing(root)));
    assert!(automaton.no_advance_no_output());
    for id in automaton.node_ids().filter(|&id| id != root) {
        let default = automaton.node(id).default_target().unwrap();
        assert!(!default.advance, "{id} default should not advance");
    }
}

#[test]
fn construction_is_deterministic() {
    assert_eq!(build(CLASSIC), build(CLASSIC));
}

#[test]
fn trie_edges_are_left_unmerged() {
    let automaton = build(CLASSIC);

    for id in automaton.node_ids() {
        for edge in automaton.node(id).edges() {
            assert!(edge.advance(), "{id}: trie edges consume their byte");
            assert!(!edge.is_bitmap());
            assert_eq!(edge.len(), 1, "{id}: one byte per trie edge");
        }
    }
    // The edge pass belongs to the optimizer; a fresh trie has nothing to merge.
    let mut optimized = automaton.clone();
    assert_eq!(crate::optimize::optimize_edges(&mut optimized), 0);
    assert_eq!(optimized, automaton);
}
