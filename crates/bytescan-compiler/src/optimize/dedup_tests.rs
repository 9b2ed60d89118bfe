use bytescan_core::Automaton;

use super::*;
use crate::construct::AhoCorasick;
use crate::test_utils::matches;

#[test]
fn merges_equal_outputs() {
    let mut a = Automaton::new();
    let first = a.add_node();
    let second = a.add_node();
    let x1 = a.add_output("X", None);
    let x2 = a.add_output("X", None);
    a.node_mut(first).set_first_output(Some(x1));
    a.node_mut(second).set_first_output(Some(x2));

    assert_eq!(deduplicate_outputs(&mut a), 1);

    assert_eq!(a.output_count(), 1);
    assert_eq!(a.node(first).first_output(), a.node(second).first_output());
}

#[test]
fn different_next_is_not_equal() {
    let mut a = Automaton::new();
    let tail = a.add_output("T", None);
    let with_tail = a.add_output("X", Some(tail));
    let bare = a.add_output("X", None);
    let n1 = a.add_node();
    let n2 = a.add_node();
    a.node_mut(n1).set_first_output(Some(with_tail));
    a.node_mut(n2).set_first_output(Some(bare));

    assert_eq!(deduplicate_outputs(&mut a), 0);
    assert_eq!(a.output_count(), 3);
}

#[test]
fn merges_cascade() {
    // Two chains "X" -> "T" with separate "T" records collapse to one chain.
    let mut a = Automaton::new();
    let t1 = a.add_output("T", None);
    let t2 = a.add_output("T", None);
    let x1 = a.add_output("X", Some(t1));
    let x2 = a.add_output("X", Some(t2));
    let n1 = a.add_node();
    let n2 = a.add_node();
    a.node_mut(n1).set_first_output(Some(x1));
    a.node_mut(n2).set_first_output(Some(x2));

    assert_eq!(deduplicate_outputs(&mut a), 2);

    assert_eq!(a.output_count(), 2);
    let head = a.node(n1).first_output().unwrap();
    assert_eq!(a.node(n2).first_output(), Some(head));
    let contents: Vec<&[u8]> = a.output_chain(Some(head)).map(|o| o.content()).collect();
    assert_eq!(contents, vec![b"X".as_slice(), b"T".as_slice()]);
}

#[test]
fn idempotent_and_preserves_matches() {
    let mut a = AhoCorasick::build_with_content([("one", "N"), ("two", "N"), ("three", "N")]);
    let before = matches(&a, "one two three");
    let count = a.output_count();

    let removed = deduplicate_outputs(&mut a);

    assert_eq!(removed, 2);
    assert_eq!(a.output_count(), count - 2);
    assert_eq!(deduplicate_outputs(&mut a), 0);
    assert_eq!(matches(&a, "one two three"), before);
}
