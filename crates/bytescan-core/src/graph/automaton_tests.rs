use std::collections::HashMap;

use super::*;

#[test]
fn new_automaton_has_start_node() {
    let a = Automaton::new();

    assert_eq!(a.node_count(), 1);
    assert_eq!(a.output_count(), 0);
    assert_eq!(a.start().index(), 0);
    assert!(!a.no_advance_no_output());
    assert!(a.validate().is_ok());
}

#[test]
fn output_chain_follows_next_links() {
    let mut a = Automaton::new();
    let tail = a.add_output("he", None);
    let head = a.add_output("she", Some(tail));
    let start = a.start();
    a.node_mut(start).set_first_output(Some(head));

    let contents: Vec<&[u8]> = a.outputs_of(start).map(Output::content).collect();
    assert_eq!(contents, vec![&b"she"[..], &b"he"[..]]);
}

#[test]
fn output_chain_stops_on_cycle() {
    let mut a = Automaton::new();
    let x = a.add_output("x", None);
    let y = a.add_output("y", Some(x));
    a.output_mut(x).set_next(Some(y));

    assert_eq!(a.output_chain(Some(x)).count(), 2);
}

#[test]
fn redirect_outputs_renumbers_survivors() {
    let mut a = Automaton::new();
    let n1 = a.add_node();
    let n2 = a.add_node();
    let keep = a.add_output("X", None);
    let dup = a.add_output("X", None);
    let head = a.add_output("Y", Some(dup));
    a.node_mut(n1).set_first_output(Some(keep));
    a.node_mut(n2).set_first_output(Some(head));

    let removed = a.redirect_outputs(&HashMap::from([(dup, keep)]));

    assert_eq!(removed, 1);
    assert_eq!(a.output_count(), 2);
    let head = a.node(n2).first_output().unwrap();
    assert_eq!(a.output(head).content(), b"Y");
    assert_eq!(a.output(head).next(), a.node(n1).first_output());
    assert!(a.validate().is_ok());
}

#[test]
fn retain_reachable_drops_orphans() {
    let mut a = Automaton::new();
    let start = a.start();
    let orphan = a.add_node();
    let child = a.add_node();
    a.create_edge(start, child).add_trigger(b'a');
    a.node_mut(child).set_default(Some(Target::non_advancing(start)));

    let unused = a.add_output("gone", None);
    a.node_mut(orphan).set_first_output(Some(unused));
    let used = a.add_output("kept", None);
    a.node_mut(child).set_first_output(Some(used));

    let compaction = a.retain_reachable();

    assert_eq!(compaction, Compaction { nodes: 1, outputs: 1 });
    assert_eq!(a.node_count(), 2);
    assert_eq!(a.output_count(), 1);
    let child = a.node(a.start()).edges()[0].target();
    assert_eq!(child.index(), 1);
    assert_eq!(
        a.node(child).default_target(),
        Some(Target::non_advancing(a.start()))
    );
    assert_eq!(a.outputs_of(child).next().unwrap().content(), b"kept");
}

#[test]
fn validate_reports_dangling_references() {
    let mut a = Automaton::new();
    let other = a.add_node();
    let start = a.start();
    a.create_edge(start, other).add_trigger(b'a');
    let out = a.add_output("x", None);
    a.node_mut(other).set_first_output(Some(out));
    assert!(a.validate().is_ok());

    let mut broken = a.clone();
    broken.nodes.truncate(1);
    let err = broken.validate().unwrap_err();
    assert_eq!(err.to_string(), "node 0 refers to missing node 1");

    let mut broken = a.clone();
    broken.outputs.clear();
    let err = broken.validate().unwrap_err();
    assert_eq!(err.to_string(), "node 1 refers to missing output 0");
}

#[test]
fn metadata_keeps_insertion_order() {
    let mut a = Automaton::new();
    a.metadata_mut().insert("name".into(), "demo".into());
    a.metadata_mut().insert("author".into(), "ops".into());

    let keys: Vec<&str> = a.metadata().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "author"]);
}
