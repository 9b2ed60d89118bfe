use bytescan_core::{Automaton, Target};

use super::{EmitError, verify};
use crate::construct::build;
use crate::test_utils::CLASSIC;

#[test]
fn constructed_automaton_passes() {
    assert_eq!(verify(&build(CLASSIC)), Ok(()));
}

#[test]
fn epsilon_edge() {
    let mut a = Automaton::new();
    let root = a.start();
    let x = a.add_node();
    a.create_edge(root, x);

    assert_eq!(verify(&a), Err(EmitError::EpsilonEdge { node: root }));
}

#[test]
fn two_edges_on_one_byte() {
    let mut a = Automaton::new();
    let root = a.start();
    let x = a.add_node();
    let y = a.add_node();
    a.create_edge(root, x).add_trigger(b'k');
    a.create_edge(root, y).add_trigger(b'k');

    assert_eq!(
        verify(&a),
        Err(EmitError::NonDeterministic {
            node: root,
            byte: b'k'
        })
    );
}

#[test]
fn non_advancing_cycle() {
    let mut a = Automaton::new();
    let root = a.start();
    let x = a.add_node();
    a.node_mut(root).set_default(Some(Target::non_advancing(x)));
    a.node_mut(x).set_default(Some(Target::non_advancing(root)));

    let err = verify(&a).unwrap_err();

    assert!(matches!(err, EmitError::NonAdvancingCycle { byte: 0, .. }));
}

#[test]
fn non_advancing_chain_without_cycle() {
    let mut a = Automaton::new();
    let root = a.start();
    let x = a.add_node();
    a.node_mut(root).set_default(Some(Target::non_advancing(x)));
    a.node_mut(x).set_default(Some(Target::advancing(root)));

    assert_eq!(verify(&a), Ok(()));
}
