use crate::GraphError;
use crate::bits::Bitmap256;
use crate::graph::{Automaton, Edge, Target};

#[test]
fn roundtrip_preserves_bitmaps_and_cycles() {
    let mut a = Automaton::new();
    let start = a.start();
    let x = a.add_node();
    let digits: Bitmap256 = (b'0'..=b'9').collect();
    a.node_mut(start).push_edge(Edge::from_bitmap(x, true, digits));
    a.node_mut(x).set_default(Some(Target::non_advancing(start)));
    let tail = a.add_output("digit", None);
    let head = a.add_output("number", Some(tail));
    a.node_mut(x).set_first_output(Some(head));

    let decoded = Automaton::from_binary(&a.to_binary()).unwrap();

    assert_eq!(decoded, a);
    assert!(decoded.node(start).edges()[0].is_bitmap());
}

#[test]
fn binary_is_smaller_than_json() {
    let mut a = Automaton::new();
    let start = a.start();
    for c in b'a'..=b'z' {
        let n = a.add_node();
        a.create_edge(start, n).add_trigger(c);
    }

    assert!(a.to_binary().len() < a.to_json().len());
}

#[test]
fn rejects_truncated_input() {
    let bytes = Automaton::new().to_binary();
    let err = Automaton::from_binary(&bytes[..bytes.len() - 1]).unwrap_err();

    assert!(matches!(err, GraphError::Binary(_)));
}
