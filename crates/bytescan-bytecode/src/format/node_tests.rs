use bytescan_core::Bitmap256;

use super::*;

const AT: u64 = 4;

/// Write `node` at offset `AT` and check the length it claims.
fn encode(node: &NodeEncoding, width: IdWidth, order: ByteOrder) -> Vec<u8> {
    let mut w = Writer::new(order);
    w.zeroes(AT as usize);
    node.write(&mut w, width).unwrap();
    assert_eq!(w.len() - AT as usize, node.encoded_len(width));
    w.into_inner()
}

fn low_edge(byte: u8, target: u64, advance: bool) -> LowEdge {
    LowEdge {
        byte,
        target,
        advance,
    }
}

#[test]
fn low_node_lookup() {
    let node = NodeEncoding::Low(LowNode {
        first_output: Some(900),
        default: Some(Transition::new(64, false)),
        edges: vec![
            low_edge(b'a', 100, true),
            low_edge(b'c', 200, false),
            low_edge(b'z', 300, true),
        ],
    });
    let bytes = encode(&node, IdWidth::U16, ByteOrder::Big);

    let record = NodeRecord::decode(&bytes, AT, IdWidth::U16, ByteOrder::Big).unwrap();

    assert!(!record.is_high());
    assert_eq!(record.first_output, Some(900));
    assert_eq!(record.degree(), 3);
    assert_eq!(record.transition(b'a').unwrap(), Some(Transition::new(100, true)));
    assert_eq!(record.transition(b'c').unwrap(), Some(Transition::new(200, false)));
    assert_eq!(record.transition(b'z').unwrap(), Some(Transition::new(300, true)));
    assert_eq!(record.explicit(b'b').unwrap(), None);
    assert_eq!(record.transition(b'b').unwrap(), Some(Transition::new(64, false)));
    assert_eq!(record.successors(), vec![64, 100, 200, 300]);
}

#[test]
fn low_node_all_advancing_omits_advance_bits() {
    let edges = vec![low_edge(b'x', 10, true)];
    let with_bits = LowNode {
        edges: vec![low_edge(b'x', 10, false)],
        ..LowNode::default()
    };
    let without_bits = LowNode {
        edges,
        ..LowNode::default()
    };

    assert_eq!(
        with_bits.encoded_len(IdWidth::U8),
        without_bits.encoded_len(IdWidth::U8) + 1
    );
}

#[test]
fn leaf_node_is_one_byte() {
    let node = NodeEncoding::Low(LowNode::default());
    let bytes = encode(&node, IdWidth::U64, ByteOrder::Little);

    assert_eq!(bytes.len(), AT as usize + 1);
    let record = NodeRecord::decode(&bytes, AT, IdWidth::U64, ByteOrder::Little).unwrap();
    assert_eq!(record.transition(0).unwrap(), None);
    assert!(record.successors().is_empty());
}

#[test]
fn high_node_with_sparse_table() {
    let explicit: Bitmap256 = [b'0', b'5', b'a'].into_iter().collect();
    let advance: Bitmap256 = [b'0', b'a'].into_iter().collect();
    let node = NodeEncoding::High(HighNode {
        first_output: None,
        default: Some(Transition::new(64, true)),
        advance: Some(advance),
        explicit: Some(explicit),
        runs: None,
        targets: vec![11, 22, 33],
    });
    let bytes = encode(&node, IdWidth::U8, ByteOrder::Little);

    let record = NodeRecord::decode(&bytes, AT, IdWidth::U8, ByteOrder::Little).unwrap();

    assert!(record.is_high());
    assert_eq!(record.degree(), 3);
    assert_eq!(record.transition(b'0').unwrap(), Some(Transition::new(11, true)));
    assert_eq!(record.transition(b'5').unwrap(), Some(Transition::new(22, false)));
    assert_eq!(record.transition(b'a').unwrap(), Some(Transition::new(33, true)));
    assert_eq!(record.transition(b'b').unwrap(), Some(Transition::new(64, true)));
}

#[test]
fn high_node_with_runs() {
    // '0'..='9' and 'A' -> 7, 'a'..='z' -> 8
    let explicit: Bitmap256 = (b'0'..=b'9').chain([b'A']).chain(b'a'..=b'z').collect();
    let runs: Bitmap256 = [b'a'].into_iter().collect();
    let node = NodeEncoding::High(HighNode {
        explicit: Some(explicit),
        runs: Some(runs),
        targets: vec![7, 8],
        ..HighNode::default()
    });
    let bytes = encode(&node, IdWidth::U32, ByteOrder::Big);

    let record = NodeRecord::decode(&bytes, AT, IdWidth::U32, ByteOrder::Big).unwrap();

    assert_eq!(record.transition(b'0').unwrap(), Some(Transition::new(7, true)));
    assert_eq!(record.transition(b'9').unwrap(), Some(Transition::new(7, true)));
    assert_eq!(record.transition(b'A').unwrap(), Some(Transition::new(7, true)));
    assert_eq!(record.transition(b'm').unwrap(), Some(Transition::new(8, true)));
    assert_eq!(record.transition(b'B').unwrap(), None);
    assert_eq!(record.successors(), vec![7, 8]);
}

#[test]
fn high_node_full_table() {
    let targets: Vec<u64> = (0..256).map(|c| 1000 + c).collect();
    let node = NodeEncoding::High(HighNode {
        targets,
        ..HighNode::default()
    });
    let bytes = encode(&node, IdWidth::U16, ByteOrder::Little);

    let record = NodeRecord::decode(&bytes, AT, IdWidth::U16, ByteOrder::Little).unwrap();

    assert_eq!(record.degree(), 256);
    assert_eq!(record.transition(0).unwrap(), Some(Transition::new(1000, true)));
    assert_eq!(record.transition(255).unwrap(), Some(Transition::new(1255, true)));
}

#[test]
fn unknown_kind() {
    let bytes = [0u8, 0, 0, 0, 0b10];
    let err = NodeRecord::decode(&bytes, AT, IdWidth::U8, ByteOrder::Little).unwrap_err();
    assert_eq!(err, ModuleError::UnknownNodeKind { offset: AT, kind: 2 });
}

#[test]
fn truncated_node() {
    let node = NodeEncoding::Low(LowNode {
        edges: vec![low_edge(b'a', 5, true), low_edge(b'b', 6, true)],
        ..LowNode::default()
    });
    let mut bytes = encode(&node, IdWidth::U8, ByteOrder::Little);
    bytes.pop();

    let err = NodeRecord::decode(&bytes, AT, IdWidth::U8, ByteOrder::Little).unwrap_err();
    assert!(matches!(err, ModuleError::Truncated { .. }));
}

#[test]
fn offset_outside_buffer() {
    let err = NodeRecord::decode(&[0u8; 8], 8, IdWidth::U8, ByteOrder::Little).unwrap_err();
    assert!(matches!(err, ModuleError::OffsetOutOfRange { what: "node", .. }));
}
