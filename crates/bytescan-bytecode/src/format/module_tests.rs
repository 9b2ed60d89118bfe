use super::*;

/// Two nodes: the entry moves to a leaf on 'a' and loops on anything else;
/// the leaf emits "A".
fn build(order: ByteOrder, metadata: &[(&str, &str)]) -> Vec<u8> {
    let width = IdWidth::U8;
    let entry = HEADER_SIZE as u64;
    let mut root = LowNode {
        first_output: None,
        default: Some(Transition::new(entry, true)),
        edges: vec![LowEdge {
            byte: b'a',
            target: 0,
            advance: true,
        }],
    };
    let leaf_at = entry + root.encoded_len(width) as u64;
    let mut leaf = LowNode::default();
    let outputs_at = leaf_at + 1 + width.bytes() as u64;
    root.edges[0].target = leaf_at;
    leaf.first_output = Some(outputs_at);

    let mut w = Writer::new(order);
    w.zeroes(HEADER_SIZE);
    NodeEncoding::Low(root).write(&mut w, width).unwrap();
    NodeEncoding::Low(leaf).write(&mut w, width).unwrap();
    assert_eq!(w.len() as u64, outputs_at);
    write_output(&mut w, b"A", None, width).unwrap();
    let metadata_at = if metadata.is_empty() {
        0
    } else {
        let at = w.len() as u64;
        write_metadata(&mut w, metadata.iter().copied());
        at
    };

    let mut header = Header::new(order, width);
    header.entry = entry;
    header.node_count = 2;
    header.output_count = 1;
    header.outputs_offset = outputs_at;
    header.metadata_offset = metadata_at;
    let mut buffer = w.into_inner();
    header.seal(&mut buffer);
    buffer
}

#[test]
fn loads_native_buffer() {
    let bytes = build(ByteOrder::native(), &[]);

    let module = Module::load(&bytes).unwrap();

    assert_eq!(module.entry(), HEADER_SIZE as u64);
    assert_eq!(module.header().node_count, 2);
    let root = module.node(module.entry()).unwrap();
    let leaf = root.transition(b'a').unwrap().unwrap();
    let outputs: Vec<_> = module
        .output_chain(module.node(leaf.target).unwrap().first_output)
        .map(|r| r.unwrap().content)
        .collect();
    assert_eq!(outputs, vec![b"A".as_slice()]);
}

#[test]
fn refuses_foreign_byte_order() {
    let host = ByteOrder::native();
    let bytes = build(host.opposite(), &[]);

    let err = Module::load(&bytes).unwrap_err();

    assert_eq!(
        err,
        ModuleError::EndiannessMismatch {
            buffer: host.opposite(),
            host
        }
    );
    assert!(err.to_string().starts_with("endianness mismatch"));
}

#[test]
fn foreign_byte_order_on_request() {
    let bytes = build(ByteOrder::native().opposite(), &[("kind", "pattern")]);
    let options = LoadOptions {
        allow_foreign_byte_order: true,
    };

    let module = Module::load_with(&bytes, options).unwrap();

    let root = module.node(module.entry()).unwrap();
    assert_eq!(root.transition(b'z').unwrap().unwrap().target, module.entry());
    assert_eq!(module.metadata_value("kind").unwrap(), Some("pattern"));
}

#[test]
fn size_mismatch() {
    let mut bytes = build(ByteOrder::native(), &[]);
    bytes.push(0);

    let err = Module::load(&bytes).unwrap_err();

    assert!(matches!(err, ModuleError::SizeMismatch { .. }));
}

#[test]
fn checksum_mismatch() {
    let mut bytes = build(ByteOrder::native(), &[]);
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;

    let err = Module::load(&bytes).unwrap_err();

    assert!(matches!(err, ModuleError::ChecksumMismatch { .. }));
}

#[test]
fn entry_out_of_range() {
    let mut bytes = build(ByteOrder::native(), &[]);
    let mut header = Header::from_bytes(&bytes).unwrap();
    header.entry = 10_000;
    header.seal(&mut bytes);

    let err = Module::load(&bytes).unwrap_err();

    assert!(matches!(err, ModuleError::OffsetOutOfRange { what: "entry", .. }));
}

#[test]
fn metadata_in_order() {
    let bytes = build(ByteOrder::native(), &[("b", "2"), ("a", "1")]);

    let module = Module::load(&bytes).unwrap();

    assert_eq!(module.metadata().unwrap(), vec![("b", "2"), ("a", "1")]);
    assert_eq!(module.metadata_value("missing").unwrap(), None);
    assert_eq!(
        metadata_len([("b", "2"), ("a", "1")].into_iter()),
        4 + 2 * (8 + 2)
    );
}

#[test]
fn outputs_in_file_order() {
    let bytes = build(ByteOrder::native(), &[]);
    let module = Module::load(&bytes).unwrap();

    let outputs = module.outputs().unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].offset, module.header().outputs_offset);
    assert_eq!(outputs[0].next, None);
}

#[test]
fn module_is_shareable() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<Module>();
}

#[test]
fn module_error_display() {
    assert_eq!(
        ModuleError::InvalidMagic.to_string(),
        "invalid magic: expected BSCN"
    );
    let err = ModuleError::SizeMismatch {
        header: 100,
        actual: 50,
    };
    assert!(err.to_string().contains("100"));
    assert!(err.to_string().contains("50"));
}
