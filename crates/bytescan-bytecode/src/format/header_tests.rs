use super::*;

fn sample(order: ByteOrder) -> Header {
    let mut header = Header::new(order, IdWidth::U16);
    header.no_advance_no_output = true;
    header.checksum = 0xDEAD_BEEF;
    header.total_size = 300;
    header.entry = 64;
    header.node_count = 7;
    header.output_count = 3;
    header.outputs_offset = 250;
    header.metadata_offset = 280;
    header
}

#[test]
fn header_size_is_64() {
    assert_eq!(sample(ByteOrder::Little).to_bytes().len(), HEADER_SIZE);
}

#[test]
fn identity_fields_are_order_independent() {
    let bytes = sample(ByteOrder::Big).to_bytes();

    assert_eq!(&bytes[0..4], b"BSCN");
    assert_eq!(bytes[4], VERSION);
    assert_eq!(bytes[5], 2);
    assert_eq!(bytes[6], 2);
    assert_eq!(bytes[7], 1);
    assert_eq!(&bytes[8..12], &[0x0A, 0x0B, 0x0C, 0x0D]);
}

#[test]
fn little_endian_marker_layout() {
    let bytes = sample(ByteOrder::Little).to_bytes();
    assert_eq!(&bytes[8..12], &[0x0D, 0x0C, 0x0B, 0x0A]);
}

#[test]
fn decodes_in_either_order() {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let header = sample(order);
        let decoded = Header::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(decoded, header);
    }
}

#[test]
fn too_small() {
    let err = Header::from_bytes(&[0u8; 10]).unwrap_err();
    assert_eq!(err, ModuleError::TooSmall(10));
}

#[test]
fn bad_magic() {
    let mut bytes = sample(ByteOrder::Little).to_bytes();
    bytes[0] = b'X';
    assert_eq!(Header::from_bytes(&bytes), Err(ModuleError::InvalidMagic));
}

#[test]
fn bad_version() {
    let mut bytes = sample(ByteOrder::Little).to_bytes();
    bytes[4] = 9;
    assert_eq!(
        Header::from_bytes(&bytes),
        Err(ModuleError::UnsupportedVersion(9))
    );
}

#[test]
fn bad_byte_order_tag() {
    let mut bytes = sample(ByteOrder::Little).to_bytes();
    bytes[5] = 7;
    assert_eq!(
        Header::from_bytes(&bytes),
        Err(ModuleError::UnknownByteOrder(7))
    );
}

#[test]
fn bad_id_width() {
    let mut bytes = sample(ByteOrder::Little).to_bytes();
    bytes[6] = 3;
    assert_eq!(Header::from_bytes(&bytes), Err(ModuleError::InvalidIdWidth(3)));
}

#[test]
fn tag_disagreeing_with_marker() {
    let mut bytes = sample(ByteOrder::Little).to_bytes();
    bytes[5] = ByteOrder::Big.tag();
    assert_eq!(Header::from_bytes(&bytes), Err(ModuleError::MarkerMismatch));
}

#[test]
fn seal_fills_size_and_checksum() {
    let mut buffer = vec![0u8; HEADER_SIZE];
    buffer.extend_from_slice(b"payload");
    let mut header = Header::new(ByteOrder::native(), IdWidth::U8);

    header.seal(&mut buffer);

    let decoded = Header::from_bytes(&buffer).unwrap();
    assert_eq!(decoded.total_size, buffer.len() as u64);
    assert_eq!(decoded.checksum, crc32fast::hash(b"payload"));
    assert_eq!(decoded.checksum, checksum(&buffer));
}
