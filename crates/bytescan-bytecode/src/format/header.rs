//! Compiled buffer header (64 bytes).
//!
//! Layout:
//! - 0-3: magic `BSCN`
//! - 4: format version
//! - 5: byte order tag (1 = little, 2 = big)
//! - 6: id width in bytes (1, 2, 4, 8)
//! - 7: flags (bit 0: outputs fire only on advancing transitions)
//! - 8-11: byte order marker `0x0A0B0C0D` in the tagged order
//! - 12-15: CRC32 of everything after the header
//! - 16-63: total size, entry node, node count, output count, output section,
//!   metadata section (6 x u64)
//!
//! Everything after byte 7 is encoded in the tagged byte order.

use super::{ByteOrder, HEADER_SIZE, IdWidth, MAGIC, ModuleError, Reader, VERSION, Writer};

/// Value of the byte order marker field.
pub const BYTE_ORDER_MARKER: u32 = 0x0A0B_0C0D;

const FLAG_NO_ADVANCE_NO_OUTPUT: u8 = 1 << 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub byte_order: ByteOrder,
    pub id_width: IdWidth,
    /// Outputs fire only when a node is entered through an advancing transition.
    pub no_advance_no_output: bool,
    /// CRC32 checksum of everything after the header.
    pub checksum: u32,
    /// Total buffer size in bytes.
    pub total_size: u64,
    /// Offset of the entry node record.
    pub entry: u64,
    pub node_count: u64,
    pub output_count: u64,
    /// Offset of the first output record.
    pub outputs_offset: u64,
    /// Offset of the metadata section, 0 when absent.
    pub metadata_offset: u64,
}

impl Header {
    pub fn new(byte_order: ByteOrder, id_width: IdWidth) -> Self {
        Self {
            version: VERSION,
            byte_order,
            id_width,
            no_advance_no_output: false,
            checksum: 0,
            total_size: 0,
            entry: 0,
            node_count: 0,
            output_count: 0,
            outputs_offset: 0,
            metadata_offset: 0,
        }
    }

    /// Decode and sanity-check the identity fields of a header.
    ///
    /// Sizes and offsets are checked against the buffer by the module loader.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModuleError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ModuleError::TooSmall(bytes.len()));
        }
        if bytes[0..4] != MAGIC {
            return Err(ModuleError::InvalidMagic);
        }
        let version = bytes[4];
        if version != VERSION {
            return Err(ModuleError::UnsupportedVersion(version));
        }
        let byte_order = ByteOrder::from_tag(bytes[5]).ok_or(ModuleError::UnknownByteOrder(bytes[5]))?;
        let id_width = IdWidth::from_bytes(bytes[6]).ok_or(ModuleError::InvalidIdWidth(bytes[6]))?;
        let flags = bytes[7];

        let mut r = Reader::at(bytes, 8, byte_order);
        if r.u32()? != BYTE_ORDER_MARKER {
            return Err(ModuleError::MarkerMismatch);
        }

        Ok(Self {
            version,
            byte_order,
            id_width,
            no_advance_no_output: flags & FLAG_NO_ADVANCE_NO_OUTPUT != 0,
            checksum: r.u32()?,
            total_size: r.u64()?,
            entry: r.u64()?,
            node_count: r.u64()?,
            output_count: r.u64()?,
            outputs_offset: r.u64()?,
            metadata_offset: r.u64()?,
        })
    }

    /// Encode to 64 bytes in the header's byte order.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut w = Writer::with_capacity(self.byte_order, HEADER_SIZE);
        w.bytes(&MAGIC);
        w.u8(self.version);
        w.u8(self.byte_order.tag());
        w.u8(self.id_width.bytes() as u8);
        w.u8(if self.no_advance_no_output {
            FLAG_NO_ADVANCE_NO_OUTPUT
        } else {
            0
        });
        w.u32(BYTE_ORDER_MARKER);
        w.u32(self.checksum);
        w.u64(self.total_size);
        w.u64(self.entry);
        w.u64(self.node_count);
        w.u64(self.output_count);
        w.u64(self.outputs_offset);
        w.u64(self.metadata_offset);

        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(w.as_slice());
        out
    }

    /// Fill in size and checksum for `buffer` and write the header into its
    /// first 64 bytes. The body must be complete.
    pub fn seal(&mut self, buffer: &mut [u8]) {
        self.total_size = buffer.len() as u64;
        self.checksum = checksum(buffer);
        buffer[..HEADER_SIZE].copy_from_slice(&self.to_bytes());
    }
}

/// CRC32 of the part of `buffer` covered by the header checksum.
pub fn checksum(buffer: &[u8]) -> u32 {
    crc32fast::hash(buffer.get(HEADER_SIZE..).unwrap_or_default())
}
