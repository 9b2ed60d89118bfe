//! Output records: `len: u32`, `content: [u8; len]`, `next: id` (0 = end of chain).

use super::{ByteOrder, IdOverflow, IdWidth, ModuleError, Reader, Writer};

/// An output record decoded in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputRecord<'a> {
    pub offset: u64,
    pub content: &'a [u8],
    pub next: Option<u64>,
}

impl<'a> OutputRecord<'a> {
    pub fn decode(buffer: &'a [u8], offset: u64, width: IdWidth, order: ByteOrder) -> Result<Self, ModuleError> {
        let start = usize::try_from(offset)
            .ok()
            .filter(|&o| o < buffer.len())
            .ok_or(ModuleError::OffsetOutOfRange {
                what: "output",
                offset,
                size: buffer.len(),
            })?;
        let mut r = Reader::at(buffer, start, order);
        let len = r.u32()? as usize;
        let content = r.bytes(len)?;
        let next = r.opt_id(width)?;
        if let Some(next) = next
            && next >= buffer.len() as u64
        {
            return Err(ModuleError::OffsetOutOfRange {
                what: "output link",
                offset: next,
                size: buffer.len(),
            });
        }
        Ok(Self { offset, content, next })
    }

    /// Bytes this record occupies.
    pub fn encoded_len(&self, width: IdWidth) -> usize {
        encoded_len(self.content.len(), width)
    }
}

/// Size of an output record with `content_len` bytes of content.
pub fn encoded_len(content_len: usize, width: IdWidth) -> usize {
    4 + content_len + width.bytes()
}

/// Append one output record.
pub fn write_output(w: &mut Writer, content: &[u8], next: Option<u64>, width: IdWidth) -> Result<(), IdOverflow> {
    debug_assert!(u32::try_from(content.len()).is_ok());
    w.u32(content.len() as u32);
    w.bytes(content);
    w.opt_id(next, width)
}
