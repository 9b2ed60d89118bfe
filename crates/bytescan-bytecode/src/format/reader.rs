//! Sequential bounds-checked reader.
//!
//! Node and output records are variable length: a flag byte says which
//! optional fields follow, in a fixed order. Decoders walk them with a
//! [`Reader`], reading each present field and skipping absent ones. Every read
//! is checked against the end of the buffer.

use super::{ByteOrder, IdWidth, ModuleError};

pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self::at(bytes, 0, order)
    }

    /// Reader starting at `pos`.
    pub fn at(bytes: &'a [u8], pos: usize, order: ByteOrder) -> Self {
        Self { bytes, pos, order }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    /// Take the next `n` bytes.
    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8], ModuleError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.bytes.len());
        let Some(end) = end else {
            return Err(ModuleError::Truncated {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        };
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], ModuleError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), ModuleError> {
        self.bytes(n).map(|_| ())
    }

    pub fn u8(&mut self) -> Result<u8, ModuleError> {
        Ok(self.bytes(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, ModuleError> {
        Ok(self.order.u16_from(self.array()?))
    }

    pub fn u32(&mut self) -> Result<u32, ModuleError> {
        Ok(self.order.u32_from(self.array()?))
    }

    pub fn u64(&mut self) -> Result<u64, ModuleError> {
        Ok(self.order.u64_from(self.array()?))
    }

    pub fn id(&mut self, width: IdWidth) -> Result<u64, ModuleError> {
        Ok(match width {
            IdWidth::U8 => u64::from(self.u8()?),
            IdWidth::U16 => u64::from(self.u16()?),
            IdWidth::U32 => u64::from(self.u32()?),
            IdWidth::U64 => self.u64()?,
        })
    }

    /// Read an id where 0 means "none".
    pub fn opt_id(&mut self, width: IdWidth) -> Result<Option<u64>, ModuleError> {
        Ok(Some(self.id(width)?).filter(|&id| id != 0))
    }

    /// Read an id when `present`, otherwise leave the cursor in place.
    pub fn id_if(&mut self, present: bool, width: IdWidth) -> Result<Option<u64>, ModuleError> {
        if present {
            self.id(width).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Take `n` bytes when `present`.
    pub fn bytes_if(&mut self, present: bool, n: usize) -> Result<Option<&'a [u8]>, ModuleError> {
        if present {
            self.bytes(n).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Decode the id stored at index `index` of a packed id table.
pub fn id_at(table: &[u8], index: usize, width: IdWidth, order: ByteOrder) -> Option<u64> {
    let w = width.bytes();
    let start = index.checked_mul(w)?;
    let raw = table.get(start..start + w)?;
    Some(match width {
        IdWidth::U8 => u64::from(raw[0]),
        IdWidth::U16 => u64::from(order.u16_from([raw[0], raw[1]])),
        IdWidth::U32 => u64::from(order.u32_from([raw[0], raw[1], raw[2], raw[3]])),
        IdWidth::U64 => order.u64_from(raw.try_into().ok()?),
    })
}
