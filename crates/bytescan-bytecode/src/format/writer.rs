//! Sequential writer, the encoding twin of [`Reader`](super::Reader).

use super::{ByteOrder, IdOverflow, IdWidth};

pub struct Writer {
    buf: Vec<u8>,
    order: ByteOrder,
}

impl Writer {
    pub fn new(order: ByteOrder) -> Self {
        Self::with_capacity(order, 0)
    }

    pub fn with_capacity(order: ByteOrder, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            order,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&self.order.u16_to(value));
    }

    pub fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&self.order.u32_to(value));
    }

    pub fn u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&self.order.u64_to(value));
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn zeroes(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    pub fn id(&mut self, value: u64, width: IdWidth) -> Result<(), IdOverflow> {
        if !width.fits(value) {
            return Err(IdOverflow { value, width });
        }
        match width {
            IdWidth::U8 => self.u8(value as u8),
            IdWidth::U16 => self.u16(value as u16),
            IdWidth::U32 => self.u32(value as u32),
            IdWidth::U64 => self.u64(value),
        }
        Ok(())
    }

    /// Write an id, encoding `None` as 0.
    pub fn opt_id(&mut self, value: Option<u64>, width: IdWidth) -> Result<(), IdOverflow> {
        self.id(value.unwrap_or(0), width)
    }

    /// Pad with zeroes to a multiple of `align`; returns the padding added.
    pub fn pad_to(&mut self, align: usize) -> usize {
        let padding = padding_for(self.buf.len(), align);
        self.zeroes(padding);
        padding
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Bytes needed to round `len` up to a multiple of `align`.
pub fn padding_for(len: usize, align: usize) -> usize {
    if align <= 1 {
        return 0;
    }
    (align - len % align) % align
}
