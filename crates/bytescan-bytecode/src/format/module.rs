//! Loaded compiled buffers.
//!
//! A [`Module`] owns a validated buffer behind an `Arc`, so it can be cloned
//! cheaply and shared between threads. Loading checks the header, the size,
//! the checksum, and the section offsets; records themselves are decoded
//! lazily and bounds-checked on every access.

use std::sync::Arc;

use super::{ByteOrder, HEADER_SIZE, Header, ModuleError, NodeRecord, OutputRecord, Reader, Writer};
use super::checksum;

/// Policy knobs for [`Module::load_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Accept buffers written in the other byte order and decode them
    /// explicitly instead of refusing them.
    pub allow_foreign_byte_order: bool,
}

#[derive(Clone, Debug)]
pub struct Module {
    bytes: Arc<[u8]>,
    header: Header,
}

impl Module {
    /// Load a buffer written in the host byte order.
    pub fn load(bytes: &[u8]) -> Result<Self, ModuleError> {
        Self::load_with(bytes, LoadOptions::default())
    }

    pub fn load_with(bytes: &[u8], options: LoadOptions) -> Result<Self, ModuleError> {
        let header = Header::from_bytes(bytes)?;

        let host = ByteOrder::native();
        if header.byte_order != host && !options.allow_foreign_byte_order {
            return Err(ModuleError::EndiannessMismatch {
                buffer: header.byte_order,
                host,
            });
        }

        if header.total_size != bytes.len() as u64 {
            return Err(ModuleError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }

        let actual = checksum(bytes);
        if actual != header.checksum {
            return Err(ModuleError::ChecksumMismatch {
                expected: header.checksum,
                actual,
            });
        }

        let size = bytes.len();
        let in_body = |offset: u64| offset >= HEADER_SIZE as u64 && offset < size as u64;
        if !in_body(header.entry) {
            return Err(ModuleError::OffsetOutOfRange {
                what: "entry",
                offset: header.entry,
                size,
            });
        }
        if header.outputs_offset < HEADER_SIZE as u64 || header.outputs_offset > size as u64 {
            return Err(ModuleError::OffsetOutOfRange {
                what: "outputs",
                offset: header.outputs_offset,
                size,
            });
        }
        if header.metadata_offset != 0 && !in_body(header.metadata_offset) {
            return Err(ModuleError::OffsetOutOfRange {
                what: "metadata",
                offset: header.metadata_offset,
                size,
            });
        }

        Ok(Self {
            bytes: Arc::from(bytes),
            header,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn entry(&self) -> u64 {
        self.header.entry
    }

    pub fn no_advance_no_output(&self) -> bool {
        self.header.no_advance_no_output
    }

    /// Decode the node record at `offset`.
    pub fn node(&self, offset: u64) -> Result<NodeRecord<'_>, ModuleError> {
        NodeRecord::decode(&self.bytes, offset, self.header.id_width, self.header.byte_order)
    }

    /// Decode the output record at `offset`.
    pub fn output(&self, offset: u64) -> Result<OutputRecord<'_>, ModuleError> {
        OutputRecord::decode(&self.bytes, offset, self.header.id_width, self.header.byte_order)
    }

    /// Follow an output chain from `first`.
    ///
    /// The chain is cut after `output_count` records so a corrupt cyclic
    /// chain cannot loop forever.
    pub fn output_chain(&self, first: Option<u64>) -> OutputChain<'_> {
        OutputChain {
            module: self,
            next: first,
            budget: self.header.output_count,
        }
    }

    /// Every output record in file order.
    pub fn outputs(&self) -> Result<Vec<OutputRecord<'_>>, ModuleError> {
        let width = self.header.id_width;
        let mut offset = self.header.outputs_offset;
        let mut records = Vec::new();
        for _ in 0..self.header.output_count {
            let record = self.output(offset)?;
            offset += record.encoded_len(width) as u64;
            records.push(record);
        }
        Ok(records)
    }

    /// Metadata pairs in stored order.
    pub fn metadata(&self) -> Result<Vec<(&str, &str)>, ModuleError> {
        let offset = self.header.metadata_offset;
        if offset == 0 {
            return Ok(Vec::new());
        }
        let mut r = Reader::at(&self.bytes, offset as usize, self.header.byte_order);
        let count = r.u32().map_err(|_| ModuleError::InvalidMetadata { offset })?;
        let mut pairs = Vec::new();
        for _ in 0..count {
            let key = read_str(&mut r).ok_or(ModuleError::InvalidMetadata { offset })?;
            let value = read_str(&mut r).ok_or(ModuleError::InvalidMetadata { offset })?;
            pairs.push((key, value));
        }
        Ok(pairs)
    }

    pub fn metadata_value(&self, key: &str) -> Result<Option<&str>, ModuleError> {
        Ok(self
            .metadata()?
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v))
    }
}

/// Append a metadata section: `count: u32`, then length-prefixed key/value pairs.
pub fn write_metadata<'a>(w: &mut Writer, pairs: impl ExactSizeIterator<Item = (&'a str, &'a str)>) {
    w.u32(pairs.len() as u32);
    for (key, value) in pairs {
        w.u32(key.len() as u32);
        w.bytes(key.as_bytes());
        w.u32(value.len() as u32);
        w.bytes(value.as_bytes());
    }
}

/// Size of the metadata section for `pairs`.
pub fn metadata_len<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> usize {
    4 + pairs.map(|(k, v)| 8 + k.len() + v.len()).sum::<usize>()
}

fn read_str<'a>(r: &mut Reader<'a>) -> Option<&'a str> {
    let len = r.u32().ok()? as usize;
    std::str::from_utf8(r.bytes(len).ok()?).ok()
}

/// Iterator over an output chain; yields an error and stops on a bad record.
pub struct OutputChain<'a> {
    module: &'a Module,
    next: Option<u64>,
    budget: u64,
}

impl<'a> Iterator for OutputChain<'a> {
    type Item = Result<OutputRecord<'a>, ModuleError>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.next.take()?;
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        match self.module.output(offset) {
            Ok(record) => {
                self.next = record.next;
                Some(Ok(record))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
