//! Node records.
//!
//! Every record starts with one header byte:
//!
//! ```text
//! bits 0-1  kind (0 = low, 1 = high)
//! bit  2    has_output
//! bit  3    has_nonadvancing   some explicit transition does not advance
//! bit  4    has_default
//! bit  5    advance_on_default
//! bit  6    low: has_edges       high: has_target_bitmap
//! bit  7    high: has_run_bitmap
//! ```
//!
//! Low record fields, in order, each present only when flagged:
//! `output id`, `degree: u8`, `default id`, `advance bits: ceil(degree / 8)`,
//! `bytes: [u8; degree]`, `targets: [id; degree]`. Bytes are ascending.
//!
//! High record fields: `output id`, `default id`, `advance bitmap: 32`,
//! `target bitmap: 32`, `run bitmap: 32`, then the target table. Without a
//! target bitmap every byte has an explicit target. The table holds one id per
//! explicit byte, or one id per run of equal targets when the run bitmap is
//! present (bit `c` set where the target differs from the previous explicit
//! byte's target).

use bytescan_core::Bitmap256;
use bytescan_core::bits::{bitv, popcount_through};

use super::reader::id_at;
use super::{ByteOrder, IdOverflow, IdWidth, ModuleError, Reader, Writer};

const KIND_MASK: u8 = 0b11;
const KIND_LOW: u8 = 0;
const KIND_HIGH: u8 = 1;

const HAS_OUTPUT: u8 = 1 << 2;
const HAS_NONADVANCING: u8 = 1 << 3;
const HAS_DEFAULT: u8 = 1 << 4;
const ADVANCE_ON_DEFAULT: u8 = 1 << 5;
const HAS_EDGES: u8 = 1 << 6;
const HAS_TARGET_BITMAP: u8 = 1 << 6;
const HAS_RUN_BITMAP: u8 = 1 << 7;

/// Largest degree a low record can hold.
pub const MAX_LOW_DEGREE: usize = u8::MAX as usize;

/// A decoded transition: target offset and whether the byte is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub target: u64,
    pub advance: bool,
}

impl Transition {
    pub fn new(target: u64, advance: bool) -> Self {
        Self { target, advance }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// One explicit edge of a low record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LowEdge {
    pub byte: u8,
    pub target: u64,
    pub advance: bool,
}

/// Low-degree node: an explicit sorted list of `(byte, target)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LowNode {
    pub first_output: Option<u64>,
    pub default: Option<Transition>,
    pub edges: Vec<LowEdge>,
}

/// High-degree node: a 256-entry table compressed by bitmaps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighNode {
    pub first_output: Option<u64>,
    pub default: Option<Transition>,
    /// Bytes whose explicit transition advances; `None` when all of them do.
    pub advance: Option<Bitmap256>,
    /// Bytes with an explicit transition; `None` when all 256 have one.
    pub explicit: Option<Bitmap256>,
    /// Bytes where the target changes; `None` for one table entry per byte.
    pub runs: Option<Bitmap256>,
    pub targets: Vec<u64>,
}

/// A node record ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeEncoding {
    Low(LowNode),
    High(HighNode),
}

impl LowNode {
    fn has_nonadvancing(&self) -> bool {
        self.edges.iter().any(|e| !e.advance)
    }

    pub fn encoded_len(&self, width: IdWidth) -> usize {
        let w = width.bytes();
        let degree = self.edges.len();
        let mut len = 1;
        if self.first_output.is_some() {
            len += w;
        }
        if degree > 0 {
            len += 1 + degree * (1 + w);
        }
        if self.default.is_some() {
            len += w;
        }
        if degree > 0 && self.has_nonadvancing() {
            len += degree.div_ceil(8);
        }
        len
    }

    fn write(&self, w: &mut Writer, width: IdWidth) -> Result<(), IdOverflow> {
        debug_assert!(self.edges.len() <= MAX_LOW_DEGREE);
        debug_assert!(self.edges.windows(2).all(|p| p[0].byte < p[1].byte));

        let degree = self.edges.len();
        let nonadvancing = degree > 0 && self.has_nonadvancing();
        let mut header = KIND_LOW;
        header |= flag(self.first_output.is_some(), HAS_OUTPUT);
        header |= flag(nonadvancing, HAS_NONADVANCING);
        header |= default_flags(self.default);
        header |= flag(degree > 0, HAS_EDGES);
        w.u8(header);

        if let Some(output) = self.first_output {
            w.id(output, width)?;
        }
        if degree > 0 {
            w.u8(degree as u8);
        }
        if let Some(default) = self.default {
            w.id(default.target, width)?;
        }
        if nonadvancing {
            let mut bits = vec![0u8; degree.div_ceil(8)];
            for (i, edge) in self.edges.iter().enumerate() {
                if edge.advance {
                    bits[i / 8] |= 1 << (i % 8);
                }
            }
            w.bytes(&bits);
        }
        for edge in &self.edges {
            w.u8(edge.byte);
        }
        for edge in &self.edges {
            w.id(edge.target, width)?;
        }
        Ok(())
    }
}

impl HighNode {
    pub fn encoded_len(&self, width: IdWidth) -> usize {
        let w = width.bytes();
        let mut len = 1;
        if self.first_output.is_some() {
            len += w;
        }
        if self.default.is_some() {
            len += w;
        }
        for bitmap in [&self.advance, &self.explicit, &self.runs] {
            if bitmap.is_some() {
                len += Bitmap256::BYTES;
            }
        }
        len + self.targets.len() * w
    }

    fn write(&self, w: &mut Writer, width: IdWidth) -> Result<(), IdOverflow> {
        let mut header = KIND_HIGH;
        header |= flag(self.first_output.is_some(), HAS_OUTPUT);
        header |= flag(self.advance.is_some(), HAS_NONADVANCING);
        header |= default_flags(self.default);
        header |= flag(self.explicit.is_some(), HAS_TARGET_BITMAP);
        header |= flag(self.runs.is_some(), HAS_RUN_BITMAP);
        w.u8(header);

        if let Some(output) = self.first_output {
            w.id(output, width)?;
        }
        if let Some(default) = self.default {
            w.id(default.target, width)?;
        }
        for bitmap in [&self.advance, &self.explicit, &self.runs].into_iter().flatten() {
            w.bytes(&bitmap.to_bytes());
        }
        for &target in &self.targets {
            w.id(target, width)?;
        }
        Ok(())
    }
}

impl NodeEncoding {
    pub fn encoded_len(&self, width: IdWidth) -> usize {
        match self {
            Self::Low(node) => node.encoded_len(width),
            Self::High(node) => node.encoded_len(width),
        }
    }

    pub fn write(&self, w: &mut Writer, width: IdWidth) -> Result<(), IdOverflow> {
        match self {
            Self::Low(node) => node.write(w, width),
            Self::High(node) => node.write(w, width),
        }
    }
}

fn flag(set: bool, bit: u8) -> u8 {
    if set { bit } else { 0 }
}

fn default_flags(default: Option<Transition>) -> u8 {
    match default {
        Some(t) => HAS_DEFAULT | flag(t.advance, ADVANCE_ON_DEFAULT),
        None => 0,
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Body of a decoded record; tables stay borrowed from the buffer.
#[derive(Clone, Copy, Debug)]
pub enum NodeBody<'a> {
    Low {
        advance: Option<&'a [u8]>,
        bytes: &'a [u8],
        targets: &'a [u8],
    },
    High {
        advance: Option<&'a [u8]>,
        explicit: Option<&'a [u8]>,
        runs: Option<&'a [u8]>,
        targets: &'a [u8],
    },
}

/// A node record decoded in place.
#[derive(Clone, Copy, Debug)]
pub struct NodeRecord<'a> {
    pub offset: u64,
    pub first_output: Option<u64>,
    pub default: Option<Transition>,
    pub body: NodeBody<'a>,
    width: IdWidth,
    order: ByteOrder,
}

impl<'a> NodeRecord<'a> {
    /// Decode the record at `offset`, reading its fields in declared order.
    pub fn decode(
        buffer: &'a [u8],
        offset: u64,
        width: IdWidth,
        order: ByteOrder,
    ) -> Result<Self, ModuleError> {
        let start = usize::try_from(offset)
            .ok()
            .filter(|&o| o < buffer.len())
            .ok_or(ModuleError::OffsetOutOfRange {
                what: "node",
                offset,
                size: buffer.len(),
            })?;
        let mut r = Reader::at(buffer, start, order);
        let header = r.u8()?;
        let has_output = header & HAS_OUTPUT != 0;
        let has_nonadvancing = header & HAS_NONADVANCING != 0;
        let has_default = header & HAS_DEFAULT != 0;
        let advance_on_default = header & ADVANCE_ON_DEFAULT != 0;
        let w = width.bytes();

        let (first_output, default, body) = match header & KIND_MASK {
            KIND_LOW => {
                if header & HAS_RUN_BITMAP != 0 {
                    return Err(ModuleError::InvalidNode {
                        offset,
                        reason: "run bitmap on a low node",
                    });
                }
                let has_edges = header & HAS_EDGES != 0;
                let first_output = r.id_if(has_output, width)?;
                let degree = if has_edges { usize::from(r.u8()?) } else { 0 };
                if has_edges && degree == 0 {
                    return Err(ModuleError::InvalidNode {
                        offset,
                        reason: "zero degree with edges flag",
                    });
                }
                let default = r.id_if(has_default, width)?;
                let advance = r.bytes_if(has_nonadvancing && has_edges, degree.div_ceil(8))?;
                let bytes = r.bytes(degree)?;
                let targets = r.bytes(degree * w)?;
                (first_output, default, NodeBody::Low {
                    advance,
                    bytes,
                    targets,
                })
            }
            KIND_HIGH => {
                let has_explicit = header & HAS_TARGET_BITMAP != 0;
                let has_runs = header & HAS_RUN_BITMAP != 0;
                let first_output = r.id_if(has_output, width)?;
                let default = r.id_if(has_default, width)?;
                let advance = r.bytes_if(has_nonadvancing, Bitmap256::BYTES)?;
                let explicit = r.bytes_if(has_explicit, Bitmap256::BYTES)?;
                let runs = r.bytes_if(has_runs, Bitmap256::BYTES)?;
                let entries = table_len(explicit, runs);
                let targets = r.bytes(entries * w)?;
                (first_output, default, NodeBody::High {
                    advance,
                    explicit,
                    runs,
                    targets,
                })
            }
            kind => return Err(ModuleError::UnknownNodeKind { offset, kind }),
        };

        Ok(Self {
            offset,
            first_output,
            default: default.map(|target| Transition::new(target, advance_on_default)),
            body,
            width,
            order,
        })
    }

    /// The explicit transition for `c`, if the record has one.
    pub fn explicit(&self, c: u8) -> Result<Option<Transition>, ModuleError> {
        let (index, advance, targets) = match self.body {
            NodeBody::Low {
                advance,
                bytes,
                targets,
            } => {
                let Ok(i) = bytes.binary_search(&c) else {
                    return Ok(None);
                };
                (i, advance.is_none_or(|bits| bitv(bits, i)), targets)
            }
            NodeBody::High {
                advance,
                explicit,
                runs,
                targets,
            } => {
                if explicit.is_some_and(|bm| !bitv(bm, c as usize)) {
                    return Ok(None);
                }
                let index = match (runs, explicit) {
                    (Some(runs), _) => popcount_through(runs, c as usize) as usize,
                    (None, Some(bm)) => popcount_through(bm, c as usize) as usize - 1,
                    (None, None) => c as usize,
                };
                (
                    index,
                    advance.is_none_or(|bm| bitv(bm, c as usize)),
                    targets,
                )
            }
        };

        let target = id_at(targets, index, self.width, self.order).ok_or(ModuleError::InvalidNode {
            offset: self.offset,
            reason: "target index outside table",
        })?;
        Ok(Some(Transition::new(target, advance)))
    }

    /// The transition taken on `c`: explicit, else default, else none.
    pub fn transition(&self, c: u8) -> Result<Option<Transition>, ModuleError> {
        Ok(self.explicit(c)?.or(self.default))
    }

    pub fn is_high(&self) -> bool {
        matches!(self.body, NodeBody::High { .. })
    }

    /// Number of bytes with an explicit transition.
    pub fn degree(&self) -> usize {
        match self.body {
            NodeBody::Low { bytes, .. } => bytes.len(),
            NodeBody::High { explicit, .. } => {
                explicit.map_or(256, |bm| bm.iter().map(|b| b.count_ones() as usize).sum())
            }
        }
    }

    /// Offsets this record can transition to, default first, without duplicates.
    pub fn successors(&self) -> Vec<u64> {
        let mut out: Vec<u64> = self.default.map(|d| d.target).into_iter().collect();
        let targets = match self.body {
            NodeBody::Low { targets, .. } | NodeBody::High { targets, .. } => targets,
        };
        let entries = targets.len() / self.width.bytes();
        for i in 0..entries {
            if let Some(t) = id_at(targets, i, self.width, self.order)
                && !out.contains(&t)
            {
                out.push(t);
            }
        }
        out
    }
}

/// Entries in a high record's target table.
fn table_len(explicit: Option<&[u8]>, runs: Option<&[u8]>) -> usize {
    let explicit_count = explicit.map_or(256, |bm| bm.iter().map(|b| b.count_ones() as usize).sum());
    match runs {
        Some(_) if explicit_count == 0 => 0,
        Some(runs) => runs.iter().map(|b| b.count_ones() as usize).sum::<usize>() + 1,
        None => explicit_count,
    }
}
