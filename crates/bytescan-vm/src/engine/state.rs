//! Resumable scan state.

/// Where a scan stands: the current node and the number of bytes consumed.
///
/// A state belongs to the engine that created it. Feeding successive chunks
/// of a stream through one state gives the same matches as scanning the
/// concatenated stream at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanState {
    pub(crate) node: u64,
    pub(crate) position: u64,
    /// The entry node's outputs have been reported.
    pub(crate) started: bool,
}

impl ScanState {
    pub(crate) fn new(entry: u64) -> Self {
        Self {
            node: entry,
            position: 0,
            started: false,
        }
    }

    /// Offset of the current node record.
    pub fn node(&self) -> u64 {
        self.node
    }

    /// Bytes consumed so far, across every chunk.
    pub fn position(&self) -> u64 {
        self.position
    }
}

/// How a call to `scan` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every byte of the chunk was processed.
    Exhausted,
    /// The callback asked to stop. `consumed` bytes of the chunk were fully
    /// processed; scanning the rest of the chunk with the same state picks up
    /// where the scan stopped.
    Stopped { consumed: usize },
}

impl ScanOutcome {
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped { .. })
    }
}
