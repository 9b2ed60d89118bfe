//! Per-node encoding plans.
//!
//! A plan fixes everything about a record except the offsets it refers to:
//! which bytes are explicit, the record kind, and which optional tables are
//! present. Record sizes therefore depend only on the id width, which lets
//! the layout size every record before any offset is known.

use bytescan_bytecode::format::MAX_LOW_DEGREE;
use bytescan_bytecode::{HighNode, IdWidth, LowEdge, LowNode, NodeEncoding, Transition};
use bytescan_core::{Bitmap256, Node, NodeId, OutputId, Target};

/// Record kind chosen for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Low,
    High { full: bool, runs: bool },
}

/// Encoding decisions for one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodePlan {
    pub first_output: Option<OutputId>,
    pub default: Option<Target>,
    /// Bytes whose transition differs from the default, ascending.
    pub explicit: Vec<(u8, Target)>,
    pub kind: RecordKind,
}

impl NodePlan {
    /// Plan `node` for ids of `width`.
    ///
    /// The node must be deterministic and free of epsilon edges.
    pub fn new(node: &Node, width: IdWidth, high_node_weight: f64) -> Self {
        let default = node.default_target();
        let explicit: Vec<(u8, Target)> = (0..=255u8)
            .filter_map(|c| {
                let t = node.edges().iter().find(|e| e.contains(c))?.transition();
                (Some(t) != default).then_some((c, t))
            })
            .collect();

        let mut plan = Self {
            first_output: node.first_output(),
            default,
            explicit,
            kind: RecordKind::Low,
        };
        plan.kind = plan.choose_kind(width, high_node_weight);
        plan
    }

    fn choose_kind(&self, width: IdWidth, high_node_weight: f64) -> RecordKind {
        let full = self.explicit.len() == 256;
        let saved = self.explicit.len() - run_entries(&self.explicit);
        let runs = saved * width.bytes() > Bitmap256::BYTES;
        let high = RecordKind::High { full, runs };
        if self.explicit.len() > MAX_LOW_DEGREE {
            return high;
        }

        let low_cost = self.with_kind(RecordKind::Low).encoded_len(width) as f64;
        let high_cost = self.with_kind(high).encoded_len(width) as f64;
        if high_cost * high_node_weight < low_cost {
            high
        } else {
            RecordKind::Low
        }
    }

    fn with_kind(&self, kind: RecordKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self.kind, RecordKind::High { .. })
    }

    /// Size of the record at `width`.
    pub fn encoded_len(&self, width: IdWidth) -> usize {
        self.encode(|_| 0, |_| 0).encoded_len(width)
    }

    /// Nodes this record refers to.
    pub fn successors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.default
            .iter()
            .chain(self.explicit.iter().map(|(_, t)| t))
            .map(|t| t.node)
    }

    /// Build the record with node and output references resolved to offsets.
    pub fn encode(
        &self,
        node_offset: impl Fn(NodeId) -> u64,
        output_offset: impl Fn(OutputId) -> u64,
    ) -> NodeEncoding {
        let transition = |t: Target| Transition::new(node_offset(t.node), t.advance);
        let first_output = self.first_output.map(&output_offset);
        let default = self.default.map(transition);

        match self.kind {
            RecordKind::Low => NodeEncoding::Low(LowNode {
                first_output,
                default,
                edges: self
                    .explicit
                    .iter()
                    .map(|&(byte, t)| LowEdge {
                        byte,
                        target: node_offset(t.node),
                        advance: t.advance,
                    })
                    .collect(),
            }),
            RecordKind::High { full, runs } => {
                let advance = self
                    .explicit
                    .iter()
                    .any(|(_, t)| !t.advance)
                    .then(|| {
                        self.explicit
                            .iter()
                            .filter(|(_, t)| t.advance)
                            .map(|&(c, _)| c)
                            .collect()
                    });
                let explicit = (!full).then(|| self.explicit.iter().map(|&(c, _)| c).collect());
                let (runs, targets) = if runs {
                    let (bitmap, targets) = run_table(&self.explicit);
                    (Some(bitmap), targets)
                } else {
                    (None, self.explicit.iter().map(|(_, t)| t.node).collect())
                };
                NodeEncoding::High(HighNode {
                    first_output,
                    default,
                    advance,
                    explicit,
                    runs,
                    targets: targets.into_iter().map(&node_offset).collect(),
                })
            }
        }
    }
}

/// Table entries when equal consecutive targets share one entry.
fn run_entries(explicit: &[(u8, Target)]) -> usize {
    run_table(explicit).1.len()
}

/// Run bitmap and compressed target list.
///
/// Bit `c` is set where the target differs from the previous explicit byte's
/// target; the first explicit byte starts the first run implicitly.
fn run_table(explicit: &[(u8, Target)]) -> (Bitmap256, Vec<NodeId>) {
    let mut bitmap = Bitmap256::new();
    let mut targets: Vec<NodeId> = Vec::new();
    for &(c, t) in explicit {
        match targets.last() {
            Some(&last) if last == t.node => {}
            Some(_) => {
                bitmap.insert(c);
                targets.push(t.node);
            }
            None => targets.push(t.node),
        }
    }
    (bitmap, targets)
}
