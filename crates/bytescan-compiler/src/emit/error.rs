use bytescan_bytecode::{IdOverflow, IdWidth};
use bytescan_core::{NodeId, OutputId};

/// Errors raised while encoding an automaton.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("automaton needs {needed} bytes, more than {width} ids can address")]
    IdWidthTooSmall { width: IdWidth, needed: u64 },

    #[error("automaton too large to encode ({needed} bytes)")]
    TooLarge { needed: u64 },

    #[error("node {node} has more than one transition on byte {byte:#04x}")]
    NonDeterministic { node: NodeId, byte: u8 },

    #[error("node {node} has an epsilon edge; run edge optimization first")]
    EpsilonEdge { node: NodeId },

    #[error("non-advancing cycle through node {node} on byte {byte:#04x}")]
    NonAdvancingCycle { node: NodeId, byte: u8 },

    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(usize),

    #[error("output {output} has {len} bytes of content, more than a record can hold")]
    OutputTooLong { output: OutputId, len: usize },

    #[error(transparent)]
    Id(#[from] IdOverflow),
}
