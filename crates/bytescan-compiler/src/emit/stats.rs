use std::fmt;

use bytescan_bytecode::IdWidth;

/// Size breakdown of an encoded automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileStats {
    pub bytes: usize,
    pub id_width: IdWidth,
    pub padding: usize,
    pub low_nodes: usize,
    pub low_bytes: usize,
    pub high_nodes: usize,
    pub high_bytes: usize,
    pub outputs: usize,
    pub output_bytes: usize,
    pub metadata_bytes: usize,
}

impl fmt::Display for CompileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bytes:         {}", self.bytes)?;
        writeln!(f, "id width:      {}", self.id_width)?;
        writeln!(f, "padding:       {}", self.padding)?;
        writeln!(f, "low nodes:     {} ({} bytes)", self.low_nodes, self.low_bytes)?;
        writeln!(f, "high nodes:    {} ({} bytes)", self.high_nodes, self.high_bytes)?;
        writeln!(f, "outputs:       {} ({} bytes)", self.outputs, self.output_bytes)?;
        write!(f, "metadata:      {} bytes", self.metadata_bytes)
    }
}
