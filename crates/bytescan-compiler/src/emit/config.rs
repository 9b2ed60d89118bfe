use bytescan_bytecode::{ByteOrder, IdWidth};

/// Encoder settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitConfig {
    /// Fixed id width; `None` picks the narrowest width that fits.
    pub id_width: Option<IdWidth>,
    /// Node records start at multiples of this many bytes.
    pub align_to: usize,
    /// Multiplier on the byte cost of high-degree records when choosing a
    /// node encoding. Values above 1 favor low-degree records.
    pub high_node_weight: f64,
    pub byte_order: ByteOrder,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            id_width: None,
            align_to: 1,
            high_node_weight: 1.0,
            byte_order: ByteOrder::native(),
        }
    }
}

impl EmitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_width(mut self, width: Option<IdWidth>) -> Self {
        self.id_width = width;
        self
    }

    pub fn align_to(mut self, align: usize) -> Self {
        self.align_to = align;
        self
    }

    pub fn high_node_weight(mut self, weight: f64) -> Self {
        self.high_node_weight = weight;
        self
    }

    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }
}
