/// Width of every node and output reference in a compiled buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdWidth {
    U8,
    U16,
    U32,
    U64,
}

impl IdWidth {
    /// Candidates from narrowest to widest.
    pub const ALL: [IdWidth; 4] = [Self::U8, Self::U16, Self::U32, Self::U64];

    /// Encoded size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    pub const fn max_value(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }

    pub const fn from_bytes(bytes: u8) -> Option<Self> {
        match bytes {
            1 => Some(Self::U8),
            2 => Some(Self::U16),
            4 => Some(Self::U32),
            8 => Some(Self::U64),
            _ => None,
        }
    }

    /// Narrowest width that can hold `value`.
    pub fn smallest_for(value: u64) -> Self {
        Self::ALL
            .into_iter()
            .find(|w| value <= w.max_value())
            .unwrap_or(Self::U64)
    }

    pub fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }
}

impl std::fmt::Display for IdWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bytes() * 8)
    }
}
