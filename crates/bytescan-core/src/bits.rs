//! Bit utilities.
//!
//! Word-level helpers for 8/16/32/64-bit flag fields, bit-vector helpers over
//! byte arrays, and [`Bitmap256`], the 256-bit byte membership set used by
//! bitmap edges and compiled high-degree nodes.
//!
//! Bit `i` of a byte array lives in byte `i / 8` at position `i % 8`. This
//! layout does not depend on host endianness, so byte-array bitmaps can be
//! copied into compiled buffers as-is.

use serde::{Deserialize, Serialize};

/// Bit operations on fixed-width unsigned words.
pub trait BitWord: Copy {
    /// Width of the word in bits.
    const BITS: u32;

    /// Whether bit `i` is set.
    fn bit(self, i: u32) -> bool;

    /// Copy of `self` with bit `i` set.
    fn with_bit(self, i: u32) -> Self;

    /// Copy of `self` with bit `i` cleared.
    fn without_bit(self, i: u32) -> Self;
}

macro_rules! impl_bit_word {
    ($($t:ty),*) => {
        $(
            impl BitWord for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn bit(self, i: u32) -> bool {
                    debug_assert!(i < Self::BITS);
                    (self >> i) & 1 == 1
                }

                #[inline]
                fn with_bit(self, i: u32) -> Self {
                    debug_assert!(i < Self::BITS);
                    self | (1 << i)
                }

                #[inline]
                fn without_bit(self, i: u32) -> Self {
                    debug_assert!(i < Self::BITS);
                    self & !(1 << i)
                }
            }
        )*
    };
}

impl_bit_word!(u8, u16, u32, u64);

/// Whether bit `i` of the byte array is set.
#[inline]
pub fn bitv(bytes: &[u8], i: usize) -> bool {
    bytes[i / 8].bit((i % 8) as u32)
}

/// Set bit `i` of the byte array.
#[inline]
pub fn set_bitv(bytes: &mut [u8], i: usize) {
    bytes[i / 8] = bytes[i / 8].with_bit((i % 8) as u32);
}

/// Clear bit `i` of the byte array.
#[inline]
pub fn clear_bitv(bytes: &mut [u8], i: usize) {
    bytes[i / 8] = bytes[i / 8].without_bit((i % 8) as u32);
}

/// Number of set bits in positions `0..=i` of the byte array.
pub fn popcount_through(bytes: &[u8], i: usize) -> u32 {
    let whole = i / 8;
    let mut count: u32 = bytes[..whole].iter().map(|b| b.count_ones()).sum();
    let keep = (i % 8) as u32 + 1;
    let mask = if keep == 8 { 0xFF } else { (1u8 << keep) - 1 };
    count += (bytes[whole] & mask).count_ones();
    count
}

/// Membership set over all 256 byte values.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitmap256 {
    words: [u64; 4],
}

impl Bitmap256 {
    /// Size of the byte-array form.
    pub const BYTES: usize = 32;

    pub const fn new() -> Self {
        Self { words: [0; 4] }
    }

    /// Bitmap with every byte value set.
    pub const fn full() -> Self {
        Self {
            words: [u64::MAX; 4],
        }
    }

    #[inline]
    pub fn contains(&self, c: u8) -> bool {
        self.words[(c >> 6) as usize].bit(u32::from(c & 63))
    }

    /// Add `c`; returns whether it was newly inserted.
    pub fn insert(&mut self, c: u8) -> bool {
        let word = &mut self.words[(c >> 6) as usize];
        let was = word.bit(u32::from(c & 63));
        *word = word.with_bit(u32::from(c & 63));
        !was
    }

    /// Remove `c`; returns whether it was present.
    pub fn remove(&mut self, c: u8) -> bool {
        let word = &mut self.words[(c >> 6) as usize];
        let was = word.bit(u32::from(c & 63));
        *word = word.without_bit(u32::from(c & 63));
        was
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set values in `0..=c`.
    pub fn rank(&self, c: u8) -> u32 {
        let word = (c >> 6) as usize;
        let mut count: u32 = self.words[..word].iter().map(|w| w.count_ones()).sum();
        let keep = u32::from(c & 63) + 1;
        let mask = if keep == 64 {
            u64::MAX
        } else {
            (1u64 << keep) - 1
        };
        count += (self.words[word] & mask).count_ones();
        count
    }

    /// Set values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(move |&c| self.contains(c))
    }

    /// Byte-array form (bit `c` in byte `c / 8`).
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        for c in self.iter() {
            set_bitv(&mut out, c as usize);
        }
        out
    }

    pub fn from_bytes(bytes: &[u8; Self::BYTES]) -> Self {
        let mut map = Self::new();
        for c in 0..=255u8 {
            if bitv(bytes, c as usize) {
                map.insert(c);
            }
        }
        map
    }
}

impl FromIterator<u8> for Bitmap256 {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut map = Self::new();
        for c in iter {
            map.insert(c);
        }
        map
    }
}

impl std::fmt::Debug for Bitmap256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
