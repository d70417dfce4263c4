// --- IN: src/null_handling/bitmap.rs ---

//! The validity bitmap paired 1:1 with every value buffer.
//!
//! Bit `i` is `1` when slot `i` holds a value and `0` when it is null. The value
//! stored at a null slot is unspecified and never read as meaningful. Bits are
//! stored LSB-first in `u8` words via `bitvec`, which is also the byte layout
//! accepted and produced by the raw-parts constructors.

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use crate::error::ColframeError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityBitmap {
    bits: BitVec<u8, Lsb0>,
}

impl ValidityBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(capacity),
        }
    }

    /// A bitmap of `len` set bits.
    pub fn all_valid(len: usize) -> Self {
        Self {
            bits: BitVec::repeat(true, len),
        }
    }

    /// A bitmap of `len` cleared bits.
    pub fn all_null(len: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, len),
        }
    }

    /// Reads `len` bits from an LSB-first byte slice; trailing bytes are ignored.
    pub fn from_lsb_bytes(bytes: &[u8], len: usize) -> Result<Self, ColframeError> {
        let required = len.div_ceil(8);
        if bytes.len() < required {
            return Err(ColframeError::BufferTooShort {
                required,
                actual: bytes.len(),
            });
        }
        let mut bits = BitVec::<u8, Lsb0>::from_slice(&bytes[..required]);
        bits.truncate(len);
        Ok(Self { bits })
    }

    /// Serialises the bitmap LSB-first; padding bits in the last byte are zero.
    pub fn to_lsb_bytes(&self) -> Vec<u8> {
        let mut bits = self.bits.clone();
        bits.set_uninitialized(false);
        bits.as_raw_slice().to_vec()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, valid: bool) {
        self.bits.push(valid);
    }

    /// Returns the bit at `index`; slots past the end read as null.
    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        self.bits.get(index).map(|bit| *bit).unwrap_or(false)
    }

    /// Sets the bit at `index` and returns its previous state.
    pub fn set(&mut self, index: usize, valid: bool) -> Result<bool, ColframeError> {
        if index >= self.len() {
            return Err(ColframeError::IndexOutOfRange {
                index,
                length: self.len(),
            });
        }
        let previous = self.is_valid(index);
        self.bits.set(index, valid);
        Ok(previous)
    }

    /// Number of cleared (null) bits.
    pub fn null_count(&self) -> usize {
        self.bits.count_zeros()
    }

    /// Elementwise AND of two equally long bitmaps: the validity of a binary result.
    pub fn and(&self, other: &ValidityBitmap) -> Result<ValidityBitmap, ColframeError> {
        if self.len() != other.len() {
            return Err(ColframeError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let bits = self
            .iter()
            .zip(other.iter())
            .map(|(l, r)| l && r)
            .collect::<BitVec<u8, Lsb0>>();
        Ok(Self { bits })
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }
}

impl FromIterator<bool> for ValidityBitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
