//! One physically contiguous chunk of a column: an append-only value array of
//! bounded capacity plus its validity bitmap.

use crate::error::ColframeError;
use crate::null_handling::ValidityBitmap;
use crate::traits::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T: Element> {
    values: Vec<T>,
    validity: ValidityBitmap,
    capacity: usize,
}

impl<T: Element> Buffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::new(),
            validity: ValidityBitmap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Assembles a buffer from already-computed values and validity.
    pub(crate) fn from_parts(
        values: Vec<T>,
        validity: ValidityBitmap,
        capacity: usize,
    ) -> Result<Self, ColframeError> {
        if values.len() != validity.len() {
            return Err(ColframeError::InternalError(format!(
                "buffer has {} values but {} validity bits",
                values.len(),
                validity.len()
            )));
        }
        if values.len() > capacity {
            return Err(ColframeError::InternalError(format!(
                "buffer of {} values exceeds capacity {}",
                values.len(),
                capacity
            )));
        }
        Ok(Self {
            values,
            validity,
            capacity: capacity.max(1),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    pub fn null_count(&self) -> usize {
        self.validity.null_count()
    }

    /// Writes to the next free slot. The caller allocates a fresh buffer once
    /// this one `is_full`.
    pub(crate) fn push(&mut self, value: Option<T>) {
        debug_assert!(!self.is_full(), "push into a full buffer");
        self.values.push(value.unwrap_or_default());
        self.validity.push(value.is_some());
    }

    /// The value at `offset`, or `None` when the slot is null or past the end.
    #[inline]
    pub fn get(&self, offset: usize) -> Option<T> {
        if self.validity.is_valid(offset) {
            self.values.get(offset).copied()
        } else {
            None
        }
    }

    /// Overwrites the slot at `offset`. Writing `None` only clears the validity
    /// bit. Returns whether the slot was valid before the write.
    pub(crate) fn set(&mut self, offset: usize, value: Option<T>) -> Result<bool, ColframeError> {
        let was_valid = self.validity.set(offset, value.is_some())?;
        if let Some(v) = value {
            self.values[offset] = v;
        }
        Ok(was_valid)
    }

    /// Raw values, including the unspecified payload of null slots.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn validity(&self) -> &ValidityBitmap {
        &self.validity
    }

    #[inline]
    pub fn is_valid(&self, offset: usize) -> bool {
        self.validity.is_valid(offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.values
            .iter()
            .zip(self.validity.iter())
            .map(|(v, valid)| if valid { Some(*v) } else { None })
    }

    /// `(raw value, validity)` pairs; the raw value of a null slot is meaningless.
    pub(crate) fn slots(&self) -> impl Iterator<Item = (T, bool)> + '_ {
        self.values.iter().copied().zip(self.validity.iter())
    }
}
