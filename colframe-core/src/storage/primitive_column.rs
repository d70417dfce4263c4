// In: src/storage/primitive_column.rs

//! A named, typed, nullable column backed by a list of fixed-capacity buffers.
//!
//! Layout invariant: every buffer except the last is full. A logical index `i`
//! therefore lives in buffer `i / capacity` at offset `i % capacity`, and the
//! cumulative prefix sum of buffer lengths is `b * capacity`. Every constructor
//! either appends slot by slot or validates this invariant in `from_buffers`.

use bytemuck::Pod;

use crate::config::ColframeConfig;
use crate::error::ColframeError;
use crate::kernels::bitcast;
use crate::null_handling::ValidityBitmap;
use crate::storage::Buffer;
use crate::traits::Element;

#[derive(Debug, Clone)]
pub struct PrimitiveColumn<T: Element> {
    name: String,
    buffers: Vec<Buffer<T>>,
    buffer_capacity: usize,
    length: usize,
    null_count: usize,
}

//==================================================================================
// 1. Construction
//==================================================================================
impl<T: Element> PrimitiveColumn<T> {
    /// An empty column using the default buffer size.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &ColframeConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: &ColframeConfig) -> Self {
        Self::with_buffer_capacity(name, config.buffer_capacity_for::<T>())
    }

    /// An empty column whose buffers hold at most `capacity` elements each.
    pub fn with_buffer_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            buffers: Vec::new(),
            buffer_capacity: capacity.max(1),
            length: 0,
            null_count: 0,
        }
    }

    pub fn from_options<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let mut column = Self::new(name);
        column.extend(values);
        column
    }

    pub fn from_values<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_options(name, values.into_iter().map(Some))
    }

    /// Reassembles a column from buffers produced by a kernel.
    pub(crate) fn from_buffers(
        name: String,
        buffer_capacity: usize,
        buffers: Vec<Buffer<T>>,
    ) -> Result<Self, ColframeError> {
        let buffer_capacity = buffer_capacity.max(1);
        let last = buffers.len().saturating_sub(1);
        for (b, buffer) in buffers.iter().enumerate() {
            if buffer.len() > buffer_capacity || (b < last && buffer.len() != buffer_capacity) {
                return Err(ColframeError::InternalError(format!(
                    "buffer {} holds {} values; every buffer but the last must hold exactly {}",
                    b,
                    buffer.len(),
                    buffer_capacity
                )));
            }
        }
        let length = buffers.iter().map(Buffer::len).sum();
        let null_count = buffers.iter().map(Buffer::null_count).sum();
        Ok(Self {
            name,
            buffers,
            buffer_capacity,
            length,
            null_count,
        })
    }

    /// An empty column with the same name and buffer capacity as `self`.
    pub(crate) fn empty_like<O: Element>(&self) -> PrimitiveColumn<O> {
        PrimitiveColumn::with_buffer_capacity(self.name.clone(), self.buffer_capacity)
    }
}

//==================================================================================
// 2. Logical Access
//==================================================================================
impl<T: Element> PrimitiveColumn<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn null_count(&self) -> usize {
        self.null_count
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    pub fn buffers(&self) -> &[Buffer<T>] {
        &self.buffers
    }

    /// Logical index of the first slot of buffer `b`.
    #[inline]
    pub(crate) fn buffer_start(&self, b: usize) -> usize {
        b * self.buffer_capacity
    }

    #[inline]
    fn locate(&self, index: usize) -> Result<(usize, usize), ColframeError> {
        if index >= self.length {
            return Err(ColframeError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        Ok((index / self.buffer_capacity, index % self.buffer_capacity))
    }

    pub fn get(&self, index: usize) -> Result<Option<T>, ColframeError> {
        let (b, offset) = self.locate(index)?;
        Ok(self.buffers[b].get(offset))
    }

    pub fn is_valid(&self, index: usize) -> Result<bool, ColframeError> {
        let (b, offset) = self.locate(index)?;
        Ok(self.buffers[b].is_valid(offset))
    }

    /// Overwrites slot `index`; `None` clears its validity bit.
    pub fn set(&mut self, index: usize, value: Option<T>) -> Result<(), ColframeError> {
        let (b, offset) = self.locate(index)?;
        let was_valid = self.buffers[b].set(offset, value)?;
        match (was_valid, value.is_some()) {
            (true, false) => self.null_count += 1,
            (false, true) => self.null_count -= 1,
            _ => {}
        }
        Ok(())
    }

    /// Appends one slot, starting a new buffer when the current one is full.
    pub fn append(&mut self, value: Option<T>) {
        let needs_buffer = self.buffers.last().map_or(true, Buffer::is_full);
        if needs_buffer {
            self.buffers.push(Buffer::new(self.buffer_capacity));
        }
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.push(value);
        }
        self.length += 1;
        if value.is_none() {
            self.null_count += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.buffers.iter().flat_map(|buffer| buffer.iter())
    }

    pub fn to_vec(&self) -> Vec<Option<T>> {
        self.iter().collect()
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = (T, bool)> + '_ {
        self.buffers.iter().flat_map(|buffer| buffer.slots())
    }

    /// Builds a new column holding `self[indices[0]], self[indices[1]], ...`.
    /// All indices are validated before anything is copied.
    pub fn gather(&self, indices: &[usize]) -> Result<Self, ColframeError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.length) {
            return Err(ColframeError::IndexOutOfRange {
                index: bad,
                length: self.length,
            });
        }
        let mut gathered = self.empty_like::<T>();
        for &index in indices {
            gathered.append(self.get(index)?);
        }
        Ok(gathered)
    }

    /// The elementwise apply primitive: calls `f` exactly once per slot, in
    /// logical order, with the nullable value and its index, and stores
    /// whatever `f` returns (including `None`).
    pub fn apply<O, F>(&self, mut f: F) -> PrimitiveColumn<O>
    where
        O: Element,
        F: FnMut(Option<T>, usize) -> Option<O>,
    {
        let mut output = self.empty_like::<O>();
        for (index, value) in self.iter().enumerate() {
            output.append(f(value, index));
        }
        output
    }
}

impl<T: Element> Extend<Option<T>> for PrimitiveColumn<T> {
    fn extend<I: IntoIterator<Item = Option<T>>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

//==================================================================================
// 3. Buffer-Level Kernels (used by the elementwise engine)
//==================================================================================
impl<T: Element> PrimitiveColumn<T> {
    /// Maps every valid slot through `f`, keeping the validity layout. Null
    /// slots are never passed to `f`; their output payload is `O::default()`.
    pub(crate) fn map_valid<O, F>(&self, mut f: F) -> Result<PrimitiveColumn<O>, ColframeError>
    where
        O: Element,
        F: FnMut(T) -> Result<O, ColframeError>,
    {
        let mut buffers = Vec::with_capacity(self.buffers.len());
        for buffer in &self.buffers {
            let mut values = Vec::with_capacity(buffer.len());
            for (value, valid) in buffer.slots() {
                values.push(if valid { f(value)? } else { O::default() });
            }
            buffers.push(Buffer::from_parts(
                values,
                buffer.validity().clone(),
                self.buffer_capacity,
            )?);
        }
        PrimitiveColumn::from_buffers(self.name.clone(), self.buffer_capacity, buffers)
    }

    /// Combines `self` and `right` slot by slot. The output slot is valid iff
    /// both inputs are valid, and `f` only ever sees pairs of valid values.
    /// The output takes `self`'s buffer layout; `right` may be chunked differently.
    pub(crate) fn zip_valid<R, O, F>(
        &self,
        right: &PrimitiveColumn<R>,
        mut f: F,
    ) -> Result<PrimitiveColumn<O>, ColframeError>
    where
        R: Element,
        O: Element,
        F: FnMut(T, R) -> Result<O, ColframeError>,
    {
        if self.length != right.len() {
            return Err(ColframeError::LengthMismatch {
                left: self.length,
                right: right.len(),
            });
        }
        let mut right_slots = right.slots();
        let mut buffers = Vec::with_capacity(self.buffers.len());
        for buffer in &self.buffers {
            let mut values = Vec::with_capacity(buffer.len());
            let mut validity = ValidityBitmap::with_capacity(buffer.len());
            for (left_value, left_valid) in buffer.slots() {
                let (right_value, right_valid) = right_slots.next().ok_or_else(|| {
                    ColframeError::InternalError("right column ended early".to_string())
                })?;
                if left_valid && right_valid {
                    values.push(f(left_value, right_value)?);
                    validity.push(true);
                } else {
                    values.push(O::default());
                    validity.push(false);
                }
            }
            buffers.push(Buffer::from_parts(values, validity, self.buffer_capacity)?);
        }
        PrimitiveColumn::from_buffers(self.name.clone(), self.buffer_capacity, buffers)
    }

    /// Replaces this column's contents with an equally long, fully computed
    /// result. Used by in-place operations once every slot has succeeded.
    pub(crate) fn commit(&mut self, result: PrimitiveColumn<T>) -> Result<(), ColframeError> {
        if result.len() != self.length {
            return Err(ColframeError::LengthMismatch {
                left: self.length,
                right: result.len(),
            });
        }
        self.buffers = result.buffers;
        self.buffer_capacity = result.buffer_capacity;
        self.null_count = result.null_count;
        Ok(())
    }

    /// A column of the same shape with every slot null.
    pub(crate) fn all_null_like<O: Element>(&self) -> PrimitiveColumn<O> {
        let mut output = self.empty_like::<O>();
        output.extend(std::iter::repeat(None).take(self.length));
        output
    }
}

//==================================================================================
// 4. Raw Byte Source
//==================================================================================
impl<T: Element + Pod> PrimitiveColumn<T> {
    /// Builds a column from native-endian value bytes and an optional LSB-first
    /// validity bitmap (absent means every slot is valid).
    pub fn from_raw_parts(
        name: impl Into<String>,
        value_bytes: &[u8],
        validity_bytes: Option<&[u8]>,
        length: usize,
    ) -> Result<Self, ColframeError> {
        let values = bitcast::bytes_to_values::<T>(value_bytes)?;
        if values.len() < length {
            return Err(ColframeError::BufferTooShort {
                required: length * std::mem::size_of::<T>(),
                actual: value_bytes.len(),
            });
        }
        let validity = match validity_bytes {
            Some(bytes) => ValidityBitmap::from_lsb_bytes(bytes, length)?,
            None => ValidityBitmap::all_valid(length),
        };
        let mut column = Self::new(name);
        for (i, value) in values.into_iter().take(length).enumerate() {
            column.append(validity.is_valid(i).then_some(value));
        }
        Ok(column)
    }

    /// The concatenated value bytes and LSB-first validity bytes.
    pub fn to_raw_parts(&self) -> (Vec<u8>, Vec<u8>) {
        let mut value_bytes = Vec::with_capacity(self.length * std::mem::size_of::<T>());
        for buffer in &self.buffers {
            value_bytes.extend(bitcast::values_to_bytes(buffer.values()));
        }
        let validity: ValidityBitmap = self.slots().map(|(_, valid)| valid).collect();
        (value_bytes, validity.to_lsb_bytes())
    }

    /// Reinterprets every value's bits as a same-sized type `O`, keeping validity.
    pub fn reinterpret<O: Element + Pod>(&self) -> Result<PrimitiveColumn<O>, ColframeError> {
        let mut buffers = Vec::with_capacity(self.buffers.len());
        for buffer in &self.buffers {
            let values = bitcast::reinterpret::<T, O>(buffer.values())?;
            buffers.push(Buffer::from_parts(
                values,
                buffer.validity().clone(),
                self.buffer_capacity,
            )?);
        }
        PrimitiveColumn::from_buffers(self.name.clone(), self.buffer_capacity, buffers)
    }
}
