// In: src/column/mod.rs

//! The untyped column surface.
//!
//! `Column` is a closed tagged union with one variant per element type. Every
//! operation matches on the variant exactly once (through the `dispatch!`
//! macros below) and then runs fully monomorphised code on the wrapped
//! `PrimitiveColumn<T>`. Values cross this boundary as `Scalar`s.

use rust_decimal::Decimal;
use std::borrow::Cow;

use crate::config::ColframeConfig;
use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::traits::Element;
use crate::types::{DataType, Scalar};

/// A named, nullable column of any supported element type.
#[derive(Debug, Clone)]
pub enum Column {
    Boolean(PrimitiveColumn<bool>),
    Int8(PrimitiveColumn<i8>),
    Int16(PrimitiveColumn<i16>),
    Int32(PrimitiveColumn<i32>),
    Int64(PrimitiveColumn<i64>),
    UInt8(PrimitiveColumn<u8>),
    UInt16(PrimitiveColumn<u16>),
    UInt32(PrimitiveColumn<u32>),
    UInt64(PrimitiveColumn<u64>),
    Float32(PrimitiveColumn<f32>),
    Float64(PrimitiveColumn<f64>),
    Decimal(PrimitiveColumn<Decimal>),
}

//==================================================================================
// 0. Dispatch Macros
//==================================================================================

/// Runs `$body` with `$inner` bound to the typed column inside `$column`.
macro_rules! dispatch {
    ($column:expr, $inner:ident => $body:expr) => {
        match $column {
            Column::Boolean($inner) => $body,
            Column::Int8($inner) => $body,
            Column::Int16($inner) => $body,
            Column::Int32($inner) => $body,
            Column::Int64($inner) => $body,
            Column::UInt8($inner) => $body,
            Column::UInt16($inner) => $body,
            Column::UInt32($inner) => $body,
            Column::UInt64($inner) => $body,
            Column::Float32($inner) => $body,
            Column::Float64($inner) => $body,
            Column::Decimal($inner) => $body,
        }
    };
}

/// Like `dispatch!`, for two columns that have already been unified to the
/// same element type.
macro_rules! dispatch_pair {
    ($left:expr, $right:expr, $l:ident, $r:ident => $body:expr) => {
        match ($left, $right) {
            (Column::Boolean($l), Column::Boolean($r)) => $body,
            (Column::Int8($l), Column::Int8($r)) => $body,
            (Column::Int16($l), Column::Int16($r)) => $body,
            (Column::Int32($l), Column::Int32($r)) => $body,
            (Column::Int64($l), Column::Int64($r)) => $body,
            (Column::UInt8($l), Column::UInt8($r)) => $body,
            (Column::UInt16($l), Column::UInt16($r)) => $body,
            (Column::UInt32($l), Column::UInt32($r)) => $body,
            (Column::UInt64($l), Column::UInt64($r)) => $body,
            (Column::Float32($l), Column::Float32($r)) => $body,
            (Column::Float64($l), Column::Float64($r)) => $body,
            (Column::Decimal($l), Column::Decimal($r)) => $body,
            (l, r) => Err(ColframeError::InternalError(format!(
                "operands were not unified: {} vs {}",
                l.data_type(),
                r.data_type()
            ))),
        }
    };
}

mod aggregate;
mod binary_ops;
mod cast;
mod rolling;
mod unary_ops;

#[cfg(test)]
mod column_tests;

pub use rolling::ColumnRolling;

impl<T: Element> From<PrimitiveColumn<T>> for Column {
    fn from(column: PrimitiveColumn<T>) -> Self {
        T::into_column(column)
    }
}

//==================================================================================
// 1. Construction
//==================================================================================
impl Column {
    /// An empty column of `data_type` using the default configuration.
    pub fn new_empty(name: impl Into<String>, data_type: DataType) -> Self {
        Self::with_config(name, data_type, &ColframeConfig::default())
    }

    pub fn with_config(
        name: impl Into<String>,
        data_type: DataType,
        config: &ColframeConfig,
    ) -> Self {
        let name = name.into();
        match data_type {
            DataType::Boolean => Column::Boolean(PrimitiveColumn::with_config(name, config)),
            DataType::Int8 => Column::Int8(PrimitiveColumn::with_config(name, config)),
            DataType::Int16 => Column::Int16(PrimitiveColumn::with_config(name, config)),
            DataType::Int32 => Column::Int32(PrimitiveColumn::with_config(name, config)),
            DataType::Int64 => Column::Int64(PrimitiveColumn::with_config(name, config)),
            DataType::UInt8 => Column::UInt8(PrimitiveColumn::with_config(name, config)),
            DataType::UInt16 => Column::UInt16(PrimitiveColumn::with_config(name, config)),
            DataType::UInt32 => Column::UInt32(PrimitiveColumn::with_config(name, config)),
            DataType::UInt64 => Column::UInt64(PrimitiveColumn::with_config(name, config)),
            DataType::Float32 => Column::Float32(PrimitiveColumn::with_config(name, config)),
            DataType::Float64 => Column::Float64(PrimitiveColumn::with_config(name, config)),
            DataType::Decimal => Column::Decimal(PrimitiveColumn::with_config(name, config)),
        }
    }
}

//==================================================================================
// 2. Metadata and Logical Access
//==================================================================================
impl Column {
    pub fn name(&self) -> &str {
        dispatch!(self, c => c.name())
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        dispatch!(self, c => c.rename(name))
    }

    pub fn len(&self) -> usize {
        dispatch!(self, c => c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        dispatch!(self, c => c.null_count())
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Boolean(_) => DataType::Boolean,
            Column::Int8(_) => DataType::Int8,
            Column::Int16(_) => DataType::Int16,
            Column::Int32(_) => DataType::Int32,
            Column::Int64(_) => DataType::Int64,
            Column::UInt8(_) => DataType::UInt8,
            Column::UInt16(_) => DataType::UInt16,
            Column::UInt32(_) => DataType::UInt32,
            Column::UInt64(_) => DataType::UInt64,
            Column::Float32(_) => DataType::Float32,
            Column::Float64(_) => DataType::Float64,
            Column::Decimal(_) => DataType::Decimal,
        }
    }

    /// The typed column, if this column holds `T`s.
    pub fn as_primitive<T: Element>(&self) -> Option<&PrimitiveColumn<T>> {
        T::column_ref(self)
    }

    pub fn as_primitive_mut<T: Element>(&mut self) -> Option<&mut PrimitiveColumn<T>> {
        T::column_mut(self)
    }

    pub fn get(&self, index: usize) -> Result<Scalar, ColframeError> {
        dispatch!(self, c => Ok(c.get(index)?.map_or(Scalar::Null, Element::into_scalar)))
    }

    pub fn is_valid(&self, index: usize) -> Result<bool, ColframeError> {
        dispatch!(self, c => c.is_valid(index))
    }

    /// Writes `value` at `index`. The scalar must be `Null` or exactly this
    /// column's element type; nothing is converted implicitly.
    pub fn set(&mut self, index: usize, value: impl Into<Scalar>) -> Result<(), ColframeError> {
        let value = value.into();
        dispatch!(self, c => set_scalar(c, index, &value))
    }

    pub fn append(&mut self, value: impl Into<Scalar>) -> Result<(), ColframeError> {
        let value = value.into();
        dispatch!(self, c => append_scalar(c, &value))
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Scalar> + '_> {
        dispatch!(self, c => Box::new(
            c.iter().map(|v| v.map_or(Scalar::Null, Element::into_scalar))
        ) as Box<dyn Iterator<Item = Scalar> + '_>)
    }

    pub fn to_vec(&self) -> Vec<Scalar> {
        self.iter().collect()
    }

    /// Reorders (or subsets) rows: output row `k` is input row `indices[k]`.
    pub fn gather(&self, indices: &[usize]) -> Result<Column, ColframeError> {
        dispatch!(self, c => c.gather(indices).map(Column::from))
    }
}

fn set_scalar<T: Element>(
    column: &mut PrimitiveColumn<T>,
    index: usize,
    value: &Scalar,
) -> Result<(), ColframeError> {
    let value = T::from_nullable_scalar(value)?;
    column.set(index, value)
}

fn append_scalar<T: Element>(
    column: &mut PrimitiveColumn<T>,
    value: &Scalar,
) -> Result<(), ColframeError> {
    let value = T::from_nullable_scalar(value)?;
    column.append(value);
    Ok(())
}

//==================================================================================
// 3. Sort and Rolling Windows
//==================================================================================
impl Column {
    /// The permutation that orders this column's values, nulls last.
    pub fn sort_permutation(&self, ascending: bool) -> Vec<usize> {
        dispatch!(self, c => crate::sort::sort_permutation(c, ascending))
    }

    /// A new, reordered column; `self` is not modified.
    pub fn sort(&self, ascending: bool) -> Result<Column, ColframeError> {
        let permutation = self.sort_permutation(ascending);
        self.gather(&permutation)
    }

    pub fn rolling(&self, window: usize) -> Result<ColumnRolling<'_>, ColframeError> {
        ColumnRolling::new(self, window)
    }

    /// This column if it already holds `target`, else a promoted copy.
    pub(crate) fn promoted(&self, target: DataType) -> Result<Cow<'_, Column>, ColframeError> {
        if self.data_type() == target {
            return Ok(Cow::Borrowed(self));
        }
        self.cast(target).map(Cow::Owned)
    }
}
