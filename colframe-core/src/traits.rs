//! This module defines the `Element` trait shared by every typed column, buffer
//! and kernel.
//!
//! `Element` ties a Rust primitive to its `DataType`, its variant in the
//! `Scalar`/`Column` unions, and the conversions used by type promotion. Every
//! dispatch from the untyped `Column` to a concrete `PrimitiveColumn<T>` goes
//! through these impls, so the hot loops are monomorphised per element type.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

use crate::column::Column;
use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::types::{DataType, Scalar};

/// A primitive value that can be stored in a column.
pub trait Element:
    Copy + Default + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static
{
    const DATA_TYPE: DataType;

    /// A total order over all values, including floating-point NaNs.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Widening conversion used by promotion to `Float64`.
    fn to_f64(self) -> f64;

    /// Conversion used by promotion to `Decimal`. Fails for non-finite floats.
    fn to_decimal(self) -> Result<Decimal, ColframeError>;

    fn into_scalar(self) -> Scalar;

    /// Extracts a value of exactly this type; no implicit conversion.
    fn from_scalar(scalar: &Scalar) -> Option<Self>;

    /// Like `from_scalar`, but `Scalar::Null` maps to `Ok(None)` and any other
    /// type mismatch is an `InvalidValueType` error.
    fn from_nullable_scalar(scalar: &Scalar) -> Result<Option<Self>, ColframeError> {
        if scalar.is_null() {
            return Ok(None);
        }
        Self::from_scalar(scalar)
            .map(Some)
            .ok_or_else(|| ColframeError::InvalidValueType {
                expected: Self::DATA_TYPE,
                actual: scalar.type_name(),
            })
    }

    fn into_column(column: PrimitiveColumn<Self>) -> Column;

    fn column_ref(column: &Column) -> Option<&PrimitiveColumn<Self>>;

    fn column_mut(column: &mut Column) -> Option<&mut PrimitiveColumn<Self>>;
}

// Implement the parts of `Element` that only depend on the variant name.
macro_rules! impl_element_variant {
    ($variant:ident) => {
        const DATA_TYPE: DataType = DataType::$variant;

        fn into_scalar(self) -> Scalar {
            Scalar::$variant(self)
        }

        fn from_scalar(scalar: &Scalar) -> Option<Self> {
            match scalar {
                Scalar::$variant(v) => Some(*v),
                _ => None,
            }
        }

        fn into_column(column: PrimitiveColumn<Self>) -> Column {
            Column::$variant(column)
        }

        fn column_ref(column: &Column) -> Option<&PrimitiveColumn<Self>> {
            match column {
                Column::$variant(c) => Some(c),
                _ => None,
            }
        }

        fn column_mut(column: &mut Column) -> Option<&mut PrimitiveColumn<Self>> {
            match column {
                Column::$variant(c) => Some(c),
                _ => None,
            }
        }
    };
}

macro_rules! impl_integer_element {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $native {
                impl_element_variant!($variant);

                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn to_decimal(self) -> Result<Decimal, ColframeError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($native:ty => $variant:ident, $from_float:ident),* $(,)?) => {
        $(
            impl Element for $native {
                impl_element_variant!($variant);

                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$native>::total_cmp(self, other)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn to_decimal(self) -> Result<Decimal, ColframeError> {
                    Decimal::$from_float(self).ok_or_else(|| {
                        ColframeError::ArithmeticOverflow(format!(
                            "{} cannot be represented as Decimal",
                            self
                        ))
                    })
                }
            }
        )*
    };
}

impl_integer_element!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
);

impl_float_element!(
    f32 => Float32, from_f32,
    f64 => Float64, from_f64,
);

impl Element for bool {
    impl_element_variant!(Boolean);

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    fn to_decimal(self) -> Result<Decimal, ColframeError> {
        Ok(if self { Decimal::ONE } else { Decimal::ZERO })
    }
}

impl Element for Decimal {
    impl_element_variant!(Decimal);

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    fn to_decimal(self) -> Result<Decimal, ColframeError> {
        Ok(self)
    }
}
