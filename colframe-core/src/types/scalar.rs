//! The dynamically typed value used at the `Column` boundary: `get`/`set`/`append`
//! on an untyped `Column`, and the broadcast operand of column-vs-scalar operations.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;

use crate::error::ColframeError;
use crate::types::DataType;

/// A single nullable value of any supported element type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
}

impl Scalar {
    /// The element type of this scalar; `None` for `Scalar::Null`, which is untyped.
    pub fn data_type(&self) -> Option<DataType> {
        Some(match self {
            Scalar::Null => return None,
            Scalar::Boolean(_) => DataType::Boolean,
            Scalar::Int8(_) => DataType::Int8,
            Scalar::Int16(_) => DataType::Int16,
            Scalar::Int32(_) => DataType::Int32,
            Scalar::Int64(_) => DataType::Int64,
            Scalar::UInt8(_) => DataType::UInt8,
            Scalar::UInt16(_) => DataType::UInt16,
            Scalar::UInt32(_) => DataType::UInt32,
            Scalar::UInt64(_) => DataType::UInt64,
            Scalar::Float32(_) => DataType::Float32,
            Scalar::Float64(_) => DataType::Float64,
            Scalar::Decimal(_) => DataType::Decimal,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Numeric value widened to `f64`. `None` for null and boolean scalars.
    fn as_f64(&self) -> Option<f64> {
        match *self {
            Scalar::Int8(v) => Some(v as f64),
            Scalar::Int16(v) => Some(v as f64),
            Scalar::Int32(v) => Some(v as f64),
            Scalar::Int64(v) => Some(v as f64),
            Scalar::UInt8(v) => Some(v as f64),
            Scalar::UInt16(v) => Some(v as f64),
            Scalar::UInt32(v) => Some(v as f64),
            Scalar::UInt64(v) => Some(v as f64),
            Scalar::Float32(v) => Some(v as f64),
            Scalar::Float64(v) => Some(v),
            Scalar::Decimal(v) => v.to_f64(),
            Scalar::Null | Scalar::Boolean(_) => None,
        }
    }

    fn as_decimal(&self) -> Result<Option<Decimal>, ColframeError> {
        Ok(match *self {
            Scalar::Int8(v) => Some(Decimal::from(v)),
            Scalar::Int16(v) => Some(Decimal::from(v)),
            Scalar::Int32(v) => Some(Decimal::from(v)),
            Scalar::Int64(v) => Some(Decimal::from(v)),
            Scalar::UInt8(v) => Some(Decimal::from(v)),
            Scalar::UInt16(v) => Some(Decimal::from(v)),
            Scalar::UInt32(v) => Some(Decimal::from(v)),
            Scalar::UInt64(v) => Some(Decimal::from(v)),
            Scalar::Float32(v) => Some(Decimal::from_f32(v).ok_or_else(|| {
                ColframeError::ArithmeticOverflow(format!("{} cannot be represented as Decimal", v))
            })?),
            Scalar::Float64(v) => Some(Decimal::from_f64(v).ok_or_else(|| {
                ColframeError::ArithmeticOverflow(format!("{} cannot be represented as Decimal", v))
            })?),
            Scalar::Decimal(v) => Some(v),
            Scalar::Null | Scalar::Boolean(_) => None,
        })
    }

    /// Converts this scalar to `target`. Identity conversions always succeed, `Null`
    /// stays `Null`; the only other supported targets are the promotion types
    /// `Float64` and `Decimal`.
    pub fn cast_to(&self, target: DataType) -> Result<Scalar, ColframeError> {
        if self.is_null() || self.data_type() == Some(target) {
            return Ok(*self);
        }
        let invalid = || ColframeError::InvalidValueType {
            expected: target,
            actual: self.type_name(),
        };
        match target {
            DataType::Float64 => self.as_f64().map(Scalar::Float64).ok_or_else(invalid),
            DataType::Decimal => self.as_decimal()?.map(Scalar::Decimal).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    pub(crate) fn type_name(&self) -> String {
        self.data_type()
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| "Null".to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Boolean(v) => write!(f, "{}", v),
            Scalar::Int8(v) => write!(f, "{}", v),
            Scalar::Int16(v) => write!(f, "{}", v),
            Scalar::Int32(v) => write!(f, "{}", v),
            Scalar::Int64(v) => write!(f, "{}", v),
            Scalar::UInt8(v) => write!(f, "{}", v),
            Scalar::UInt16(v) => write!(f, "{}", v),
            Scalar::UInt32(v) => write!(f, "{}", v),
            Scalar::UInt64(v) => write!(f, "{}", v),
            Scalar::Float32(v) => write!(f, "{}", v),
            Scalar::Float64(v) => write!(f, "{}", v),
            Scalar::Decimal(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_scalar_from {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for Scalar {
                fn from(value: $native) -> Self {
                    Scalar::$variant(value)
                }
            }

            impl From<Option<$native>> for Scalar {
                fn from(value: Option<$native>) -> Self {
                    value.map(Scalar::$variant).unwrap_or(Scalar::Null)
                }
            }
        )*
    };
}

impl_scalar_from!(
    bool => Boolean,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    Decimal => Decimal,
);
