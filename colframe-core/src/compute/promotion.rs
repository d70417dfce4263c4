//! The static type-promotion table.
//!
//! | left \ right      | same type | boolean     | decimal | other numeric |
//! |-------------------|-----------|-------------|---------|---------------|
//! | same type         | no-op     |             |         |               |
//! | boolean           |           | no-op       | reject  | reject        |
//! | decimal           |           | reject      | no-op   | decimal       |
//! | other numeric     |           | reject      | decimal | float64       |
//!
//! Whether the resolved type actually supports the operator is decided
//! afterwards by the kernel lookup in `arithmetic`.

use std::fmt;

use crate::error::ColframeError;
use crate::types::DataType;

/// Resolves the type both operands of `op` are converted to before computing.
pub fn resolve(
    op: impl fmt::Display,
    left: DataType,
    right: DataType,
) -> Result<DataType, ColframeError> {
    if left == right {
        return Ok(left);
    }
    if left.is_boolean() || right.is_boolean() {
        return Err(ColframeError::unsupported_pair(op, left, right));
    }
    let resolved = if left.is_decimal() || right.is_decimal() {
        DataType::Decimal
    } else {
        DataType::Float64
    };
    log::debug!("{}: promoting {} and {} to {}", op, left, right, resolved);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_types_are_not_promoted() {
        for dt in DataType::ALL {
            assert_eq!(resolve("add", dt, dt).unwrap(), dt);
        }
    }

    #[test]
    fn test_mixed_numeric_promotes_to_float64() {
        assert_eq!(
            resolve("add", DataType::Int32, DataType::Int64).unwrap(),
            DataType::Float64
        );
        assert_eq!(
            resolve("add", DataType::UInt8, DataType::Float32).unwrap(),
            DataType::Float64
        );
    }

    #[test]
    fn test_decimal_wins() {
        assert_eq!(
            resolve("multiply", DataType::Float64, DataType::Decimal).unwrap(),
            DataType::Decimal
        );
        assert_eq!(
            resolve("multiply", DataType::Decimal, DataType::Int8).unwrap(),
            DataType::Decimal
        );
    }

    #[test]
    fn test_boolean_mixed_with_anything_is_rejected() {
        for dt in DataType::ALL.into_iter().filter(|dt| !dt.is_boolean()) {
            assert!(matches!(
                resolve("add", DataType::Boolean, dt),
                Err(ColframeError::UnsupportedOperation(_))
            ));
            assert!(resolve("equals", dt, DataType::Boolean).is_err());
        }
    }
}
