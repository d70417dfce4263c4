// In: src/compute/elementwise.rs

//! Typed drivers for the elementwise engine.
//!
//! Every driver resolves its kernel before touching any buffer, so an
//! unsupported operator fails without allocating. Kernels only ever see pairs
//! of valid values: validity is computed first and null slots are written with
//! a default payload, so e.g. a division by a null slot's zero payload can never
//! raise. In-place drivers build the complete result first and commit it only
//! after every slot has succeeded.

use crate::compute::arithmetic::Arithmetic;
use crate::compute::{BinaryOp, ComparisonOp, ShiftOp, UnaryOp};
use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::types::Scalar;

//==================================================================================
// 1. Arithmetic and Bitwise
//==================================================================================

/// `left[i] op right[i]` for two columns of the same element type.
pub fn binary<T: Arithmetic>(
    left: &PrimitiveColumn<T>,
    right: &PrimitiveColumn<T>,
    op: BinaryOp,
) -> Result<PrimitiveColumn<T>, ColframeError> {
    let kernel = T::binary_kernel(op)?;
    left.zip_valid(right, kernel)
}

/// `left[i] op scalar`, or `scalar op left[i]` when `reverse` is set. A null
/// scalar yields an all-null column once the operator has been validated.
pub fn binary_scalar<T: Arithmetic>(
    column: &PrimitiveColumn<T>,
    scalar: &Scalar,
    op: BinaryOp,
    reverse: bool,
) -> Result<PrimitiveColumn<T>, ColframeError> {
    let kernel = T::binary_kernel(op)?;
    match T::from_nullable_scalar(scalar)? {
        None => Ok(column.all_null_like()),
        Some(value) if reverse => column.map_valid(|x| kernel(value, x)),
        Some(value) => column.map_valid(|x| kernel(x, value)),
    }
}

pub fn binary_in_place<T: Arithmetic>(
    left: &mut PrimitiveColumn<T>,
    right: &PrimitiveColumn<T>,
    op: BinaryOp,
) -> Result<(), ColframeError> {
    let result = binary(left, right, op)?;
    left.commit(result)
}

pub fn binary_scalar_in_place<T: Arithmetic>(
    column: &mut PrimitiveColumn<T>,
    scalar: &Scalar,
    op: BinaryOp,
    reverse: bool,
) -> Result<(), ColframeError> {
    let result = binary_scalar(column, scalar, op, reverse)?;
    column.commit(result)
}

//==================================================================================
// 2. Comparisons
//==================================================================================

pub fn compare<T: Arithmetic>(
    left: &PrimitiveColumn<T>,
    right: &PrimitiveColumn<T>,
    op: ComparisonOp,
) -> Result<PrimitiveColumn<bool>, ColframeError> {
    let kernel = T::comparison_kernel(op)?;
    left.zip_valid(right, |a, b| Ok(kernel(&a, &b)))
}

pub fn compare_scalar<T: Arithmetic>(
    column: &PrimitiveColumn<T>,
    scalar: &Scalar,
    op: ComparisonOp,
) -> Result<PrimitiveColumn<bool>, ColframeError> {
    let kernel = T::comparison_kernel(op)?;
    match T::from_nullable_scalar(scalar)? {
        None => Ok(column.all_null_like()),
        Some(value) => column.map_valid(|x| Ok(kernel(&x, &value))),
    }
}

//==================================================================================
// 3. Shifts
//==================================================================================

/// Shifts every valid value by `amount` bits. The amount is reinterpreted as
/// `u32` and masked to the element's bit width, so `x << 33` on a 32-bit column
/// is `x << 1` and a negative amount shifts by its two's-complement low bits.
pub fn shift<T: Arithmetic>(
    column: &PrimitiveColumn<T>,
    amount: i32,
    op: ShiftOp,
) -> Result<PrimitiveColumn<T>, ColframeError> {
    let kernel = T::shift_kernel(op)?;
    if amount < 0 || amount as u32 >= T::DATA_TYPE.bit_width() {
        log::trace!(
            "{} by {} on {} is masked to the low bits of the amount",
            op,
            amount,
            T::DATA_TYPE
        );
    }
    let amount = amount as u32;
    column.map_valid(|x| Ok(kernel(x, amount)))
}

pub fn shift_in_place<T: Arithmetic>(
    column: &mut PrimitiveColumn<T>,
    amount: i32,
    op: ShiftOp,
) -> Result<(), ColframeError> {
    let result = shift(column, amount, op)?;
    column.commit(result)
}

//==================================================================================
// 4. Unary
//==================================================================================

/// Maps every valid value through `op`; null slots stay null.
pub fn unary<T: Arithmetic>(
    column: &PrimitiveColumn<T>,
    op: UnaryOp,
) -> Result<PrimitiveColumn<T>, ColframeError> {
    let kernel = T::unary_kernel(op)?;
    column.map_valid(|x| Ok(kernel(x)))
}

pub fn unary_in_place<T: Arithmetic>(
    column: &mut PrimitiveColumn<T>,
    op: UnaryOp,
) -> Result<(), ColframeError> {
    let result = unary(column, op)?;
    column.commit(result)
}
