// In: src/compute/arithmetic.rs

//! Stateless per-type scalar kernels.
//!
//! `Arithmetic` is implemented once per element type and hands out plain `fn`
//! pointers. Callers resolve the kernel a single time per operation (which is
//! also where unsupported type/operator pairs are rejected) and then run it in a
//! tight loop over valid slots only.
//!
//! Semantics per family:
//! - integers: wrapping add/subtract/multiply, `DivideByZero` on a zero divisor,
//!   bitwise and/or/xor, wrapping shifts (the amount is masked to the bit width);
//! - floats: IEEE-754, no bitwise operators, no shifts;
//! - decimal: checked arithmetic (`ArithmeticOverflow`), `DivideByZero`, no
//!   bitwise operators, no shifts;
//! - boolean: logical and/or/xor plus equality only, no abs or round.
//!
//! `abs` wraps for integers (`i8::MIN.abs()` is `i8::MIN`) and `round` rounds
//! half to even; it is the identity for integers.

use num_traits::{
    CheckedDiv, CheckedRem, Float, PrimInt, WrappingAdd, WrappingMul, WrappingNeg, WrappingShl,
    WrappingShr, WrappingSub, Zero,
};
use rust_decimal::Decimal;

use crate::compute::{BinaryOp, ComparisonOp, ShiftOp, UnaryOp};
use crate::error::ColframeError;
use crate::traits::Element;

pub type BinaryKernel<T> = fn(T, T) -> Result<T, ColframeError>;
pub type ComparisonKernel<T> = fn(&T, &T) -> bool;
pub type ShiftKernel<T> = fn(T, u32) -> T;
pub type UnaryKernel<T> = fn(T) -> T;

/// An element type the elementwise engine can compute on.
pub trait Arithmetic: Element {
    fn binary_kernel(op: BinaryOp) -> Result<BinaryKernel<Self>, ColframeError>;

    /// Every element type supports all six comparisons unless it says otherwise.
    fn comparison_kernel(op: ComparisonOp) -> Result<ComparisonKernel<Self>, ColframeError> {
        Ok(ordering_kernel::<Self>(op))
    }

    fn shift_kernel(op: ShiftOp) -> Result<ShiftKernel<Self>, ColframeError> {
        Err(ColframeError::unsupported(op, Self::DATA_TYPE))
    }

    fn unary_kernel(op: UnaryOp) -> Result<UnaryKernel<Self>, ColframeError> {
        Err(ColframeError::unsupported(op, Self::DATA_TYPE))
    }
}

fn identity<T>(a: T) -> T {
    a
}

//==================================================================================
// 1. Comparisons
//==================================================================================

fn eq<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

fn ne<T: PartialEq>(a: &T, b: &T) -> bool {
    a != b
}

fn ge<T: PartialOrd>(a: &T, b: &T) -> bool {
    a >= b
}

fn le<T: PartialOrd>(a: &T, b: &T) -> bool {
    a <= b
}

fn gt<T: PartialOrd>(a: &T, b: &T) -> bool {
    a > b
}

fn lt<T: PartialOrd>(a: &T, b: &T) -> bool {
    a < b
}

// Float comparisons go through `PartialOrd`, so any comparison against NaN other
// than `not_equals` is false.
fn ordering_kernel<T: PartialOrd>(op: ComparisonOp) -> ComparisonKernel<T> {
    match op {
        ComparisonOp::Equals => eq::<T>,
        ComparisonOp::NotEquals => ne::<T>,
        ComparisonOp::GreaterThanOrEqual => ge::<T>,
        ComparisonOp::LessThanOrEqual => le::<T>,
        ComparisonOp::GreaterThan => gt::<T>,
        ComparisonOp::LessThan => lt::<T>,
    }
}

//==================================================================================
// 2. Integers
//==================================================================================

fn int_add<T: WrappingAdd>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a.wrapping_add(&b))
}

fn int_sub<T: WrappingSub>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a.wrapping_sub(&b))
}

fn int_mul<T: WrappingMul>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a.wrapping_mul(&b))
}

fn int_div<T: PrimInt>(a: T, b: T) -> Result<T, ColframeError> {
    if b.is_zero() {
        return Err(ColframeError::DivideByZero);
    }
    // With a non-zero divisor the only overflow is MIN / -1, which wraps to MIN.
    Ok(a.checked_div(&b).unwrap_or(a))
}

fn int_rem<T: PrimInt + CheckedRem>(a: T, b: T) -> Result<T, ColframeError> {
    if b.is_zero() {
        return Err(ColframeError::DivideByZero);
    }
    // MIN % -1 wraps to zero.
    Ok(a.checked_rem(&b).unwrap_or_else(T::zero))
}

fn int_and<T: PrimInt>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a & b)
}

fn int_or<T: PrimInt>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a | b)
}

fn int_xor<T: PrimInt>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a ^ b)
}

fn int_shl<T: WrappingShl>(a: T, amount: u32) -> T {
    a.wrapping_shl(amount)
}

// Arithmetic for signed types, logical for unsigned ones.
fn int_shr<T: WrappingShr>(a: T, amount: u32) -> T {
    a.wrapping_shr(amount)
}

fn int_abs<T: PrimInt + WrappingNeg>(a: T) -> T {
    if a < T::zero() {
        a.wrapping_neg()
    } else {
        a
    }
}

trait IntegerKernels:
    PrimInt
    + CheckedRem
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + WrappingShl
    + WrappingShr
{
}

impl<T> IntegerKernels for T where
    T: PrimInt
        + CheckedRem
        + WrappingAdd
        + WrappingSub
        + WrappingMul
        + WrappingNeg
        + WrappingShl
        + WrappingShr
{
}

fn integer_binary_kernel<T: IntegerKernels>(op: BinaryOp) -> BinaryKernel<T> {
    match op {
        BinaryOp::Add => int_add::<T>,
        BinaryOp::Subtract => int_sub::<T>,
        BinaryOp::Multiply => int_mul::<T>,
        BinaryOp::Divide => int_div::<T>,
        BinaryOp::Modulo => int_rem::<T>,
        BinaryOp::And => int_and::<T>,
        BinaryOp::Or => int_or::<T>,
        BinaryOp::Xor => int_xor::<T>,
    }
}

fn integer_shift_kernel<T: IntegerKernels>(op: ShiftOp) -> ShiftKernel<T> {
    match op {
        ShiftOp::Left => int_shl::<T>,
        ShiftOp::Right => int_shr::<T>,
    }
}

fn integer_unary_kernel<T: IntegerKernels>(op: UnaryOp) -> UnaryKernel<T> {
    match op {
        UnaryOp::Abs => int_abs::<T>,
        UnaryOp::Round => identity::<T>,
    }
}

macro_rules! impl_integer_arithmetic {
    ($($native:ty),* $(,)?) => {
        $(
            impl Arithmetic for $native {
                fn binary_kernel(op: BinaryOp) -> Result<BinaryKernel<Self>, ColframeError> {
                    Ok(integer_binary_kernel::<$native>(op))
                }

                fn shift_kernel(op: ShiftOp) -> Result<ShiftKernel<Self>, ColframeError> {
                    Ok(integer_shift_kernel::<$native>(op))
                }

                fn unary_kernel(op: UnaryOp) -> Result<UnaryKernel<Self>, ColframeError> {
                    Ok(integer_unary_kernel::<$native>(op))
                }
            }
        )*
    };
}

impl_integer_arithmetic!(i8, i16, i32, i64, u8, u16, u32, u64);

//==================================================================================
// 3. Floats
//==================================================================================

fn float_add<T: Float>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a + b)
}

fn float_sub<T: Float>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a - b)
}

fn float_mul<T: Float>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a * b)
}

fn float_div<T: Float>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a / b)
}

fn float_rem<T: Float>(a: T, b: T) -> Result<T, ColframeError> {
    Ok(a % b)
}

fn float_binary_kernel<T: Float + Element>(op: BinaryOp) -> Result<BinaryKernel<T>, ColframeError> {
    let kernel: BinaryKernel<T> = match op {
        BinaryOp::Add => float_add::<T>,
        BinaryOp::Subtract => float_sub::<T>,
        BinaryOp::Multiply => float_mul::<T>,
        BinaryOp::Divide => float_div::<T>,
        BinaryOp::Modulo => float_rem::<T>,
        BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => {
            return Err(ColframeError::unsupported(op, T::DATA_TYPE))
        }
    };
    Ok(kernel)
}

fn float_abs<T: Float>(a: T) -> T {
    a.abs()
}

macro_rules! impl_float_arithmetic {
    ($($native:ty),* $(,)?) => {
        $(
            impl Arithmetic for $native {
                fn binary_kernel(op: BinaryOp) -> Result<BinaryKernel<Self>, ColframeError> {
                    float_binary_kernel::<$native>(op)
                }

                fn unary_kernel(op: UnaryOp) -> Result<UnaryKernel<Self>, ColframeError> {
                    let kernel: UnaryKernel<Self> = match op {
                        UnaryOp::Abs => float_abs::<$native>,
                        UnaryOp::Round => <$native>::round_ties_even,
                    };
                    Ok(kernel)
                }
            }
        )*
    };
}

impl_float_arithmetic!(f32, f64);

//==================================================================================
// 4. Decimal
//==================================================================================

fn decimal_overflow(op: BinaryOp, a: Decimal, b: Decimal) -> ColframeError {
    ColframeError::ArithmeticOverflow(format!("{} {} {}", a, op, b))
}

fn decimal_add(a: Decimal, b: Decimal) -> Result<Decimal, ColframeError> {
    a.checked_add(b)
        .ok_or_else(|| decimal_overflow(BinaryOp::Add, a, b))
}

fn decimal_sub(a: Decimal, b: Decimal) -> Result<Decimal, ColframeError> {
    a.checked_sub(b)
        .ok_or_else(|| decimal_overflow(BinaryOp::Subtract, a, b))
}

fn decimal_mul(a: Decimal, b: Decimal) -> Result<Decimal, ColframeError> {
    a.checked_mul(b)
        .ok_or_else(|| decimal_overflow(BinaryOp::Multiply, a, b))
}

fn decimal_div(a: Decimal, b: Decimal) -> Result<Decimal, ColframeError> {
    if b.is_zero() {
        return Err(ColframeError::DivideByZero);
    }
    a.checked_div(b)
        .ok_or_else(|| decimal_overflow(BinaryOp::Divide, a, b))
}

fn decimal_rem(a: Decimal, b: Decimal) -> Result<Decimal, ColframeError> {
    if b.is_zero() {
        return Err(ColframeError::DivideByZero);
    }
    a.checked_rem(b)
        .ok_or_else(|| decimal_overflow(BinaryOp::Modulo, a, b))
}

impl Arithmetic for Decimal {
    fn binary_kernel(op: BinaryOp) -> Result<BinaryKernel<Self>, ColframeError> {
        let kernel: BinaryKernel<Self> = match op {
            BinaryOp::Add => decimal_add,
            BinaryOp::Subtract => decimal_sub,
            BinaryOp::Multiply => decimal_mul,
            BinaryOp::Divide => decimal_div,
            BinaryOp::Modulo => decimal_rem,
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => {
                return Err(ColframeError::unsupported(op, Self::DATA_TYPE))
            }
        };
        Ok(kernel)
    }

    fn unary_kernel(op: UnaryOp) -> Result<UnaryKernel<Self>, ColframeError> {
        // `Decimal::round` is banker's rounding.
        let kernel: UnaryKernel<Self> = match op {
            UnaryOp::Abs => |a: Decimal| a.abs(),
            UnaryOp::Round => |a: Decimal| a.round(),
        };
        Ok(kernel)
    }
}

//==================================================================================
// 5. Boolean
//==================================================================================

fn bool_and(a: bool, b: bool) -> Result<bool, ColframeError> {
    Ok(a & b)
}

fn bool_or(a: bool, b: bool) -> Result<bool, ColframeError> {
    Ok(a | b)
}

fn bool_xor(a: bool, b: bool) -> Result<bool, ColframeError> {
    Ok(a ^ b)
}

impl Arithmetic for bool {
    fn binary_kernel(op: BinaryOp) -> Result<BinaryKernel<Self>, ColframeError> {
        let kernel: BinaryKernel<Self> = match op {
            BinaryOp::And => bool_and,
            BinaryOp::Or => bool_or,
            BinaryOp::Xor => bool_xor,
            _ => return Err(ColframeError::unsupported(op, Self::DATA_TYPE)),
        };
        Ok(kernel)
    }

    fn comparison_kernel(op: ComparisonOp) -> Result<ComparisonKernel<Self>, ColframeError> {
        if !op.is_equality() {
            return Err(ColframeError::unsupported(op, Self::DATA_TYPE));
        }
        Ok(ordering_kernel::<bool>(op))
    }
}
