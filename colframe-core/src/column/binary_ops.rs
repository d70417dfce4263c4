// In: src/column/binary_ops.rs

//! Elementwise operators on untyped columns.
//!
//! Each call follows the same sequence: resolve the computation type through
//! the promotion table, reject in-place calls that would change the receiver's
//! type, convert the operands, then hand the unified typed columns to the
//! drivers in `compute::elementwise`. Nothing is mutated until every slot of
//! the result has been computed.

use crate::column::Column;
use crate::compute::{elementwise, promotion, BinaryOp, ComparisonOp, ShiftOp};
use crate::error::ColframeError;
use crate::types::{DataType, Scalar};

//==================================================================================
// 1. Generic Entry Points
//==================================================================================
impl Column {
    /// `self[i] op other[i]` as a new column of the promoted type.
    pub fn binary(&self, other: &Column, op: BinaryOp) -> Result<Column, ColframeError> {
        let target = promotion::resolve(op, self.data_type(), other.data_type())?;
        let left = self.promoted(target)?;
        let right = other.promoted(target)?;
        dispatch_pair!(left.as_ref(), right.as_ref(), l, r => {
            elementwise::binary(l, r, op).map(Column::from)
        })
    }

    /// `self[i] op scalar`, or `scalar op self[i]` when `reverse` is set.
    pub fn binary_scalar(
        &self,
        scalar: Scalar,
        op: BinaryOp,
        reverse: bool,
    ) -> Result<Column, ColframeError> {
        let target = self.scalar_target(op, &scalar)?;
        let column = self.promoted(target)?;
        let scalar = scalar.cast_to(target)?;
        dispatch!(column.as_ref(), c => {
            elementwise::binary_scalar(c, &scalar, op, reverse).map(Column::from)
        })
    }

    pub fn binary_in_place(
        &mut self,
        other: &Column,
        op: BinaryOp,
    ) -> Result<&mut Column, ColframeError> {
        let target = promotion::resolve(op, self.data_type(), other.data_type())?;
        self.check_in_place(target)?;
        let right = other.promoted(target)?;
        dispatch_pair!(&mut *self, right.as_ref(), l, r => {
            elementwise::binary_in_place(l, r, op)
        })?;
        Ok(self)
    }

    pub fn binary_scalar_in_place(
        &mut self,
        scalar: Scalar,
        op: BinaryOp,
        reverse: bool,
    ) -> Result<&mut Column, ColframeError> {
        let target = self.scalar_target(op, &scalar)?;
        self.check_in_place(target)?;
        let scalar = scalar.cast_to(target)?;
        dispatch!(&mut *self, c => {
            elementwise::binary_scalar_in_place(c, &scalar, op, reverse)
        })?;
        Ok(self)
    }

    /// Compares row by row; the result is always a `Boolean` column.
    pub fn compare(&self, other: &Column, op: ComparisonOp) -> Result<Column, ColframeError> {
        let target = promotion::resolve(op, self.data_type(), other.data_type())?;
        let left = self.promoted(target)?;
        let right = other.promoted(target)?;
        dispatch_pair!(left.as_ref(), right.as_ref(), l, r => {
            elementwise::compare(l, r, op).map(Column::Boolean)
        })
    }

    pub fn compare_scalar(&self, scalar: Scalar, op: ComparisonOp) -> Result<Column, ColframeError> {
        let target = self.scalar_target(op, &scalar)?;
        let column = self.promoted(target)?;
        let scalar = scalar.cast_to(target)?;
        dispatch!(column.as_ref(), c => {
            elementwise::compare_scalar(c, &scalar, op).map(Column::Boolean)
        })
    }

    /// Bit shift of an integer column; any other element type is rejected.
    pub fn shift(&self, amount: i32, op: ShiftOp) -> Result<Column, ColframeError> {
        dispatch!(self, c => elementwise::shift(c, amount, op).map(Column::from))
    }

    pub fn shift_in_place(&mut self, amount: i32, op: ShiftOp) -> Result<&mut Column, ColframeError> {
        dispatch!(&mut *self, c => elementwise::shift_in_place(c, amount, op))?;
        Ok(self)
    }

    /// A null scalar is untyped and never forces a promotion.
    fn scalar_target(
        &self,
        op: impl std::fmt::Display,
        scalar: &Scalar,
    ) -> Result<DataType, ColframeError> {
        match scalar.data_type() {
            Some(scalar_type) => promotion::resolve(op, self.data_type(), scalar_type),
            None => Ok(self.data_type()),
        }
    }

    fn check_in_place(&self, target: DataType) -> Result<(), ColframeError> {
        if target != self.data_type() {
            return Err(ColframeError::InvalidValueType {
                expected: self.data_type(),
                actual: target.to_string(),
            });
        }
        Ok(())
    }
}

//==================================================================================
// 2. Named Operators
//==================================================================================

macro_rules! binary_operators {
    ($(
        $op:expr => $name:ident, $scalar:ident, $reverse:ident,
            $in_place:ident, $scalar_in_place:ident, $reverse_in_place:ident;
    )*) => {
        impl Column {
            $(
                pub fn $name(&self, other: &Column) -> Result<Column, ColframeError> {
                    self.binary(other, $op)
                }

                pub fn $scalar(&self, scalar: impl Into<Scalar>) -> Result<Column, ColframeError> {
                    self.binary_scalar(scalar.into(), $op, false)
                }

                pub fn $reverse(&self, scalar: impl Into<Scalar>) -> Result<Column, ColframeError> {
                    self.binary_scalar(scalar.into(), $op, true)
                }

                pub fn $in_place(&mut self, other: &Column) -> Result<&mut Column, ColframeError> {
                    self.binary_in_place(other, $op)
                }

                pub fn $scalar_in_place(
                    &mut self,
                    scalar: impl Into<Scalar>,
                ) -> Result<&mut Column, ColframeError> {
                    self.binary_scalar_in_place(scalar.into(), $op, false)
                }

                pub fn $reverse_in_place(
                    &mut self,
                    scalar: impl Into<Scalar>,
                ) -> Result<&mut Column, ColframeError> {
                    self.binary_scalar_in_place(scalar.into(), $op, true)
                }
            )*
        }
    };
}

binary_operators! {
    BinaryOp::Add => add, add_scalar, reverse_add,
        add_in_place, add_scalar_in_place, reverse_add_in_place;
    BinaryOp::Subtract => subtract, subtract_scalar, reverse_subtract,
        subtract_in_place, subtract_scalar_in_place, reverse_subtract_in_place;
    BinaryOp::Multiply => multiply, multiply_scalar, reverse_multiply,
        multiply_in_place, multiply_scalar_in_place, reverse_multiply_in_place;
    BinaryOp::Divide => divide, divide_scalar, reverse_divide,
        divide_in_place, divide_scalar_in_place, reverse_divide_in_place;
    BinaryOp::Modulo => modulo, modulo_scalar, reverse_modulo,
        modulo_in_place, modulo_scalar_in_place, reverse_modulo_in_place;
    BinaryOp::And => and, and_scalar, reverse_and,
        and_in_place, and_scalar_in_place, reverse_and_in_place;
    BinaryOp::Or => or, or_scalar, reverse_or,
        or_in_place, or_scalar_in_place, reverse_or_in_place;
    BinaryOp::Xor => xor, xor_scalar, reverse_xor,
        xor_in_place, xor_scalar_in_place, reverse_xor_in_place;
}

macro_rules! comparison_operators {
    ($($op:expr => $name:ident, $scalar:ident;)*) => {
        impl Column {
            $(
                pub fn $name(&self, other: &Column) -> Result<Column, ColframeError> {
                    self.compare(other, $op)
                }

                pub fn $scalar(&self, scalar: impl Into<Scalar>) -> Result<Column, ColframeError> {
                    self.compare_scalar(scalar.into(), $op)
                }
            )*
        }
    };
}

comparison_operators! {
    ComparisonOp::Equals => elementwise_equals, elementwise_equals_scalar;
    ComparisonOp::NotEquals => elementwise_not_equals, elementwise_not_equals_scalar;
    ComparisonOp::GreaterThanOrEqual =>
        elementwise_greater_than_or_equal, elementwise_greater_than_or_equal_scalar;
    ComparisonOp::LessThanOrEqual =>
        elementwise_less_than_or_equal, elementwise_less_than_or_equal_scalar;
    ComparisonOp::GreaterThan => elementwise_greater_than, elementwise_greater_than_scalar;
    ComparisonOp::LessThan => elementwise_less_than, elementwise_less_than_scalar;
}

impl Column {
    pub fn left_shift(&self, amount: i32) -> Result<Column, ColframeError> {
        self.shift(amount, ShiftOp::Left)
    }

    pub fn right_shift(&self, amount: i32) -> Result<Column, ColframeError> {
        self.shift(amount, ShiftOp::Right)
    }

    pub fn left_shift_in_place(&mut self, amount: i32) -> Result<&mut Column, ColframeError> {
        self.shift_in_place(amount, ShiftOp::Left)
    }

    pub fn right_shift_in_place(&mut self, amount: i32) -> Result<&mut Column, ColframeError> {
        self.shift_in_place(amount, ShiftOp::Right)
    }
}
