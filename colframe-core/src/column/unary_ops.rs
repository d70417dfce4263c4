// In: src/column/unary_ops.rs

//! Value-wise `abs` and `round` on untyped columns. Both keep the element type,
//! so there is no promotion; booleans are rejected.

use crate::column::Column;
use crate::compute::{elementwise, UnaryOp};
use crate::error::ColframeError;

impl Column {
    pub fn unary(&self, op: UnaryOp) -> Result<Column, ColframeError> {
        dispatch!(self, c => elementwise::unary(c, op).map(Column::from))
    }

    pub fn unary_in_place(&mut self, op: UnaryOp) -> Result<&mut Column, ColframeError> {
        dispatch!(&mut *self, c => elementwise::unary_in_place(c, op))?;
        Ok(self)
    }

    /// Absolute value. Integers wrap, so the minimum of a signed type maps to itself.
    pub fn abs(&self) -> Result<Column, ColframeError> {
        self.unary(UnaryOp::Abs)
    }

    pub fn abs_in_place(&mut self) -> Result<&mut Column, ColframeError> {
        self.unary_in_place(UnaryOp::Abs)
    }

    /// Rounds half to even. The identity for integer columns.
    pub fn round(&self) -> Result<Column, ColframeError> {
        self.unary(UnaryOp::Round)
    }

    pub fn round_in_place(&mut self) -> Result<&mut Column, ColframeError> {
        self.unary_in_place(UnaryOp::Round)
    }
}
