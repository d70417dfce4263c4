//! The null-aware elementwise engine.
//!
//! The engine is split in three layers:
//! 1. `promotion`: the static table that resolves two element types to the one
//!    an operation runs in (or rejects the pair).
//! 2. `arithmetic`: per-type scalar kernels, resolved once per call into plain
//!    function pointers so the inner loops never branch on the operator.
//! 3. `elementwise`: the typed drivers that walk `PrimitiveColumn`s buffer by
//!    buffer, computing validity independently of the raw values.
//!
//! `aggregate` holds whole-column reductions and running aggregates built on
//! the same kernels.
//!
//! The untyped `Column` surface in `crate::column` sits on top of all three.

pub mod aggregate;
pub mod arithmetic;
pub mod elementwise;
pub mod promotion;

#[cfg(test)]
mod elementwise_tests;

use std::fmt;

pub use arithmetic::Arithmetic;

/// Operators that combine two values of the same type into a value of that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    Xor,
}

/// Operators that compare two values and always produce a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Equals,
    NotEquals,
    GreaterThanOrEqual,
    LessThanOrEqual,
    GreaterThan,
    LessThan,
}

impl ComparisonOp {
    /// Equality operators are the only comparisons defined for booleans.
    pub fn is_equality(&self) -> bool {
        matches!(self, ComparisonOp::Equals | ComparisonOp::NotEquals)
    }
}

/// Operators that map one value to a value of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Abs,
    /// Round half to even, to zero decimal places.
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    Left,
    Right,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "subtract",
            BinaryOp::Multiply => "multiply",
            BinaryOp::Divide => "divide",
            BinaryOp::Modulo => "modulo",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComparisonOp::Equals => "equals",
            ComparisonOp::NotEquals => "not_equals",
            ComparisonOp::GreaterThanOrEqual => "greater_than_or_equal",
            ComparisonOp::LessThanOrEqual => "less_than_or_equal",
            ComparisonOp::GreaterThan => "greater_than",
            ComparisonOp::LessThan => "less_than",
        };
        f.write_str(name)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Abs => f.write_str("abs"),
            UnaryOp::Round => f.write_str("round"),
        }
    }
}

impl fmt::Display for ShiftOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftOp::Left => f.write_str("left_shift"),
            ShiftOp::Right => f.write_str("right_shift"),
        }
    }
}
