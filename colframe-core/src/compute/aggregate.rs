// In: src/compute/aggregate.rs

//! Whole-column reductions and running (cumulative) aggregates.
//!
//! Nulls are skipped: a reduction over a column without any valid slot is
//! `None`, and a cumulative aggregate leaves null slots null while carrying the
//! running value across them. Sum and product reuse the binary kernels, so they
//! wrap for integers, fail with `ArithmeticOverflow` for decimals and are
//! rejected for booleans.

use std::cmp::Ordering;

use crate::compute::arithmetic::Arithmetic;
use crate::compute::BinaryOp;
use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::traits::Element;

pub fn min<T: Element>(column: &PrimitiveColumn<T>) -> Option<T> {
    column.iter().flatten().min_by(Element::total_cmp)
}

pub fn max<T: Element>(column: &PrimitiveColumn<T>) -> Option<T> {
    column.iter().flatten().max_by(Element::total_cmp)
}

/// Folds every valid value with `op`.
pub fn reduce<T: Arithmetic>(
    column: &PrimitiveColumn<T>,
    op: BinaryOp,
) -> Result<Option<T>, ColframeError> {
    let kernel = T::binary_kernel(op)?;
    let mut acc: Option<T> = None;
    for value in column.iter().flatten() {
        acc = Some(match acc {
            Some(a) => kernel(a, value)?,
            None => value,
        });
    }
    Ok(acc)
}

pub fn sum<T: Arithmetic>(column: &PrimitiveColumn<T>) -> Result<Option<T>, ColframeError> {
    reduce(column, BinaryOp::Add)
}

pub fn product<T: Arithmetic>(column: &PrimitiveColumn<T>) -> Result<Option<T>, ColframeError> {
    reduce(column, BinaryOp::Multiply)
}

/// True when every valid value is `true` (vacuously true for no values).
pub fn all(column: &PrimitiveColumn<bool>) -> bool {
    column.iter().flatten().all(|v| v)
}

pub fn any(column: &PrimitiveColumn<bool>) -> bool {
    column.iter().flatten().any(|v| v)
}

/// Running fold of `op`; slot `i` holds the fold of every valid value in `[0, i]`.
pub fn cumulative<T: Arithmetic>(
    column: &PrimitiveColumn<T>,
    op: BinaryOp,
) -> Result<PrimitiveColumn<T>, ColframeError> {
    let kernel = T::binary_kernel(op)?;
    let mut acc: Option<T> = None;
    column.map_valid(|value| {
        let next = match acc {
            Some(a) => kernel(a, value)?,
            None => value,
        };
        acc = Some(next);
        Ok(next)
    })
}

fn cumulative_extreme<T: Element>(column: &PrimitiveColumn<T>, keep: Ordering) -> PrimitiveColumn<T> {
    let mut best: Option<T> = None;
    column.apply(|value, _| {
        let value = value?;
        let next = match best {
            Some(b) if b.total_cmp(&value) == keep => b,
            _ => value,
        };
        best = Some(next);
        Some(next)
    })
}

pub fn cumulative_min<T: Element>(column: &PrimitiveColumn<T>) -> PrimitiveColumn<T> {
    cumulative_extreme(column, Ordering::Less)
}

pub fn cumulative_max<T: Element>(column: &PrimitiveColumn<T>) -> PrimitiveColumn<T> {
    cumulative_extreme(column, Ordering::Greater)
}
