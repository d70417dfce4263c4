// In: src/column/aggregate.rs

use crate::column::Column;
use crate::compute::{aggregate, BinaryOp};
use crate::error::ColframeError;
use crate::traits::Element;
use crate::types::Scalar;

fn to_scalar<T: Element>(value: Option<T>) -> Scalar {
    value.map_or(Scalar::Null, Element::into_scalar)
}

/// Ordering aggregates are not defined for booleans.
fn reject_boolean(column: &Column, name: &str) -> Result<(), ColframeError> {
    if column.data_type().is_boolean() {
        return Err(ColframeError::unsupported(name, column.data_type()));
    }
    Ok(())
}

impl Column {
    /// Smallest valid value, or `Scalar::Null` when there is none.
    pub fn min(&self) -> Result<Scalar, ColframeError> {
        reject_boolean(self, "min")?;
        Ok(dispatch!(self, c => to_scalar(aggregate::min(c))))
    }

    pub fn max(&self) -> Result<Scalar, ColframeError> {
        reject_boolean(self, "max")?;
        Ok(dispatch!(self, c => to_scalar(aggregate::max(c))))
    }

    pub fn sum(&self) -> Result<Scalar, ColframeError> {
        dispatch!(self, c => aggregate::sum(c).map(to_scalar))
    }

    pub fn product(&self) -> Result<Scalar, ColframeError> {
        dispatch!(self, c => aggregate::product(c).map(to_scalar))
    }

    pub fn any(&self) -> Result<bool, ColframeError> {
        match self {
            Column::Boolean(c) => Ok(aggregate::any(c)),
            other => Err(ColframeError::UnsupportedOperation(format!(
                "any is only defined for Boolean columns, got {}",
                other.data_type()
            ))),
        }
    }

    pub fn all(&self) -> Result<bool, ColframeError> {
        match self {
            Column::Boolean(c) => Ok(aggregate::all(c)),
            other => Err(ColframeError::UnsupportedOperation(format!(
                "all is only defined for Boolean columns, got {}",
                other.data_type()
            ))),
        }
    }

    pub fn cumulative_sum(&self) -> Result<Column, ColframeError> {
        dispatch!(self, c => aggregate::cumulative(c, BinaryOp::Add).map(Column::from))
    }

    pub fn cumulative_product(&self) -> Result<Column, ColframeError> {
        dispatch!(self, c => aggregate::cumulative(c, BinaryOp::Multiply).map(Column::from))
    }

    pub fn cumulative_min(&self) -> Result<Column, ColframeError> {
        reject_boolean(self, "cumulative_min")?;
        Ok(dispatch!(self, c => Column::from(aggregate::cumulative_min(c))))
    }

    pub fn cumulative_max(&self) -> Result<Column, ColframeError> {
        reject_boolean(self, "cumulative_max")?;
        Ok(dispatch!(self, c => Column::from(aggregate::cumulative_max(c))))
    }
}
