//! Column-level type conversion, limited to the two promotion targets.

use crate::column::Column;
use crate::error::ColframeError;
use crate::traits::Element;
use crate::types::DataType;

impl Column {
    /// Converts this column to `target`. Besides the identity, only numeric
    /// columns converted to `Float64` or `Decimal` are supported. Validity and
    /// buffer layout are preserved; null slots are never converted.
    pub fn cast(&self, target: DataType) -> Result<Column, ColframeError> {
        let source = self.data_type();
        if source == target {
            return Ok(self.clone());
        }
        if source.is_boolean() {
            return Err(ColframeError::InvalidValueType {
                expected: target,
                actual: source.to_string(),
            });
        }
        match target {
            DataType::Float64 => {
                dispatch!(self, c => c.map_valid(|v| Ok(v.to_f64())).map(Column::Float64))
            }
            DataType::Decimal => {
                dispatch!(self, c => c.map_valid(Element::to_decimal).map(Column::Decimal))
            }
            _ => Err(ColframeError::InvalidValueType {
                expected: target,
                actual: source.to_string(),
            }),
        }
    }
}
