//==================================================================================
// Unit Tests (Column)
//==================================================================================

use rust_decimal::Decimal;

use crate::column::*;
use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::types::{DataType, Scalar};

fn int_column(values: &[Option<i32>]) -> Column {
    Column::from(PrimitiveColumn::from_options("ints", values.iter().copied()))
}

fn scalars(values: &[Option<i32>]) -> Vec<Scalar> {
    values.iter().map(|&v| Scalar::from(v)).collect()
}

//==================================================================================
// 1. Store Surface
//==================================================================================

#[test]
fn test_get_set_append_through_scalars() {
    let mut column = Column::new_empty("c", DataType::Int64);
    column.append(1i64).unwrap();
    column.append(Scalar::Null).unwrap();
    column.append(3i64).unwrap();
    assert_eq!(column.len(), 3);
    assert_eq!(column.null_count(), 1);
    assert_eq!(column.get(1).unwrap(), Scalar::Null);

    column.set(1, 2i64).unwrap();
    assert_eq!(column.get(1).unwrap(), Scalar::Int64(2));
    assert_eq!(column.null_count(), 0);

    assert!(matches!(
        column.set(1, 2i32),
        Err(ColframeError::InvalidValueType { expected: DataType::Int64, .. })
    ));
    assert!(matches!(
        column.get(3),
        Err(ColframeError::IndexOutOfRange { index: 3, length: 3 })
    ));
    assert!(column.append(1.0f64).is_err());
    assert_eq!(column.len(), 3);
}

#[test]
fn test_clone_is_independent() {
    let original = int_column(&[Some(1), Some(2)]);
    let mut copy = original.clone();
    copy.set(0, Scalar::Null).unwrap();
    copy.rename("copy");
    assert_eq!(original.get(0).unwrap(), Scalar::Int32(1));
    assert_eq!(original.name(), "ints");
    assert_eq!(copy.name(), "copy");
}

#[test]
fn test_as_primitive_matches_variant_only() {
    let column = int_column(&[Some(1)]);
    assert!(column.as_primitive::<i32>().is_some());
    assert!(column.as_primitive::<i64>().is_none());
}

//==================================================================================
// 2. Elementwise Engine
//==================================================================================

#[test]
fn test_add_two_int_columns() {
    let left = int_column(&[Some(1), Some(2), Some(3)]);
    let right = int_column(&[Some(4), Some(5), Some(6)]);
    let sum = left.add(&right).unwrap();
    assert_eq!(sum.data_type(), DataType::Int32);
    assert_eq!(sum.to_vec(), scalars(&[Some(5), Some(7), Some(9)]));
    assert_eq!(sum.null_count(), 0);
}

#[test]
fn test_add_scalar_keeps_nulls() {
    let column = int_column(&[Some(1), None, Some(3)]);
    let result = column.add_scalar(10).unwrap();
    assert_eq!(result.to_vec(), scalars(&[Some(11), None, Some(13)]));
}

#[test]
fn test_bool_plus_int_is_unsupported() {
    let flags = Column::from(PrimitiveColumn::from_values("b", vec![true, false]));
    assert!(matches!(
        flags.add_scalar(1),
        Err(ColframeError::UnsupportedOperation(_))
    ));
    let ones = Column::from(PrimitiveColumn::from_values("o", vec![1i32, 1]));
    assert!(matches!(
        flags.add(&ones),
        Err(ColframeError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        flags.add(&flags),
        Err(ColframeError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_bool_logic_and_equality() {
    let left = Column::from(PrimitiveColumn::from_options(
        "l",
        vec![Some(true), Some(true), None],
    ));
    let right = Column::from(PrimitiveColumn::from_options(
        "r",
        vec![Some(false), Some(true), Some(true)],
    ));
    assert_eq!(
        left.xor(&right).unwrap().to_vec(),
        vec![Scalar::Boolean(true), Scalar::Boolean(false), Scalar::Null]
    );
    assert_eq!(
        left.elementwise_equals(&right).unwrap().to_vec(),
        vec![Scalar::Boolean(false), Scalar::Boolean(true), Scalar::Null]
    );
    assert!(left.elementwise_greater_than(&right).is_err());
}

#[test]
fn test_mixed_integers_promote_to_float64() {
    let left = int_column(&[Some(1), Some(2)]);
    let right = Column::from(PrimitiveColumn::from_values("r", vec![10i64, 20]));
    let result = left.multiply(&right).unwrap();
    assert_eq!(result.data_type(), DataType::Float64);
    assert_eq!(result.to_vec(), vec![Scalar::Float64(10.0), Scalar::Float64(40.0)]);
}

#[test]
fn test_decimal_promotion() {
    let left = Column::from(PrimitiveColumn::from_values("d", vec![Decimal::new(15, 1)]));
    let result = left.add_scalar(2i32).unwrap();
    assert_eq!(result.data_type(), DataType::Decimal);
    assert_eq!(result.get(0).unwrap(), Scalar::Decimal(Decimal::new(35, 1)));

    let floats = Column::from(PrimitiveColumn::from_values("f", vec![0.5f64]));
    let result = floats.add(&left).unwrap();
    assert_eq!(result.get(0).unwrap(), Scalar::Decimal(Decimal::new(2, 0)));
}

#[test]
fn test_length_mismatch() {
    let left = int_column(&[Some(1), Some(2)]);
    let right = int_column(&[Some(1)]);
    assert!(matches!(
        left.subtract(&right),
        Err(ColframeError::LengthMismatch { left: 2, right: 1 })
    ));
}

#[test]
fn test_in_place_refuses_promotion() {
    let mut left = int_column(&[Some(1), Some(2)]);
    let right = Column::from(PrimitiveColumn::from_values("r", vec![0.5f64, 0.5]));
    assert!(matches!(
        left.add_in_place(&right),
        Err(ColframeError::InvalidValueType { expected: DataType::Int32, .. })
    ));
    assert!(left.add_scalar_in_place(1.5f64).is_err());
    assert_eq!(left.data_type(), DataType::Int32);
    assert_eq!(left.to_vec(), scalars(&[Some(1), Some(2)]));
}

#[test]
fn test_in_place_mutates_receiver() {
    let mut left = Column::from(PrimitiveColumn::from_values("f", vec![1.0f64, 2.0]));
    let right = int_column(&[Some(3), None]);
    left.add_in_place(&right).unwrap().multiply_scalar_in_place(2.0f64).unwrap();
    assert_eq!(left.to_vec(), vec![Scalar::Float64(8.0), Scalar::Null]);
    assert_eq!(left.name(), "f");

    let mut ints = int_column(&[Some(10), Some(20)]);
    ints.reverse_subtract_in_place(100).unwrap();
    assert_eq!(ints.to_vec(), scalars(&[Some(90), Some(80)]));
}

#[test]
fn test_divide_by_zero_and_modulo() {
    let column = int_column(&[Some(7), None, Some(-7)]);
    assert_eq!(
        column.modulo_scalar(4).unwrap().to_vec(),
        scalars(&[Some(3), None, Some(-3)])
    );
    assert!(matches!(
        column.divide_scalar(0),
        Err(ColframeError::DivideByZero)
    ));
    // 0 / x is fine; x / 0 is not.
    assert!(column.reverse_divide(0).is_ok());
    assert!(matches!(
        int_column(&[Some(0)]).reverse_divide(5),
        Err(ColframeError::DivideByZero)
    ));
}

#[test]
fn test_comparisons_yield_boolean_columns() {
    let column = int_column(&[Some(1), None, Some(3)]);
    let result = column.elementwise_less_than_scalar(2).unwrap();
    assert_eq!(result.data_type(), DataType::Boolean);
    assert_eq!(
        result.to_vec(),
        vec![Scalar::Boolean(true), Scalar::Null, Scalar::Boolean(false)]
    );

    let promoted = column.elementwise_greater_than_or_equal_scalar(2.5f64).unwrap();
    assert_eq!(promoted.get(2).unwrap(), Scalar::Boolean(true));
}

#[test]
fn test_shifts() {
    let column = int_column(&[Some(1), None, Some(-8)]);
    assert_eq!(
        column.left_shift(2).unwrap().to_vec(),
        scalars(&[Some(4), None, Some(-32)])
    );
    assert_eq!(
        column.right_shift(1).unwrap().to_vec(),
        scalars(&[Some(0), None, Some(-4)])
    );
    let decimals = Column::from(PrimitiveColumn::from_values("d", vec![Decimal::ONE]));
    assert!(matches!(
        decimals.left_shift(1),
        Err(ColframeError::UnsupportedOperation(_))
    ));

    let mut bytes = Column::from(PrimitiveColumn::from_values("u", vec![1u8]));
    bytes.left_shift_in_place(9).unwrap();
    assert_eq!(bytes.get(0).unwrap(), Scalar::UInt8(2));
}

//==================================================================================
// 3. Sort and Rolling
//==================================================================================

#[test]
fn test_sort_returns_reordered_copy() {
    let column = int_column(&[Some(3), Some(1), None, Some(2)]);
    let sorted = column.sort(true).unwrap();
    assert_eq!(sorted.to_vec(), scalars(&[Some(1), Some(2), Some(3), None]));
    assert_eq!(column.get(0).unwrap(), Scalar::Int32(3));
    assert_eq!(
        column.sort(false).unwrap().to_vec(),
        scalars(&[Some(3), Some(2), Some(1), None])
    );
}

#[test]
fn test_rolling_handle() {
    let column = int_column(&[Some(5), None, Some(3), Some(8), None, Some(1)]);
    let rolling = column.rolling(3).unwrap();
    assert_eq!(rolling.count().data_type(), DataType::Int64);
    assert_eq!(
        rolling.min().to_vec(),
        scalars(&[None, None, Some(3), Some(3), Some(3), Some(1)])
    );
    assert_eq!(
        rolling.max().to_vec(),
        scalars(&[None, None, Some(5), Some(8), Some(8), Some(8)])
    );
    assert_eq!(rolling.mean().get(3).unwrap(), Scalar::Float64(5.5));

    let nulls_seen = rolling.apply(|window, _| {
        Some(window.iter().filter(|v| v.is_null()).count() as u32)
    });
    assert_eq!(nulls_seen.data_type(), DataType::UInt32);
    assert_eq!(nulls_seen.get(1).unwrap(), Scalar::UInt32(1));

    assert!(matches!(
        column.rolling(0),
        Err(ColframeError::InvalidWindowSize(0))
    ));

    let unbounded = column.rolling(usize::MAX).unwrap();
    assert_eq!(unbounded.count().null_count(), 6);
    let widths = unbounded.apply(|window, _| Some(window.len() as u32));
    assert_eq!(widths.get(5).unwrap(), Scalar::UInt32(6));
}

//==================================================================================
// 4. Aggregates
//==================================================================================

#[test]
fn test_reductions_and_running_aggregates() {
    let column = int_column(&[Some(4), None, Some(-2), Some(9)]);
    assert_eq!(column.min().unwrap(), Scalar::Int32(-2));
    assert_eq!(column.max().unwrap(), Scalar::Int32(9));
    assert_eq!(column.sum().unwrap(), Scalar::Int32(11));
    assert_eq!(
        column.cumulative_sum().unwrap().to_vec(),
        scalars(&[Some(4), None, Some(2), Some(11)])
    );
    assert_eq!(
        column.cumulative_max().unwrap().to_vec(),
        scalars(&[Some(4), None, Some(4), Some(9)])
    );
    assert_eq!(int_column(&[None]).min().unwrap(), Scalar::Null);
    assert!(matches!(
        column.any(),
        Err(ColframeError::UnsupportedOperation(_))
    ));

    let flags = Column::from(PrimitiveColumn::from_values("b", vec![true, false]));
    assert!(flags.any().unwrap());
    assert!(!flags.all().unwrap());
    assert!(flags.cumulative_sum().is_err());
    for result in [flags.min(), flags.max()] {
        assert!(matches!(result, Err(ColframeError::UnsupportedOperation(_))));
    }
    assert!(matches!(
        flags.cumulative_min(),
        Err(ColframeError::UnsupportedOperation(_))
    ));
    assert!(flags.cumulative_max().is_err());
}

#[test]
fn test_abs_and_round() {
    let column = int_column(&[Some(-4), None, Some(i32::MIN), Some(7)]);
    assert_eq!(
        column.abs().unwrap().to_vec(),
        scalars(&[Some(4), None, Some(i32::MIN), Some(7)])
    );
    assert_eq!(column.round().unwrap().to_vec(), column.to_vec());

    let mut floats = Column::from(PrimitiveColumn::from_options(
        "f",
        vec![Some(0.5f64), Some(-1.5), None],
    ));
    floats.round_in_place().unwrap().abs_in_place().unwrap();
    assert_eq!(
        floats.to_vec(),
        vec![Scalar::Float64(0.0), Scalar::Float64(2.0), Scalar::Null]
    );

    let decimals = Column::from(PrimitiveColumn::from_values("d", vec![Decimal::new(-25, 1)]));
    assert_eq!(
        decimals.round().unwrap().get(0).unwrap(),
        Scalar::Decimal(Decimal::new(-2, 0))
    );

    let mut flags = Column::from(PrimitiveColumn::from_values("b", vec![true]));
    assert!(matches!(
        flags.abs(),
        Err(ColframeError::UnsupportedOperation(_))
    ));
    assert!(flags.round_in_place().is_err());
    assert_eq!(flags.get(0).unwrap(), Scalar::Boolean(true));
}
