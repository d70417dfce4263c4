//==================================================================================
// Unit Tests (Typed Elementwise Drivers)
//==================================================================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compute::elementwise::*;
use crate::compute::{BinaryOp, ComparisonOp, ShiftOp, UnaryOp};
use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::types::Scalar;

fn ints(values: &[Option<i32>]) -> PrimitiveColumn<i32> {
    PrimitiveColumn::from_options("x", values.iter().copied())
}

#[test]
fn test_null_slot_payload_is_never_divided() {
    // The null slot's zero payload must not raise DivideByZero.
    let left = ints(&[Some(4), Some(6)]);
    let right = ints(&[Some(2), None]);
    let result = binary(&left, &right, BinaryOp::Divide).unwrap();
    assert_eq!(result.to_vec(), vec![Some(2), None]);
}

#[test]
fn test_divide_by_zero_leaves_receiver_untouched() {
    let mut left = ints(&[Some(4), Some(6), Some(8)]);
    let right = ints(&[Some(2), Some(0), Some(4)]);
    assert!(matches!(
        binary_in_place(&mut left, &right, BinaryOp::Divide),
        Err(ColframeError::DivideByZero)
    ));
    assert_eq!(left.to_vec(), vec![Some(4), Some(6), Some(8)]);
}

#[test]
fn test_reverse_scalar() {
    let column = ints(&[Some(1), None, Some(3)]);
    let result = binary_scalar(&column, &Scalar::Int32(10), BinaryOp::Subtract, true).unwrap();
    assert_eq!(result.to_vec(), vec![Some(9), None, Some(7)]);
    let forward = binary_scalar(&column, &Scalar::Int32(10), BinaryOp::Subtract, false).unwrap();
    assert_eq!(forward.to_vec(), vec![Some(-9), None, Some(-7)]);
}

#[test]
fn test_scalar_must_match_element_type() {
    let column = ints(&[Some(1)]);
    assert!(matches!(
        binary_scalar(&column, &Scalar::Int64(1), BinaryOp::Add, false),
        Err(ColframeError::InvalidValueType { .. })
    ));
}

#[test]
fn test_null_scalar_yields_all_null_after_validation() {
    let column = ints(&[Some(1), Some(2)]);
    let result = binary_scalar(&column, &Scalar::Null, BinaryOp::Multiply, false).unwrap();
    assert_eq!(result.null_count(), 2);

    let flags = PrimitiveColumn::from_values("f", vec![true, false]);
    assert!(matches!(
        binary_scalar(&flags, &Scalar::Null, BinaryOp::Add, false),
        Err(ColframeError::UnsupportedOperation(_))
    ));
    let compared = compare_scalar(&column, &Scalar::Null, ComparisonOp::LessThan).unwrap();
    assert_eq!(compared.to_vec(), vec![None, None]);
}

#[test]
fn test_compare_propagates_nulls() {
    let left = ints(&[Some(1), None, Some(5), Some(5)]);
    let right = ints(&[Some(2), Some(2), None, Some(5)]);
    let result = compare(&left, &right, ComparisonOp::GreaterThanOrEqual).unwrap();
    assert_eq!(result.to_vec(), vec![Some(false), None, None, Some(true)]);
}

#[test]
fn test_shift_in_place() {
    let mut column = PrimitiveColumn::from_options("s", vec![Some(1u16), None, Some(0x8000)]);
    shift_in_place(&mut column, 1, ShiftOp::Left).unwrap();
    assert_eq!(column.to_vec(), vec![Some(2), None, Some(0)]);

    let floats = PrimitiveColumn::from_values("f", vec![1.0f64]);
    assert!(matches!(
        shift(&floats, 1, ShiftOp::Right),
        Err(ColframeError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_unary_skips_null_slots() {
    let mut column = PrimitiveColumn::with_buffer_capacity("u", 2);
    column.extend([Some(-2.5f64), None, Some(3.5), Some(-0.4)]);
    assert_eq!(
        unary(&column, UnaryOp::Abs).unwrap().to_vec(),
        vec![Some(2.5), None, Some(3.5), Some(0.4)]
    );
    unary_in_place(&mut column, UnaryOp::Round).unwrap();
    assert_eq!(column.to_vec(), vec![Some(-2.0), None, Some(4.0), Some(-0.0)]);
    assert_eq!(column.null_count(), 1);

    let mut flags = PrimitiveColumn::from_values("f", vec![true]);
    assert!(matches!(
        unary_in_place(&mut flags, UnaryOp::Abs),
        Err(ColframeError::UnsupportedOperation(_))
    ));
    assert_eq!(flags.to_vec(), vec![Some(true)]);
}

#[test]
fn test_result_is_null_iff_either_input_is_null() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let len = rng.random_range(0..100);
        let mut draw = || -> Vec<Option<i64>> {
            (0..len)
                .map(|_| rng.random_bool(0.7).then(|| rng.random_range(-1000..1000)))
                .collect()
        };
        let (a, b) = (draw(), draw());
        let mut left = PrimitiveColumn::with_buffer_capacity("l", 8);
        left.extend(a.iter().copied());
        let mut right = PrimitiveColumn::with_buffer_capacity("r", 5);
        right.extend(b.iter().copied());

        for op in [BinaryOp::Add, BinaryOp::Multiply, BinaryOp::Xor] {
            let result = binary(&left, &right, op).unwrap();
            for i in 0..len {
                let expected_null = a[i].is_none() || b[i].is_none();
                assert_eq!(result.get(i).unwrap().is_none(), expected_null);
            }
        }
    }
}
