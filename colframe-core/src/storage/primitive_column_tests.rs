//==================================================================================
// Unit Tests (PrimitiveColumn)
//==================================================================================

use crate::error::ColframeError;
use crate::storage::primitive_column::*;
use crate::storage::Buffer;

fn small(values: &[Option<i32>], capacity: usize) -> PrimitiveColumn<i32> {
    let mut column = PrimitiveColumn::with_buffer_capacity("c", capacity);
    column.extend(values.iter().copied());
    column
}

#[test]
fn test_append_rolls_over_into_new_buffers() {
    let column = small(&[Some(1), Some(2), None, Some(4), Some(5)], 2);
    assert_eq!(column.len(), 5);
    assert_eq!(column.buffers().len(), 3);
    assert_eq!(column.buffers()[0].len(), 2);
    assert_eq!(column.buffers()[2].len(), 1);
    assert_eq!(column.null_count(), 1);
    assert_eq!(
        column.to_vec(),
        vec![Some(1), Some(2), None, Some(4), Some(5)]
    );
}

#[test]
fn test_get_crosses_buffer_boundaries() {
    let column = small(&[Some(10), Some(11), Some(12), Some(13), None], 2);
    assert_eq!(column.get(0).unwrap(), Some(10));
    assert_eq!(column.get(3).unwrap(), Some(13));
    assert_eq!(column.get(4).unwrap(), None);
    assert!(matches!(
        column.get(5),
        Err(ColframeError::IndexOutOfRange { index: 5, length: 5 })
    ));
}

#[test]
fn test_set_tracks_null_count() {
    let mut column = small(&[Some(1), Some(2), Some(3)], 2);
    column.set(2, None).unwrap();
    assert_eq!(column.null_count(), 1);
    assert!(!column.is_valid(2).unwrap());

    // Nulling an already-null slot does not double count.
    column.set(2, None).unwrap();
    assert_eq!(column.null_count(), 1);

    column.set(2, Some(30)).unwrap();
    assert_eq!(column.null_count(), 0);
    assert_eq!(column.get(2).unwrap(), Some(30));

    assert!(column.set(3, Some(0)).is_err());
    assert_eq!(column.len(), 3);
}

#[test]
fn test_gather_validates_before_copying() {
    let column = small(&[Some(1), None, Some(3)], 2);
    let gathered = column.gather(&[2, 1, 0, 2]).unwrap();
    assert_eq!(gathered.to_vec(), vec![Some(3), None, Some(1), Some(3)]);
    assert_eq!(gathered.null_count(), 1);
    assert_eq!(gathered.buffer_capacity(), 2);

    assert!(matches!(
        column.gather(&[0, 7]),
        Err(ColframeError::IndexOutOfRange { index: 7, .. })
    ));
}

#[test]
fn test_apply_sees_every_slot_once_in_order() {
    let column = small(&[Some(1), None, Some(3)], 2);
    let mut seen = Vec::new();
    let doubled: PrimitiveColumn<i64> = column.apply(|value, index| {
        seen.push(index);
        value.map(|v| v as i64 * 2)
    });
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(doubled.to_vec(), vec![Some(2), None, Some(6)]);

    // The callback may also turn a null into a value.
    let filled: PrimitiveColumn<i32> = column.apply(|value, _| Some(value.unwrap_or(-1)));
    assert_eq!(filled.null_count(), 0);
    assert_eq!(filled.get(1).unwrap(), Some(-1));
}

#[test]
fn test_map_valid_skips_nulls() {
    let column = small(&[Some(4), None, Some(0)], 2);
    let mapped = column
        .map_valid(|v| {
            if v == 0 {
                Ok(0u8)
            } else {
                Ok((v * 10) as u8)
            }
        })
        .unwrap();
    assert_eq!(mapped.to_vec(), vec![Some(40), None, Some(0)]);

    let failing = column.map_valid::<i32, _>(|_| Err(ColframeError::DivideByZero));
    assert!(matches!(failing, Err(ColframeError::DivideByZero)));
}

#[test]
fn test_zip_valid_handles_different_layouts() {
    let left = small(&[Some(1), Some(2), None, Some(4), Some(5)], 2);
    let right = small(&[Some(10), None, Some(30), Some(40), Some(50)], 3);
    let sum = left.zip_valid(&right, |a, b| Ok(a + b)).unwrap();
    assert_eq!(sum.to_vec(), vec![Some(11), None, None, Some(44), Some(55)]);
    assert_eq!(sum.buffer_capacity(), 2);
    assert_eq!(sum.null_count(), 2);
}

#[test]
fn test_zip_valid_length_mismatch() {
    let left = small(&[Some(1), Some(2)], 4);
    let right = small(&[Some(1)], 4);
    assert!(matches!(
        left.zip_valid(&right, |a, b| Ok(a + b)),
        Err(ColframeError::LengthMismatch { left: 2, right: 1 })
    ));
}

#[test]
fn test_from_buffers_rejects_short_middle_buffer() {
    let mut first = Buffer::<i32>::new(2);
    first.push(Some(1));
    let mut second = Buffer::<i32>::new(2);
    second.push(Some(2));
    let result = PrimitiveColumn::from_buffers("bad".to_string(), 2, vec![first, second]);
    assert!(matches!(result, Err(ColframeError::InternalError(_))));
}

#[test]
fn test_raw_parts_roundtrip_with_validity() {
    let values: Vec<i32> = vec![7, 8, 9, 10];
    let value_bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    // Slot 1 is null.
    let column =
        PrimitiveColumn::<i32>::from_raw_parts("raw", &value_bytes, Some(&[0b1101u8][..]), 4).unwrap();
    assert_eq!(column.to_vec(), vec![Some(7), None, Some(9), Some(10)]);

    let (bytes, validity) = column.to_raw_parts();
    assert_eq!(validity, vec![0b1101]);
    assert_eq!(&bytes[8..], &value_bytes[8..]);
}

#[test]
fn test_raw_parts_without_validity_is_all_valid() {
    let value_bytes: Vec<u8> = [1.5f64, -2.0].iter().flat_map(|v| v.to_ne_bytes()).collect();
    let column = PrimitiveColumn::<f64>::from_raw_parts("f", &value_bytes, None, 2).unwrap();
    assert_eq!(column.null_count(), 0);
    assert_eq!(column.get(1).unwrap(), Some(-2.0));

    let too_short = PrimitiveColumn::<f64>::from_raw_parts("f", &value_bytes, None, 3);
    assert!(matches!(
        too_short,
        Err(ColframeError::BufferTooShort { required: 24, actual: 16 })
    ));
    assert!(too_short.unwrap_err().to_string().contains("need at least 24 bytes"));
}

#[test]
fn test_reinterpret_keeps_validity() {
    let column = PrimitiveColumn::from_options("bits", vec![Some(1.0f32), None]);
    let bits = column.reinterpret::<u32>().unwrap();
    assert_eq!(bits.to_vec(), vec![Some(1.0f32.to_bits()), None]);
    assert!(column.reinterpret::<u64>().is_err());
}

#[test]
fn test_commit_replaces_contents() {
    let mut column = small(&[Some(1), Some(2), Some(3)], 2);
    let replacement = small(&[None, Some(20), Some(30)], 2);
    column.commit(replacement).unwrap();
    assert_eq!(column.to_vec(), vec![None, Some(20), Some(30)]);
    assert_eq!(column.null_count(), 1);
    assert_eq!(column.name(), "c");

    assert!(column.commit(small(&[Some(1)], 2)).is_err());
}
