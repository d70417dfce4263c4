//==================================================================================
// Unit Tests (ValidityBitmap)
//==================================================================================

use crate::error::ColframeError;
use crate::null_handling::bitmap::*;

#[test]
fn test_push_and_null_count() {
    let mut bitmap = ValidityBitmap::new();
    for valid in [true, false, true, true, false] {
        bitmap.push(valid);
    }
    assert_eq!(bitmap.len(), 5);
    assert_eq!(bitmap.null_count(), 2);
    assert!(bitmap.is_valid(0));
    assert!(!bitmap.is_valid(1));
    // Past the end reads as null rather than panicking.
    assert!(!bitmap.is_valid(99));
}

#[test]
fn test_set_returns_previous_state() {
    let mut bitmap = ValidityBitmap::all_valid(3);
    assert!(bitmap.set(1, false).unwrap());
    assert!(!bitmap.set(1, false).unwrap());
    assert_eq!(bitmap.null_count(), 1);
    assert!(matches!(
        bitmap.set(3, true),
        Err(ColframeError::IndexOutOfRange { index: 3, length: 3 })
    ));
}

#[test]
fn test_and_combines_validity() {
    let left: ValidityBitmap = [true, true, false, false].into_iter().collect();
    let right: ValidityBitmap = [true, false, true, false].into_iter().collect();
    let combined = left.and(&right).unwrap();
    assert_eq!(combined.iter().collect::<Vec<_>>(), vec![true, false, false, false]);

    let short = ValidityBitmap::all_valid(2);
    assert!(matches!(left.and(&short), Err(ColframeError::LengthMismatch { .. })));
}

#[test]
fn test_lsb_bytes_layout() {
    // Bits 0, 2 and 9 set.
    let bytes = [0b0000_0101u8, 0b0000_0010u8];
    let bitmap = ValidityBitmap::from_lsb_bytes(&bytes, 10).unwrap();
    let set: Vec<usize> = bitmap
        .iter()
        .enumerate()
        .filter(|(_, v)| *v)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(set, vec![0, 2, 9]);
    assert_eq!(bitmap.to_lsb_bytes(), bytes.to_vec());
}

#[test]
fn test_lsb_bytes_too_short() {
    let result = ValidityBitmap::from_lsb_bytes(&[0xFF], 9);
    assert!(matches!(
        result,
        Err(ColframeError::BufferTooShort { required: 2, actual: 1 })
    ));
}

#[test]
fn test_lsb_bytes_clear_padding_bits() {
    // The high bits of the input byte lie past `len` and must not leak back out.
    let bitmap = ValidityBitmap::from_lsb_bytes(&[0xFF, 0xAA], 3).unwrap();
    assert_eq!(bitmap.len(), 3);
    assert_eq!(bitmap.null_count(), 0);
    assert_eq!(bitmap.to_lsb_bytes(), vec![0b0000_0111]);

    let mut grown = ValidityBitmap::from_lsb_bytes(&[0xFF], 8).unwrap();
    grown.set(7, false).unwrap();
    grown.push(true);
    assert_eq!(grown.to_lsb_bytes(), vec![0b0111_1111, 0b0000_0001]);
    assert!(ValidityBitmap::new().to_lsb_bytes().is_empty());
}

#[test]
fn test_all_null_and_all_valid() {
    assert_eq!(ValidityBitmap::all_null(7).null_count(), 7);
    assert_eq!(ValidityBitmap::all_valid(7).null_count(), 0);
    assert!(ValidityBitmap::new().is_empty());
}
