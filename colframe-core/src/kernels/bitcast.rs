//! This module contains the pure, stateless kernel for bit-casting.
//!
//! It is the only sanctioned path for reinterpreting raw bits as a different
//! element type: source and destination must have the same size, and all
//! casting goes through `bytemuck`, so there is no `unsafe` here. It backs the
//! raw-byte constructors of `PrimitiveColumn` and `PrimitiveColumn::reinterpret`.

use bytemuck::Pod;

use crate::error::ColframeError;

//==================================================================================
// 1. Public API
//==================================================================================

/// Reinterprets the bit pattern of every `I` as an `O` of the same size
/// (e.g. `f32` -> `u32`).
pub fn reinterpret<I, O>(input: &[I]) -> Result<Vec<O>, ColframeError>
where
    I: Pod,
    O: Pod,
{
    // Critical safety check: The types must be the same size for a bit-cast.
    if std::mem::size_of::<I>() != std::mem::size_of::<O>() {
        return Err(ColframeError::InternalError(format!(
            "Bit-cast size mismatch: Cannot cast from {} ({} bytes) to {} ({} bytes)",
            std::any::type_name::<I>(),
            std::mem::size_of::<I>(),
            std::any::type_name::<O>(),
            std::mem::size_of::<O>()
        )));
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let output: &[O] = bytemuck::try_cast_slice(input)?;
    Ok(output.to_vec())
}

/// Decodes a native-endian byte slice into typed values. The slice need not be
/// aligned for `T`.
pub fn bytes_to_values<T: Pod>(bytes: &[u8]) -> Result<Vec<T>, ColframeError> {
    let width = std::mem::size_of::<T>();
    if width == 0 || bytes.len() % width != 0 {
        return Err(ColframeError::BufferMismatch(width, bytes.len()));
    }
    let mut values = vec![T::zeroed(); bytes.len() / width];
    bytemuck::cast_slice_mut::<T, u8>(&mut values).copy_from_slice(bytes);
    Ok(values)
}

/// Encodes typed values as native-endian bytes.
pub fn values_to_bytes<T: Pod>(values: &[T]) -> Vec<u8> {
    bytemuck::cast_slice::<T, u8>(values).to_vec()
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
