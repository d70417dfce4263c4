//! The chunked buffer store.
//!
//! A `PrimitiveColumn<T>` owns an ordered list of fixed-capacity `Buffer<T>`s,
//! each paired with its own `ValidityBitmap`. Every other component (the
//! elementwise engine, the sort and the rolling window engine) reads and builds
//! columns exclusively through this module.

pub mod buffer;
pub mod primitive_column;

pub use buffer::Buffer;
pub use primitive_column::PrimitiveColumn;

#[cfg(test)]
mod primitive_column_tests;
