//! Null tracking for the column store: one validity bit per slot, `1` = present.

pub mod bitmap;

pub use bitmap::ValidityBitmap;

#[cfg(test)]
mod bitmap_tests;
