//! Pure, stateless kernels shared by the column store.

pub mod bitcast;
