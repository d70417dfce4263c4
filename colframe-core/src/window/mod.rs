//! The rolling window engine.
//!
//! `RollingWindow` runs one forward pass per aggregate. Count and min/max keep
//! O(1) amortised state per row (a validity ring and a monotonic deque); the
//! generic `apply` hands a caller-supplied reduction the window contents held
//! in a fixed-capacity `RingBuffer`, and the typed `sum`/`mean` helpers are
//! built on top of it.
//!
//! Precondition: the column must not be mutated while a pass is running.

pub mod ring_buffer;
pub mod rolling;

pub use ring_buffer::RingBuffer;
pub use rolling::RollingWindow;
