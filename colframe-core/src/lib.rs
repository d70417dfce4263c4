//! This file is the root of the `colframe` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`storage`, `compute`,
//!     `sort`, `window`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the types an application needs to build and compute on
//!     columns without reaching into module paths.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod column;
pub mod compute;
pub mod config;
pub mod error;
pub mod kernels;
pub mod null_handling;
pub mod observability;
pub mod sort;
pub mod storage;
pub mod traits;
pub mod types;
pub mod window;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use column::{Column, ColumnRolling};
pub use compute::{BinaryOp, ComparisonOp, ShiftOp, UnaryOp};
pub use config::{ColframeConfig, MonitoringConfig};
pub use error::ColframeError;
pub use null_handling::ValidityBitmap;
pub use storage::{Buffer, PrimitiveColumn};
pub use traits::Element;
pub use types::{DataType, Scalar};
pub use window::{RingBuffer, RollingWindow};
