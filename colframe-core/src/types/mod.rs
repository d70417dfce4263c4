//! This module defines the core, strongly-typed data representations used
//! throughout colframe.
//!
//! It includes the canonical `DataType` enum naming every supported element
//! type, and the dynamically typed `Scalar` used at the `Column` boundary.

pub mod data_type;
pub mod scalar;

// Re-export the main type(s) for easier access.
pub use data_type::DataType;
pub use scalar::Scalar;
