// In: src/error.rs

//! This module defines the single, unified error type for the entire colframe library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every fallible operation validates its inputs before touching any buffer, so an
//! `Err` always means the receiver is exactly as it was before the call.

use thiserror::Error;

use crate::types::DataType;

#[derive(Error, Debug)]
pub enum ColframeError {
    // =========================================================================
    // === Semantic Errors (raised by the compute engine)
    // =========================================================================
    #[error("Column length mismatch: left has {left} rows, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid value type: expected {expected}, got {actual}")]
    InvalidValueType { expected: DataType, actual: String },

    #[error("Index {index} is out of range for a column of length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("Division by zero")]
    DivideByZero,

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Window size must be a positive integer, got {0}")]
    InvalidWindowSize(usize),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === Raw Byte Source Errors
    // =========================================================================
    #[error("Buffer length mismatch: expected a multiple of {0}, got {1}")]
    BufferMismatch(usize, usize),

    #[error("Buffer too short: need at least {required} bytes, got {actual}")]
    BufferTooShort { required: usize, actual: usize },

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// A configuration value that parsed but is not usable, e.g. an unknown log level.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An error from the Serde JSON library while loading a `ColframeConfig`.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// An error from the I/O subsystem, e.g. while opening a log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ColframeError {
    pub(crate) fn unsupported(op: impl std::fmt::Display, data_type: DataType) -> Self {
        ColframeError::UnsupportedOperation(format!("{} is not defined for {}", op, data_type))
    }

    pub(crate) fn unsupported_pair(
        op: impl std::fmt::Display,
        left: DataType,
        right: DataType,
    ) -> Self {
        ColframeError::UnsupportedOperation(format!(
            "{} is not defined between {} and {}",
            op, left, right
        ))
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for ColframeError {
    fn from(err: bytemuck::PodCastError) -> Self {
        ColframeError::PodCast(err.to_string())
    }
}
