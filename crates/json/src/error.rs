use guest_vm::{ValueKind, VmError};
use thiserror::Error;

/// Failures of an encode call. Any of them aborts the whole call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unsupported type: {0}")]
    UnsupportedValueKind(ValueKind),

    #[error("nested table error")]
    CyclicStructure,

    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("output buffer cannot grow to {requested} bytes")]
    AllocationFailure { requested: usize },
}

/// Failures of a decode call, with the byte offset they were detected at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed JSON at byte {offset}: {reason}")]
    MalformedJson { offset: usize, reason: &'static str },

    #[error("Unexpected trailing input at byte {offset}")]
    TrailingInput { offset: usize },

    #[error("Object key at byte {offset} is not a string")]
    NonStringKey { offset: usize },

    #[error("Nesting depth exceeds limit of {limit} at byte {offset}")]
    DepthLimitExceeded { limit: usize, offset: usize },
}

/// JSON-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Stack error: {0}")]
    Stack(#[from] VmError),
}

/// Result type for JSON operations
pub type JsonResult<T> = Result<T, JsonError>;
