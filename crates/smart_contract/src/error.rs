//! Error types for the contract host surface.

use guest_json::{DecodeError, EncodeError};
use guest_vm::VmError;
use thiserror::Error;

/// Errors raised back into contract code by the host functions.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("not proper json format: {0}")]
    Json(DecodeError),

    #[error("getItem error: can't convert {text} for key {key}: {source}")]
    StateConversion {
        key: String,
        text: String,
        source: DecodeError,
    },

    /// Raised by persistent `StateStore` implementations; `MemoryStore` never fails.
    #[error("Storage error: {0}")]
    Store(String),

    #[error("Cannot modify state in a query call")]
    ReadOnly,

    #[error("VM error: {0}")]
    Vm(#[from] VmError),
}

/// Result type for contract host operations
pub type Result<T> = std::result::Result<T, Error>;
