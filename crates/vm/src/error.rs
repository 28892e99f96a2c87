use thiserror::Error;

/// Errors raised by the guest value model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VmError {
    #[error("Invalid composite key: {0}")]
    InvalidKey(String),

    #[error("Stack position {position} out of range (stack size {size})")]
    StackIndexOutOfRange { position: usize, size: usize },

    #[error("Stack underflow")]
    StackUnderflow,
}

/// Result type for value model operations
pub type VmResult<T> = Result<T, VmError>;
