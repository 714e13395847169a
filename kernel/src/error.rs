use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// Key segment is empty, malformed or of the wrong type.
    InvalidKey,
    /// Request payload failed a type or domain check.
    Validation,
    NotFound,
    Unsupported,
    OutOfStock,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidKey => write!(f, "Invalid key segment"),
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::Unsupported => write!(f, "Operation not supported"),
            KernelError::OutOfStock => write!(f, "Insufficient stock"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
