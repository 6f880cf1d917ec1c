//! SDK error types.

use valet_kernel::{ErrorClass, KernelError};

/// Result type for Valet operations.
pub type Result<T> = std::result::Result<T, ValetError>;

/// Errors that can occur through the Valet SDK.
#[derive(Debug, thiserror::Error)]
pub enum ValetError {
    /// The kernel refused or could not parse a command.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Reading a script or writing its responses failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal fault outside the kernel, e.g. a poisoned lock.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ValetError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classifies the error the same way the dispatcher does when
    /// rendering a response line.
    pub fn class(&self) -> ErrorClass {
        match self {
            ValetError::Kernel(err) => err.class(),
            ValetError::Io(_) | ValetError::Internal(_) => ErrorClass::System,
        }
    }
}
