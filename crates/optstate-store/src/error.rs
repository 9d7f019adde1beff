//! Error types for option state reads.

use thiserror::Error;

/// Errors that can occur when reading from an option state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The value stored under a key does not have the key's declared type.
    #[error("value for option {id} has type {actual}, expected {expected}")]
    TypeMismatch {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Convenience type alias for option state operations.
pub type Result<T> = std::result::Result<T, StateError>;
