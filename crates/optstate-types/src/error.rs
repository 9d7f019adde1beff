//! Error types for option key creation.

use thiserror::Error;

/// Errors that can occur while creating an option key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// An option with this id was already created in this process.
    #[error("key {id} has already been used. Option keys must be unique")]
    DuplicateId { id: String },

    /// The registry lock was poisoned by a panicking writer.
    #[error("option registry poisoned: {0}")]
    RegistryPoisoned(String),
}

/// Convenience type alias for option key operations.
pub type Result<T> = std::result::Result<T, OptionError>;
