//! Foundation types for optstate.
//!
//! This crate provides the typed option keys and the identity machinery that
//! the option state store is built on. `optstate-store` depends on it and
//! re-exports everything public here.
//!
//! # Key Types
//!
//! - [`OptionKey`]: A typed, uniquely identified configuration key with an optional default
//! - [`OptionToken`]: Opaque identity handle assigned to each key at creation
//! - [`OptionValue`]: Marker trait for types that can be stored under a key
//! - [`OptionDescriptor`]: Serializable id/type summary of a key
//! - [`OptionRegistry`]: Thread-safe registry rejecting duplicate option ids

pub mod error;
pub mod key;
pub mod registry;
pub mod token;
pub mod value;

pub use error::{OptionError, Result};
pub use key::{OptionDescriptor, OptionKey};
pub use registry::OptionRegistry;
pub use token::OptionToken;
pub use value::OptionValue;
