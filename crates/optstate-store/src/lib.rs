//! Immutable typed option states with versioned overlays.
//!
//! This crate provides:
//! - [`OptionState`]: an immutable snapshot mapping option keys to typed values,
//!   falling back to each key's default
//! - [`Builder`]: the mutable accumulator that produces option states
//! - [`Versioned`]: per-version incremental states flattened into the
//!   effective state at a target version
//! - [`VersionedBuilder`]: collects per-version builders into a [`Versioned`]
//! - [`StateView`]: the sealed trait shared by both state kinds
//!
//! ```
//! use optstate_store::{OptionKey, OptionState};
//!
//! let compact = OptionKey::boolean("example:lib-doc/compact", false).unwrap();
//!
//! let versioned = OptionState::versioned()
//!     .version(1, |b| {
//!         b.value(&compact, true);
//!     })
//!     .build();
//!
//! assert_eq!(versioned.value(&compact), Some(&true));
//! assert_eq!(versioned.at(0).value(&compact), Some(&false));
//! ```

pub mod error;
pub mod state;
pub mod versioned;
pub mod view;

mod slot;

pub use error::{Result, StateError};
pub use state::{Builder, OptionState};
pub use versioned::{Versioned, VersionedBuilder};
pub use view::StateView;

pub use optstate_types::{
    OptionDescriptor, OptionError, OptionKey, OptionRegistry, OptionToken, OptionValue,
};
