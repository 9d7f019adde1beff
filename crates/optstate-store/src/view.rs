//! The sealed [`StateView`] trait.
//!
//! Both [`OptionState`] and [`Versioned`] answer lookups from a single
//! flattened snapshot. `StateView` exposes that snapshot so a [`Builder`]
//! can copy from either kind. The trait is sealed: only the state types in
//! this crate implement it, so a builder never has to deal with an unknown
//! implementation.
//!
//! [`Builder`]: crate::Builder

use optstate_types::{OptionKey, OptionValue};

use crate::error::Result;
use crate::state::OptionState;
use crate::versioned::Versioned;

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::state::OptionState {}
    impl Sealed for crate::versioned::Versioned {}
}

/// Read access shared by every option state kind.
pub trait StateView: sealed::Sealed {
    /// The snapshot this view answers lookups from.
    fn flattened(&self) -> &OptionState;

    /// Returns `true` if the view holds a value for `key`.
    fn has<V: OptionValue>(&self, key: &OptionKey<V>) -> bool {
        self.flattened().has(key)
    }

    /// The value for `key`, or the key's default when absent.
    fn value<'a, V: OptionValue>(&'a self, key: &'a OptionKey<V>) -> Option<&'a V> {
        self.flattened().value(key)
    }

    /// Like [`value`](StateView::value), reporting a type mismatch as an error.
    fn try_value<'a, V: OptionValue>(&'a self, key: &'a OptionKey<V>) -> Result<Option<&'a V>> {
        self.flattened().try_value(key)
    }
}

impl StateView for OptionState {
    fn flattened(&self) -> &OptionState {
        self
    }
}

impl StateView for Versioned {
    fn flattened(&self) -> &OptionState {
        self.filtered()
    }
}
