//! Unversioned option states and their builder.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use optstate_types::{OptionKey, OptionToken, OptionValue};

use crate::error::{Result, StateError};
use crate::slot::Slot;
use crate::versioned::VersionedBuilder;
use crate::view::StateView;

type Values = BTreeMap<OptionToken, Slot>;

static EMPTY: LazyLock<OptionState> = LazyLock::new(|| OptionState {
    values: Arc::new(Values::new()),
});

/// An immutable snapshot of option values.
///
/// Entries are keyed by the identity of the [`OptionKey`] they were set
/// through, so a lookup only matches the exact key (or a clone of it).
/// Absent keys report their own default. Cloning a state is cheap: clones
/// share the same backing map.
///
/// States are only produced by [`Builder::build`].
#[derive(Clone)]
pub struct OptionState {
    values: Arc<Values>,
}

impl OptionState {
    /// The shared empty state.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Start building an unversioned state.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Start building a versioned state.
    pub fn versioned() -> VersionedBuilder {
        VersionedBuilder::new()
    }

    /// Returns `true` if this state holds a value for `key`.
    pub fn has<V: OptionValue>(&self, key: &OptionKey<V>) -> bool {
        self.values.contains_key(&key.token())
    }

    /// The value stored for `key`, or the key's default when absent.
    ///
    /// Returns `None` only when the key is absent and declares no default.
    ///
    /// # Panics
    ///
    /// Panics if the stored value is not a `V`. Builders only store values
    /// through a typed key, so this indicates a bug in this crate.
    pub fn value<'a, V: OptionValue>(&'a self, key: &'a OptionKey<V>) -> Option<&'a V> {
        match self.try_value(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`value`](OptionState::value), returning
    /// [`StateError::TypeMismatch`] instead of panicking.
    ///
    /// Entries are keyed by the token of the single typed key that set them,
    /// so the mismatch is a guard on this crate's own invariant rather than
    /// an outcome callers should expect.
    pub fn try_value<'a, V: OptionValue>(&'a self, key: &'a OptionKey<V>) -> Result<Option<&'a V>> {
        let Some(slot) = self.values.get(&key.token()) else {
            return Ok(key.default_value());
        };
        slot.downcast::<V>()
            .map(Some)
            .ok_or_else(|| StateError::TypeMismatch {
                id: key.id().to_string(),
                expected: key.type_name(),
                actual: slot.type_name,
            })
    }

    /// Number of options with a value in this state.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no option has a value in this state.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ids of the options set in this state, in key creation order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.values().map(|slot| &*slot.id)
    }

    /// Returns `true` if both states share the same backing map.
    pub fn shares_storage(&self, other: &OptionState) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl Default for OptionState {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for OptionState {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage(other) || *self.values == *other.values
    }
}

impl Eq for OptionState {}

impl Hash for OptionState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl fmt::Debug for OptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionState")
            .field("values", &self.values.values().collect::<Vec<_>>())
            .finish()
    }
}

/// Mutable accumulator for an [`OptionState`].
///
/// Setting a key again overwrites the earlier value. [`build`](Builder::build)
/// copies the accumulated values, so the builder can keep being used and
/// never aliases a built state.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    values: Values,
}

impl Builder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `key`.
    pub fn value<V: OptionValue>(&mut self, key: &OptionKey<V>, value: V) -> &mut Self {
        self.values.insert(key.token(), Slot::new(key, value));
        self
    }

    /// Copy every value from `existing`, overwriting values already set here.
    ///
    /// For a [`Versioned`](crate::Versioned) state this copies its flattened
    /// view at the current target version.
    pub fn values(&mut self, existing: &impl StateView) -> &mut Self {
        let source = existing.flattened();
        self.values.extend(
            source
                .values
                .iter()
                .map(|(token, slot)| (*token, slot.clone())),
        );
        self
    }

    /// Number of options set so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing has been set yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Create the completed state.
    ///
    /// Returns the shared empty state if no values were set.
    pub fn build(&self) -> OptionState {
        if self.values.is_empty() {
            return OptionState::empty();
        }
        OptionState {
            values: Arc::new(self.values.clone()),
        }
    }
}
