//! Versioned overlays of option states.
//!
//! A [`Versioned`] state stores one *incremental* [`OptionState`] per
//! version number: each holds only the values introduced or overridden at
//! that version. Lookups are answered from a flattened state computed for a
//! target version by folding every version at or below it, in ascending
//! order, into a single builder. Later versions win on conflicting keys and
//! versions above the target have no influence.
//!
//! The flattened state is recomputed whenever [`Versioned::at`] picks a new
//! target. Nothing is cached per version, so appending versions never
//! invalidates anything.

use std::collections::btree_map::Range;
use std::collections::BTreeMap;
use std::sync::Arc;

use optstate_types::{OptionKey, OptionValue};
use tracing::{debug, trace};

use crate::error::Result;
use crate::state::{Builder, OptionState};

/// A composite option state built from per-version changes.
///
/// By default a built `Versioned` answers for its newest registered version.
/// Use [`at`](Versioned::at) to view it at another version.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Versioned {
    sets: Arc<BTreeMap<i32, OptionState>>,
    target_version: i32,
    filtered: OptionState,
}

impl Versioned {
    /// The versioned state with no registered versions.
    ///
    /// Targets version 0 and behaves like [`OptionState::empty`].
    pub fn empty() -> Self {
        Self {
            sets: Arc::default(),
            target_version: 0,
            filtered: OptionState::empty(),
        }
    }

    /// Start building a versioned state.
    pub fn builder() -> VersionedBuilder {
        VersionedBuilder::new()
    }

    /// Returns `true` if any version up to the target sets `key`.
    pub fn has<V: OptionValue>(&self, key: &OptionKey<V>) -> bool {
        self.filtered.has(key)
    }

    /// The effective value of `key` at the target version, or its default.
    pub fn value<'a, V: OptionValue>(&'a self, key: &'a OptionKey<V>) -> Option<&'a V> {
        self.filtered.value(key)
    }

    /// Like [`value`](Versioned::value), reporting a type mismatch as an error.
    pub fn try_value<'a, V: OptionValue>(&'a self, key: &'a OptionKey<V>) -> Result<Option<&'a V>> {
        self.filtered.try_value(key)
    }

    /// The individual changes of every version up to the target, ascending.
    pub fn child_states(&self) -> Range<'_, i32, OptionState> {
        self.sets.range(..=self.target_version)
    }

    /// A view showing only values set at versions up to and including
    /// `version`.
    ///
    /// The result shares this state's per-version changes; `self` is left
    /// unchanged.
    pub fn at(&self, version: i32) -> Versioned {
        let filtered = flattened(&self.sets, version);
        trace!(
            target_version = version,
            contributing = self.sets.range(..=version).count(),
            entries = filtered.len(),
            "versioned view flattened"
        );
        Versioned {
            sets: Arc::clone(&self.sets),
            target_version: version,
            filtered,
        }
    }

    /// The version this view answers for.
    pub fn target_version(&self) -> i32 {
        self.target_version
    }

    /// Every registered version, ascending, regardless of the target.
    pub fn versions(&self) -> impl Iterator<Item = i32> + '_ {
        self.sets.keys().copied()
    }

    /// The highest registered version, if any.
    pub fn latest_version(&self) -> Option<i32> {
        self.sets.keys().next_back().copied()
    }

    pub(crate) fn filtered(&self) -> &OptionState {
        &self.filtered
    }
}

impl Default for Versioned {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fold every state at or below `target_version` into one, later versions
/// overriding earlier ones.
fn flattened(versions: &BTreeMap<i32, OptionState>, target_version: i32) -> OptionState {
    let mut builder = Builder::new();
    for child in versions.range(..=target_version).map(|(_, state)| state) {
        builder.values(child);
    }
    builder.build()
}

/// Builder for [`Versioned`] states.
///
/// Each version gets its own [`Builder`]; configuring the same version again
/// adds to that version's builder.
#[derive(Clone, Debug, Default)]
pub struct VersionedBuilder {
    builders: BTreeMap<i32, Builder>,
}

impl VersionedBuilder {
    /// Create a builder with no versions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register options for `version`.
    pub fn version(&mut self, version: i32, configure: impl FnOnce(&mut Builder)) -> &mut Self {
        configure(self.builders.entry(version).or_default());
        self
    }

    /// Create the completed versioned state, targeting the highest registered
    /// version.
    pub fn build(&self) -> Versioned {
        let Some(latest) = self.builders.keys().next_back().copied() else {
            return Versioned::empty();
        };

        let sets: BTreeMap<i32, OptionState> = self
            .builders
            .iter()
            .map(|(version, builder)| (*version, builder.build()))
            .collect();
        // generate the flattened latest view
        let filtered = flattened(&sets, latest);
        debug!(
            versions = sets.len(),
            latest,
            entries = filtered.len(),
            "versioned option state built"
        );

        Versioned {
            sets: Arc::new(sets),
            target_version: latest,
            filtered,
        }
    }
}
