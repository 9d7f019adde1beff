//! The process-wide option id registry.
//!
//! [`OptionRegistry`] stores every option id it has handed out in a
//! `HashSet` protected by a `RwLock`. Registration is a single write-locked
//! insert-if-absent step, so concurrent creators can never both claim the same
//! id. Ids are never released.

use std::collections::HashSet;
use std::sync::{LazyLock, RwLock};

use tracing::debug;

use crate::error::{OptionError, Result};
use crate::key::OptionKey;
use crate::value::OptionValue;

static GLOBAL: LazyLock<OptionRegistry> = LazyLock::new(OptionRegistry::new);

/// Registry of used option ids.
///
/// There is exactly one registry per process, reached through
/// [`global`](OptionRegistry::global). It backs every factory on
/// [`OptionKey`] and lives for the whole process, so no two live options
/// ever share an id.
#[derive(Debug)]
pub struct OptionRegistry {
    ids: RwLock<HashSet<String>>,
}

impl OptionRegistry {
    fn new() -> Self {
        Self {
            ids: RwLock::new(HashSet::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static OptionRegistry {
        &GLOBAL
    }

    /// Create an option key, claiming `id`.
    ///
    /// Fails with [`OptionError::DuplicateId`] if the id was already claimed.
    pub fn create<V: OptionValue>(
        &self,
        id: impl Into<String>,
        default: Option<V>,
    ) -> Result<OptionKey<V>> {
        let id = id.into();
        self.claim(&id)?;

        let key = OptionKey::new(id, default);
        debug!(
            id = key.id(),
            token = %key.token(),
            value_type = key.type_name(),
            "option registered"
        );
        Ok(key)
    }

    /// Returns `true` if `id` has been claimed.
    pub fn contains(&self, id: &str) -> Result<bool> {
        let ids = self.ids.read().map_err(|e| {
            OptionError::RegistryPoisoned(format!("lock poisoned: {e}"))
        })?;
        Ok(ids.contains(id))
    }

    /// Number of claimed ids.
    pub fn len(&self) -> Result<usize> {
        let ids = self.ids.read().map_err(|e| {
            OptionError::RegistryPoisoned(format!("lock poisoned: {e}"))
        })?;
        Ok(ids.len())
    }

    /// Returns `true` if no id has been claimed yet.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn claim(&self, id: &str) -> Result<()> {
        let mut ids = self.ids.write().map_err(|e| {
            OptionError::RegistryPoisoned(format!("lock poisoned: {e}"))
        })?;
        if !ids.insert(id.to_string()) {
            return Err(OptionError::DuplicateId { id: id.to_string() });
        }
        Ok(())
    }
}
