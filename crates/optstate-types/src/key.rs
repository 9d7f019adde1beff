use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::OptionRegistry;
use crate::token::OptionToken;
use crate::value::OptionValue;

/// A typed configuration key.
///
/// An `OptionKey<V>` pairs a globally unique id with a value type `V` and an
/// optional default. Keys are meant to be created once (typically in a
/// `static` `LazyLock`) and shared; cloning a key yields another handle to
/// the same identity.
///
/// Equality compares id and value type only. The default value is metadata
/// and does not take part in identity. Option states do not use this
/// equality: they key entries by [`OptionToken`].
///
/// ```
/// use optstate_types::OptionKey;
///
/// let verbose = OptionKey::boolean("example:key-doc/verbose", false).unwrap();
/// assert_eq!(verbose.id(), "example:key-doc/verbose");
/// assert_eq!(verbose.default_value(), Some(&false));
/// ```
pub struct OptionKey<V> {
    inner: Arc<KeyInner<V>>,
}

struct KeyInner<V> {
    token: OptionToken,
    id: String,
    default: Option<V>,
}

impl OptionKey<bool> {
    /// Create a boolean option in the global registry.
    pub fn boolean(id: impl Into<String>, default: bool) -> Result<Self> {
        OptionRegistry::global().create(id, Some(default))
    }
}

impl<V: OptionValue> OptionKey<V> {
    pub(crate) fn new(id: String, default: Option<V>) -> Self {
        Self {
            inner: Arc::new(KeyInner {
                token: OptionToken::next(),
                id,
                default,
            }),
        }
    }

    /// Create an enum-valued option in the global registry.
    ///
    /// Any [`OptionValue`] is accepted; the name mirrors the usual use for
    /// fieldless enums.
    pub fn enumeration(id: impl Into<String>, default: V) -> Result<Self> {
        Self::with_default(id, default)
    }

    /// Create an option with a default value in the global registry.
    pub fn with_default(id: impl Into<String>, default: V) -> Result<Self> {
        OptionRegistry::global().create(id, Some(default))
    }

    /// Create an option without a default value in the global registry.
    pub fn without_default(id: impl Into<String>) -> Result<Self> {
        OptionRegistry::global().create(id, None)
    }

    /// The option id, unique within the process.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// The identity token of this key.
    pub fn token(&self) -> OptionToken {
        self.inner.token
    }

    /// Name of the value type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        type_name::<V>()
    }

    /// Runtime tag of the value type.
    pub fn value_type(&self) -> TypeId {
        TypeId::of::<V>()
    }

    /// The default value, if one was declared.
    pub fn default_value(&self) -> Option<&V> {
        self.inner.default.as_ref()
    }

    /// Returns `true` if both handles refer to the same created key.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.inner.token == other.inner.token
    }

    /// Serializable summary of this key.
    pub fn descriptor(&self) -> OptionDescriptor {
        OptionDescriptor {
            id: self.inner.id.clone(),
            value_type: self.type_name().to_string(),
            has_default: self.inner.default.is_some(),
        }
    }
}

impl<V> Clone for OptionKey<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: OptionValue> PartialEq for OptionKey<V> {
    fn eq(&self, other: &Self) -> bool {
        // The value type is fixed by `V`, so only the id can differ.
        self.inner.id == other.inner.id
    }
}

impl<V: OptionValue> Eq for OptionKey<V> {}

impl<V: OptionValue> Hash for OptionKey<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
        TypeId::of::<V>().hash(state);
    }
}

impl<V: OptionValue> fmt::Debug for OptionKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionKey")
            .field("id", &self.inner.id)
            .field("type", &self.type_name())
            .field("default", &self.inner.default)
            .finish()
    }
}

impl<V> fmt::Display for OptionKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.id)
    }
}

/// Id and value type of an option, detached from its value type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// The option id.
    pub id: String,
    /// Name of the option's value type.
    pub value_type: String,
    /// Whether the option declares a default value.
    pub has_default: bool,
}
