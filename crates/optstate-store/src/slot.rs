//! Type-erased storage for option values.

use std::any::{type_name, Any, TypeId};
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use optstate_types::{OptionKey, OptionValue};

/// Object-safe view of an [`OptionValue`].
pub(crate) trait ErasedValue: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn ErasedValue) -> bool;

    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T: OptionValue> ErasedValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn ErasedValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// One entry of an option state: the value plus the key metadata needed to
/// report on it without the key's type parameter.
#[derive(Clone)]
pub(crate) struct Slot {
    pub(crate) id: Arc<str>,
    pub(crate) value_type: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) value: Arc<dyn ErasedValue>,
}

impl Slot {
    pub(crate) fn new<V: OptionValue>(key: &OptionKey<V>, value: V) -> Self {
        Self {
            id: Arc::from(key.id()),
            value_type: TypeId::of::<V>(),
            type_name: type_name::<V>(),
            value: Arc::new(value),
        }
    }

    pub(crate) fn downcast<V: OptionValue>(&self) -> Option<&V> {
        if self.value_type != TypeId::of::<V>() {
            return None;
        }
        (*self.value).as_any().downcast_ref::<V>()
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        (*self.value).dyn_eq(&*other.value)
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_type.hash(state);
        (*self.value).dyn_hash(state);
    }
}

impl Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.id, self.value)
    }
}
