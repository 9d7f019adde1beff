use std::fmt::Debug;
use std::hash::Hash;

/// Types that can be stored as an option value.
///
/// Values must be comparable and hashable so that option states compare and
/// hash structurally, and `Send + Sync + 'static` so that built states can be
/// shared freely between threads. Implemented for every type meeting those
/// bounds.
pub trait OptionValue: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> OptionValue for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
