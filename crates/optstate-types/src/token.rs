use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Opaque identity handle of an [`OptionKey`](crate::OptionKey).
///
/// Every key receives a fresh token when it is created, and clones of a key
/// carry the same token. Option states are keyed by token, so two keys that
/// happen to share an id string and value type are still distinct entries.
/// Tokens are ordered by creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OptionToken(u64);

impl OptionToken {
    /// Allocate the next unused token.
    pub(crate) fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw token number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for OptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionToken(#{})", self.0)
    }
}

impl fmt::Display for OptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
