//! Process-lifetime geocode result cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dispatch_core::GeoPoint;

/// Geocode results keyed by normalized postal code.
///
/// Entries are idempotent (the same postal always geocodes to the same
/// point), so concurrent resolutions may share one cache and a last-writer-
/// wins race on insert is harmless. Negative results are cached too: a
/// `Some(None)` hit means the provider already told us this code does not
/// geocode, and asking again would waste a call.
#[derive(Debug, Default)]
pub struct GeocodeCache {
    inner: RwLock<HashMap<String, Option<GeoPoint>>>,
}

impl GeocodeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` means "never looked up"; inner `None` means "looked up,
    /// provider had no match".
    #[must_use]
    pub fn get(&self, postal: &str) -> Option<Option<GeoPoint>> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(postal).copied()
    }

    pub fn insert(&self, postal: &str, point: Option<GeoPoint>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(postal.to_string(), point);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
