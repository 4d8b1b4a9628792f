#![forbid(unsafe_code)]

//! The currently active locale.
//!
//! [`ActiveLocale`] is a cloneable handle to one shared slot. Readers take a
//! snapshot of the whole store; a language change replaces the store as a
//! unit, so a render pass never observes a half-updated mapping.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::store::LocaleStore;

/// Shared slot holding the active [`LocaleStore`].
///
/// Cloning the handle shares the slot.
#[derive(Clone)]
pub struct ActiveLocale {
    slot: Arc<ArcSwap<LocaleStore>>,
}

impl fmt::Debug for ActiveLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.slot.load();
        f.debug_struct("ActiveLocale")
            .field("language", &current.language())
            .field("loaded", &current.is_loaded())
            .finish()
    }
}

impl ActiveLocale {
    /// Create a slot holding `store`.
    #[must_use]
    pub fn new(store: LocaleStore) -> Self {
        Self {
            slot: Arc::new(ArcSwap::from_pointee(store)),
        }
    }

    /// Snapshot of the current store.
    #[must_use]
    pub fn current(&self) -> Arc<LocaleStore> {
        self.slot.load_full()
    }

    /// Replace the store, returning the previous one.
    pub fn replace(&self, store: LocaleStore) -> Arc<LocaleStore> {
        let previous = self.slot.swap(Arc::new(store));
        tracing::debug!(
            target: "fwire.locale",
            from = previous.language(),
            to = self.slot.load().language(),
            "active locale replaced"
        );
        previous
    }

    /// Resolve `key` against the current store.
    #[must_use]
    pub fn resolve_text(&self, key: &str) -> Option<String> {
        self.slot.load().resolve_text(key).map(str::to_owned)
    }

    /// Whether two handles share the same slot.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}
