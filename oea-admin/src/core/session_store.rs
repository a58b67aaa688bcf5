//! Session-scoped key-value store
//!
//! Remembers small bits of UI state for the lifetime of one app
//! session; the list screen uses it to restore the last-viewed page
//! index after a create/edit round-trip.

use dashmap::DashMap;

/// Session-scoped persistence
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Key under which the product list remembers its page index
pub const PRODUCTS_PAGE_KEY: &str = "productsPage";

/// Persist the last-viewed product-list page
pub fn remember_products_page(store: &dyn SessionStore, page: u32) {
    store.set(PRODUCTS_PAGE_KEY, &page.to_string());
}

/// Restore the last-viewed product-list page, if one was stored
pub fn load_products_page(store: &dyn SessionStore) -> Option<u32> {
    store.get(PRODUCTS_PAGE_KEY)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_page_memory_helpers() {
        let store = MemorySessionStore::new();
        assert_eq!(load_products_page(&store), None);

        remember_products_page(&store, 3);
        assert_eq!(load_products_page(&store), Some(3));

        store.set(PRODUCTS_PAGE_KEY, "not a number");
        assert_eq!(load_products_page(&store), None);
    }
}
