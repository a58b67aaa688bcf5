//! Read-side query cache
//!
//! Tracks a generation counter per cached view. Consumers remember the
//! generation they last rendered and refetch when it moves. The cache
//! subscribes to commit events, so mutations invalidate the product
//! views without the orchestrator knowing who caches what.

use dashmap::DashMap;

use super::events::CommitListener;

/// Identity of one cached view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Products,
    Product(String),
    CurrentUser,
}

/// Generation counters per query key
#[derive(Default)]
pub struct QueryCache {
    generations: DashMap<QueryKey, u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation of a view (0 until first invalidated)
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(key).map(|entry| *entry).unwrap_or(0)
    }

    /// Mark one view stale
    pub fn invalidate(&self, key: QueryKey) {
        *self.generations.entry(key).or_insert(0) += 1;
    }

    /// Mark every known view stale (logout)
    pub fn clear(&self) {
        self.generations.iter_mut().for_each(|mut entry| {
            *entry.value_mut() += 1;
        });
    }
}

impl CommitListener for QueryCache {
    fn on_committed(&self, product_id: Option<&str>) {
        self.invalidate(QueryKey::Products);
        if let Some(id) = product_id {
            self.invalidate(QueryKey::Product(id.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_bumps_generation() {
        let cache = QueryCache::new();
        assert_eq!(cache.generation(&QueryKey::Products), 0);

        cache.invalidate(QueryKey::Products);
        cache.invalidate(QueryKey::Products);
        assert_eq!(cache.generation(&QueryKey::Products), 2);
    }

    #[test]
    fn test_commit_invalidates_list_and_detail() {
        let cache = QueryCache::new();
        cache.on_committed(Some("p-9"));

        assert_eq!(cache.generation(&QueryKey::Products), 1);
        assert_eq!(cache.generation(&QueryKey::Product("p-9".to_string())), 1);
        assert_eq!(cache.generation(&QueryKey::Product("p-8".to_string())), 0);
    }

    #[test]
    fn test_clear_touches_every_known_view() {
        let cache = QueryCache::new();
        cache.invalidate(QueryKey::Products);
        cache.invalidate(QueryKey::CurrentUser);

        cache.clear();
        assert_eq!(cache.generation(&QueryKey::Products), 2);
        assert_eq!(cache.generation(&QueryKey::CurrentUser), 2);
    }
}
