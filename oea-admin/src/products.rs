//! Product listing
//!
//! Query state for the product list screen: page, search and sort,
//! with the page index remembered in the session store so a create or
//! edit round-trip returns to the same page.

use std::sync::Arc;

use oea_client::error::ClientResult;
use oea_client::types::{ProductPage, ProductQuery, ProductSort};
use oea_client::ProductApi;

use crate::core::query_cache::{QueryCache, QueryKey};
use crate::core::session_store::{SessionStore, load_products_page, remember_products_page};

/// List screen state
pub struct ProductListController {
    products: Arc<dyn ProductApi>,
    session: Arc<dyn SessionStore>,
    cache: Arc<QueryCache>,
    query: ProductQuery,
    /// Products-view generation seen by the last refresh
    seen_generation: u64,
}

impl ProductListController {
    /// Restores the last-viewed page from the session store, if any
    pub fn new(
        products: Arc<dyn ProductApi>,
        session: Arc<dyn SessionStore>,
        cache: Arc<QueryCache>,
    ) -> Self {
        let mut query = ProductQuery::default();
        if let Some(page) = load_products_page(session.as_ref()) {
            query.page = page;
        }

        let seen_generation = cache.generation(&QueryKey::Products);
        Self {
            products,
            session,
            cache,
            query,
            seen_generation,
        }
    }

    pub fn query(&self) -> &ProductQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    /// Change page and remember it for the session
    pub fn set_page(&mut self, page: u32) {
        self.query.page = page;
        remember_products_page(self.session.as_ref(), page);
    }

    /// Change the search term; blank terms clear the filter. Search
    /// always returns to the first page.
    pub fn set_search(&mut self, term: Option<String>) {
        self.query.search = term.filter(|t| !t.trim().is_empty());
        self.set_page(0);
    }

    pub fn set_sort(&mut self, sort: Option<ProductSort>) {
        self.query.sort = sort;
    }

    /// Fetch the current page from the backend
    pub async fn refresh(&mut self) -> ClientResult<ProductPage> {
        let generation = self.cache.generation(&QueryKey::Products);
        let page = self.products.list(&self.query).await?;
        self.seen_generation = generation;
        Ok(page)
    }

    /// Whether a commit has landed since the last refresh
    pub fn is_stale(&self) -> bool {
        self.cache.generation(&QueryKey::Products) != self.seen_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session_store::MemorySessionStore;
    use oea_backend_mock::MockProductApi;

    struct Harness {
        session: Arc<MemorySessionStore>,
        cache: Arc<QueryCache>,
        list: ProductListController,
    }

    fn harness() -> Harness {
        let products = Arc::new(MockProductApi::new());
        let session = Arc::new(MemorySessionStore::new());
        let cache = Arc::new(QueryCache::new());
        let list = ProductListController::new(products, session.clone(), cache.clone());
        Harness {
            session,
            cache,
            list,
        }
    }

    #[test]
    fn test_restores_remembered_page() {
        let products = Arc::new(MockProductApi::new());
        let session = Arc::new(MemorySessionStore::new());
        remember_products_page(session.as_ref(), 4);

        let list =
            ProductListController::new(products, session.clone(), Arc::new(QueryCache::new()));
        assert_eq!(list.page(), 4);
    }

    #[test]
    fn test_set_page_writes_session_store() {
        let mut h = harness();
        h.list.set_page(2);
        assert_eq!(load_products_page(h.session.as_ref()), Some(2));
    }

    #[test]
    fn test_search_resets_to_first_page() {
        let mut h = harness();
        h.list.set_page(3);

        h.list.set_search(Some("widget".to_string()));
        assert_eq!(h.list.page(), 0);
        assert_eq!(h.list.query().search.as_deref(), Some("widget"));

        h.list.set_search(Some("   ".to_string()));
        assert_eq!(h.list.query().search, None);
    }

    #[tokio::test]
    async fn test_staleness_follows_commits() {
        let mut h = harness();
        assert!(!h.list.is_stale());

        h.cache.invalidate(QueryKey::Products);
        assert!(h.list.is_stale());

        h.list.refresh().await.unwrap();
        assert!(!h.list.is_stale());
    }
}
